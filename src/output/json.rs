//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of update results
//! - Structured file-by-file update/conflict/skip information
//! - JSON listing of extracted dependencies

use crate::domain::{Dependency, DependencyKind, ManifestUpdateResult, SkipReason, UpdateResult};
use crate::manifest::PackageFile;
use crate::orchestrator::{ManifestListing, OrchestratorResult};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-file results
    manifests: Vec<JsonManifest>,
    /// Errors encountered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    updates: usize,
    skips: usize,
    conflicts: usize,
    files_modified: usize,
}

/// JSON representation of a file result
#[derive(Serialize)]
struct JsonManifest {
    path: String,
    modified: bool,
    updates: Vec<JsonUpdate>,
    /// Always present so callers can detect refused patches
    conflicts: Vec<JsonSkip>,
    /// Other skips (only in verbose mode)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skips: Vec<JsonSkip>,
}

#[derive(Serialize)]
struct JsonUpdate {
    /// `group:artifact`
    name: String,
    /// Module name with the Scala binary suffix applied
    module: String,
    from: String,
    to: String,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    variable: Option<String>,
}

#[derive(Serialize)]
struct JsonSkip {
    name: String,
    version: String,
    line: usize,
    reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct JsonListing<'a> {
    path: String,
    #[serde(flatten)]
    package_file: &'a PackageFile,
}

impl JsonFormatter {
    /// Stable machine-readable code for a skip reason
    fn skip_reason_code(reason: &SkipReason) -> &'static str {
        match reason {
            SkipReason::NoTarget => "no_target",
            SkipReason::AlreadyAtTarget => "already_at_target",
            SkipReason::Excluded => "excluded",
            SkipReason::NotInOnlyList => "not_in_only_list",
            SkipReason::StaleSnapshot => "stale_snapshot",
            SkipReason::AmbiguousMatch => "ambiguous_match",
            SkipReason::Invalid(_) => "invalid",
        }
    }

    fn skip_to_json(dependency: &Dependency, reason: &SkipReason) -> JsonSkip {
        JsonSkip {
            name: dependency.dep_name.clone(),
            version: dependency.current_value.clone(),
            line: dependency.line_number,
            reason: Self::skip_reason_code(reason).to_string(),
            message: match reason {
                SkipReason::Invalid(msg) => Some(msg.clone()),
                _ => None,
            },
        }
    }

    /// Convert file result to JSON representation
    fn manifest_to_json(
        &self,
        manifest: &ManifestUpdateResult,
        scala_version: Option<&str>,
    ) -> JsonManifest {
        let updates = manifest
            .updates()
            .filter_map(|result| match result {
                UpdateResult::Update {
                    dependency,
                    new_version,
                } => Some(JsonUpdate {
                    name: dependency.dep_name.clone(),
                    module: dependency.package_name(scala_version),
                    from: dependency.current_value.clone(),
                    to: new_version.clone(),
                    line: dependency.line_number,
                    variable: dependency.variable_name.clone(),
                }),
                UpdateResult::Skip { .. } => None,
            })
            .collect();

        let mut conflicts = Vec::new();
        let mut skips = Vec::new();
        for result in manifest.skips() {
            if let UpdateResult::Skip { dependency, reason } = result {
                if reason.is_conflict() {
                    conflicts.push(Self::skip_to_json(dependency, reason));
                } else if self.verbosity == Verbosity::Verbose {
                    skips.push(Self::skip_to_json(dependency, reason));
                }
            }
        }

        JsonManifest {
            path: manifest.path.display().to_string(),
            modified: manifest.modified,
            updates,
            conflicts,
            skips,
        }
    }

    /// Scala version recorded in the file's own results, used for module names
    fn scala_version_of(manifest: &ManifestUpdateResult) -> Option<String> {
        manifest
            .results
            .iter()
            .map(UpdateResult::dependency)
            .find(|d| d.kind == DependencyKind::Scala)
            .map(|d| d.current_value.clone())
    }

    fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = &result.summary;
        let output = JsonOutput {
            dry_run: summary.dry_run,
            summary: JsonSummary {
                updates: summary.total_updates(),
                skips: summary.total_skips(),
                conflicts: summary.total_conflicts(),
                files_modified: summary.files_modified(),
            },
            manifests: summary
                .manifests
                .iter()
                .map(|m| self.manifest_to_json(m, Self::scala_version_of(m).as_deref()))
                .collect(),
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };

        Self::write_json(&output, writer)
    }

    fn format_listing(
        &self,
        listings: &[ManifestListing],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output: Vec<JsonListing<'_>> = listings
            .iter()
            .map(|l| JsonListing {
                path: l.path.display().to_string(),
                package_file: &l.package_file,
            })
            .collect();
        Self::write_json(&output, writer)
    }
}
