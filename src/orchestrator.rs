//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: read → extract → judge → patch → write
//! - Version targets assembled from the versions file and `--set`
//! - Dry-run mode support
//! - Error handling with partial continuation across files

use crate::cli::CliArgs;
use crate::domain::UpdateSummary;
use crate::error::{ConfigError, ManifestError};
use crate::manifest::{parse_manifest, ManifestWriter, PackageFile};
use crate::update::{UpdateFilter, UpdateJudge, VersionTargets};
use std::path::{Path, PathBuf};

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Decides the target version per dependency
    judge: UpdateJudge,
}

/// Result of running the orchestrator
pub struct OrchestratorResult {
    /// Update summary with all results
    pub summary: UpdateSummary,
    /// Errors encountered during processing
    pub errors: Vec<OrchestratorError>,
}

impl OrchestratorResult {
    /// Returns true if any dependency hit a version conflict
    pub fn has_conflicts(&self) -> bool {
        self.summary.total_conflicts() > 0
    }
}

/// Dependencies extracted from one file, for `--list`
#[derive(Debug, Clone)]
pub struct ManifestListing {
    /// Path to the file
    pub path: PathBuf,
    /// What was extracted
    pub package_file: PackageFile,
}

/// Per-file errors that do not stop the run
#[derive(Debug)]
pub enum OrchestratorError {
    /// Failed to read or extract a manifest
    ManifestParseError { path: String, message: String },
    /// Failed to apply updates to a manifest
    WriteError { path: String, message: String },
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::ManifestParseError { path, message } => {
                write!(f, "Failed to parse {}: {}", path, message)
            }
            OrchestratorError::WriteError { path, message } => {
                write!(f, "Failed to update {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl OrchestratorError {
    /// Classify a file failure as a read or a write problem
    fn from_manifest_error(path: &Path, error: &ManifestError) -> Self {
        let path = path.display().to_string();
        let message = error.to_string();
        if error.is_read_failure() {
            OrchestratorError::ManifestParseError { path, message }
        } else {
            OrchestratorError::WriteError { path, message }
        }
    }
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, ConfigError> {
        args.validate()?;
        let targets = Self::build_targets(&args)?;
        let filter = UpdateFilter::new()
            .with_only(args.only.clone())
            .with_exclude(args.exclude.clone());

        tracing::debug!(targets = targets.len(), files = args.files.len(), "starting");
        if !args.list && !args.has_targets() {
            tracing::warn!(
                "no version targets given (use --set or --versions); nothing will change"
            );
        }

        Ok(Self {
            judge: UpdateJudge::new(filter, targets),
            args,
        })
    }

    /// Merge the versions file with `--set` values; the command line wins
    fn build_targets(args: &CliArgs) -> Result<VersionTargets, ConfigError> {
        let from_file = match &args.versions {
            Some(path) => VersionTargets::from_file(path)?,
            None => VersionTargets::new(),
        };
        let from_cli = VersionTargets::from_assignments(args.set.as_slice())?;
        Ok(from_file.merge(from_cli))
    }

    /// Run the update workflow
    pub fn run(&self) -> OrchestratorResult {
        let writer = ManifestWriter::new(self.args.dry_run);
        let mut summary = UpdateSummary::new(self.args.dry_run);
        let mut errors = Vec::new();

        for path in &self.args.files {
            match writer.apply_updates(path, &self.judge) {
                Ok(manifest) => summary.add_manifest(manifest),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "manifest failed");
                    errors.push(OrchestratorError::from_manifest_error(path, &e));
                }
            }
        }

        OrchestratorResult { summary, errors }
    }

    /// Extract every file without changing anything
    pub fn list(&self) -> (Vec<ManifestListing>, Vec<OrchestratorError>) {
        let mut listings = Vec::new();
        let mut errors = Vec::new();

        for path in &self.args.files {
            match parse_manifest(path) {
                Ok(package_file) => listings.push(ManifestListing {
                    path: path.clone(),
                    package_file,
                }),
                Err(e) => errors.push(OrchestratorError::from_manifest_error(path, &e)),
            }
        }

        (listings, errors)
    }
}
