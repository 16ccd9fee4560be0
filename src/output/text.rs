//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Update lines with old and new versions
//! - Version conflicts, always shown
//! - Skipped packages with reasons in verbose mode
//! - Summary line

use crate::domain::{Dependency, ManifestUpdateResult, SkipReason, UpdateResult};
use crate::orchestrator::{ManifestListing, OrchestratorResult};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self::with_color(verbosity, dry_run, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if !self.dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    /// Name used on every result line: the module plus its scope, if any
    fn display_name(dependency: &Dependency) -> String {
        match &dependency.scope {
            Some(scope) => format!("{} ({})", dependency.dep_name, scope),
            None => dependency.dep_name.clone(),
        }
    }

    /// Calculate the maximum package name length for alignment
    fn max_name_length(results: &[&UpdateResult]) -> usize {
        results
            .iter()
            .map(|r| Self::display_name(r.dependency()).len())
            .max()
            .unwrap_or(0)
    }

    fn format_update_line(
        &self,
        dependency: &Dependency,
        new_version: &str,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = Self::display_name(dependency);
        let via = dependency
            .variable_name
            .as_ref()
            .map(|v| format!(" via {}", v))
            .unwrap_or_default();

        if self.color {
            writeln!(
                writer,
                "  {:width$} {} {} {}{}",
                name,
                dependency.current_value.dimmed(),
                "→".dimmed(),
                new_version.bright_white().bold(),
                via.dimmed(),
                width = width
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {}{}",
                name,
                dependency.current_value,
                new_version,
                via,
                width = width
            )
        }
    }

    fn format_skip_line(
        &self,
        dependency: &Dependency,
        reason: &SkipReason,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = Self::display_name(dependency);
        let line = format!(
            "  {:width$} {} (line {}: {})",
            name,
            dependency.current_value,
            dependency.line_number,
            reason,
            width = width
        );

        if !self.color {
            writeln!(writer, "{}", line)
        } else if reason.is_conflict() {
            writeln!(writer, "{}", line.yellow())
        } else {
            writeln!(writer, "{}", line.dimmed())
        }
    }

    fn write_summary(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let summary = &result.summary;
        let verb = if self.dry_run {
            "would be updated"
        } else {
            "updated"
        };
        let line = format!(
            "{} package(s) {} in {} of {} file(s), {} conflict(s)",
            summary.total_updates(),
            verb,
            summary.files_modified(),
            summary.files_processed(),
            summary.total_conflicts()
        );

        if self.color && summary.total_conflicts() > 0 {
            writeln!(writer, "{}{}", self.dry_run_prefix(), line.yellow())
        } else if self.color {
            writeln!(writer, "{}{}", self.dry_run_prefix(), line.green())
        } else {
            writeln!(writer, "{}{}", self.dry_run_prefix(), line)
        }
    }

    /// One file: header, updates, conflicts, then skips when verbose
    fn format_manifest(
        &self,
        manifest: &ManifestUpdateResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let updates: Vec<&UpdateResult> = manifest.updates().collect();
        let (conflicts, skips): (Vec<&UpdateResult>, Vec<&UpdateResult>) =
            manifest.skips().partition(|r| r.is_conflict());

        let verbose = self.verbosity == Verbosity::Verbose;
        if updates.is_empty() && conflicts.is_empty() && (!verbose || skips.is_empty()) {
            return Ok(());
        }

        let header = format!(
            "{}: {} update(s), {} conflict(s), {} skip(s)",
            manifest.path.display(),
            updates.len(),
            conflicts.len(),
            skips.len()
        );
        if self.color {
            writeln!(writer, "{}{}", self.dry_run_prefix(), header.bold())?;
        } else {
            writeln!(writer, "{}{}", self.dry_run_prefix(), header)?;
        }

        let mut shown: Vec<&UpdateResult> =
            updates.iter().chain(conflicts.iter()).copied().collect();
        if verbose {
            shown.extend(skips.iter().copied());
        }
        let width = Self::max_name_length(&shown).max(20);

        for result in &updates {
            if let UpdateResult::Update {
                dependency,
                new_version,
            } = result
            {
                self.format_update_line(dependency, new_version, width, writer)?;
            }
        }

        for result in &conflicts {
            if let UpdateResult::Skip { dependency, reason } = result {
                self.format_skip_line(dependency, reason, width, writer)?;
            }
        }

        if verbose && !skips.is_empty() {
            writeln!(writer, "  Skipped:")?;
            for result in &skips {
                if let UpdateResult::Skip { dependency, reason } = result {
                    self.format_skip_line(dependency, reason, width, writer)?;
                }
            }
        }

        writeln!(writer)?;
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet {
            for manifest in &result.summary.manifests {
                self.format_manifest(manifest, writer)?;
            }
        }

        self.write_summary(result, writer)
    }

    fn format_listing(
        &self,
        listings: &[ManifestListing],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for listing in listings {
            let file = &listing.package_file;
            let header = match &file.scala_version {
                Some(v) => format!("{} (scala {})", listing.path.display(), v),
                None => listing.path.display().to_string(),
            };
            if self.color {
                writeln!(writer, "{}", header.bold())?;
            } else {
                writeln!(writer, "{}", header)?;
            }

            let width = file
                .deps
                .iter()
                .map(|d| Self::display_name(d).len())
                .max()
                .unwrap_or(0)
                .max(20);

            for dep in &file.deps {
                let via = dep
                    .variable_name
                    .as_ref()
                    .map(|v| format!(" via {}", v))
                    .unwrap_or_default();
                writeln!(
                    writer,
                    "  {:width$} {:<12} [{}] line {}{}",
                    Self::display_name(dep),
                    dep.current_value,
                    dep.kind,
                    dep.line_number,
                    via,
                    width = width
                )?;
            }

            if self.verbosity == Verbosity::Verbose {
                for url in &file.registry_urls {
                    writeln!(writer, "  resolver {}", url)?;
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}
