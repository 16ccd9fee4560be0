//! Diff output formatter for showing changes
//!
//! Patches only ever rewrite a version token inside a line, so the diff is
//! computed line by line between the text before and after patching.

use crate::domain::ManifestUpdateResult;
use crate::orchestrator::{ManifestListing, OrchestratorResult};
use crate::output::{OutputFormatter, TextFormatter, Verbosity};
use std::io::Write;

/// One line that differs between two texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedLine<'a> {
    /// Line number (1-based)
    pub line_number: usize,
    /// Line before
    pub old: &'a str,
    /// Line after
    pub new: &'a str,
}

/// Lines that differ between `original` and `updated`.
///
/// Texts with a different number of lines are reported as a single change
/// spanning the whole text.
pub fn changed_lines<'a>(original: &'a str, updated: &'a str) -> Vec<ChangedLine<'a>> {
    if original == updated {
        return Vec::new();
    }
    if original.lines().count() != updated.lines().count() {
        return vec![ChangedLine {
            line_number: 1,
            old: original,
            new: updated,
        }];
    }

    original
        .lines()
        .zip(updated.lines())
        .enumerate()
        .filter(|(_, (old, new))| old != new)
        .map(|(idx, (old, new))| ChangedLine {
            line_number: idx + 1,
            old,
            new,
        })
        .collect()
}

/// Diff formatter for showing version changes
pub struct DiffFormatter {
    /// Whether this is a dry-run
    dry_run: bool,
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> &'static str {
        if self.dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }

    fn format_manifest(
        &self,
        manifest: &ManifestUpdateResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let changes = changed_lines(&manifest.original, &manifest.updated);
        if changes.is_empty() {
            return Ok(());
        }

        let prefix = self.dry_run_prefix();
        writeln!(writer, "{}--- a/{}", prefix, manifest.path.display())?;
        writeln!(writer, "{}+++ b/{}", prefix, manifest.path.display())?;

        for change in changes {
            writeln!(writer, "@@ line {} @@", change.line_number)?;
            for line in change.old.lines() {
                writeln!(writer, "-{}", line)?;
            }
            for line in change.new.lines() {
                writeln!(writer, "+{}", line)?;
            }
        }

        writeln!(writer)?;
        Ok(())
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        for manifest in &result.summary.manifests {
            self.format_manifest(manifest, writer)?;
        }

        let updates = result.summary.total_updates();
        let conflicts = result.summary.total_conflicts();
        writeln!(
            writer,
            "{}# {} package(s) updated, {} conflict(s)",
            self.dry_run_prefix(),
            updates,
            conflicts
        )?;

        Ok(())
    }

    fn format_listing(
        &self,
        listings: &[ManifestListing],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        TextFormatter::with_color(Verbosity::Normal, self.dry_run, false)
            .format_listing(listings, writer)
    }
}
