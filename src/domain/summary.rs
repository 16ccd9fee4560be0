//! Per-file and per-run tallies of patch results

use super::UpdateResult;
use serde::Serialize;
use std::path::PathBuf;

/// Everything that happened to one sbt file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestUpdateResult {
    pub path: PathBuf,
    /// One entry per extracted dependency, in declaration order
    pub results: Vec<UpdateResult>,
    /// Set once any patch was applied
    pub modified: bool,
    #[serde(skip)]
    pub original: String,
    /// Text after every accepted patch; equals `original` when nothing applied
    #[serde(skip)]
    pub updated: String,
}

impl ManifestUpdateResult {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            results: Vec::new(),
            modified: false,
            original: String::new(),
            updated: String::new(),
        }
    }

    pub fn add_result(&mut self, result: UpdateResult) {
        self.modified |= result.is_update();
        self.results.push(result);
    }

    fn count(&self, pred: impl Fn(&UpdateResult) -> bool) -> usize {
        self.results.iter().filter(|r| pred(*r)).count()
    }

    pub fn update_count(&self) -> usize {
        self.count(UpdateResult::is_update)
    }

    /// Skips of any kind, conflicts included
    pub fn skip_count(&self) -> usize {
        self.count(UpdateResult::is_skip)
    }

    /// Patches refused because the text was stale or ambiguous
    pub fn conflict_count(&self) -> usize {
        self.count(UpdateResult::is_conflict)
    }

    pub fn updates(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| r.is_update())
    }

    pub fn skips(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| r.is_skip())
    }
}

/// Results of one run over every file given on the command line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateSummary {
    pub manifests: Vec<ManifestUpdateResult>,
    pub dry_run: bool,
}

impl UpdateSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            manifests: Vec::new(),
            dry_run,
        }
    }

    pub fn add_manifest(&mut self, manifest: ManifestUpdateResult) {
        self.manifests.push(manifest);
    }

    pub fn files_processed(&self) -> usize {
        self.manifests.len()
    }

    pub fn files_modified(&self) -> usize {
        self.manifests.iter().filter(|m| m.modified).count()
    }

    fn sum(&self, per_file: impl Fn(&ManifestUpdateResult) -> usize) -> usize {
        self.manifests.iter().map(per_file).sum()
    }

    pub fn total_updates(&self) -> usize {
        self.sum(ManifestUpdateResult::update_count)
    }

    pub fn total_skips(&self) -> usize {
        self.sum(ManifestUpdateResult::skip_count)
    }

    pub fn total_conflicts(&self) -> usize {
        self.sum(ManifestUpdateResult::conflict_count)
    }
}
