//! Package filter configuration
//!
//! This module provides the UpdateFilter struct that encapsulates
//! the `--only` / `--exclude` options.

/// Filter configuration for update judgment
#[derive(Debug, Clone, Default)]
pub struct UpdateFilter {
    /// Packages to exclude from updates
    pub exclude: Vec<String>,
    /// If non-empty, only update these packages
    pub only: Vec<String>,
}

impl UpdateFilter {
    /// Create a new UpdateFilter with default settings (process all)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set packages to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set packages to include (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Check if a package should be processed.
    ///
    /// `names` are the aliases a dependency answers to (`group:artifact`,
    /// the cross-versioned module name, ...); any of them may match.
    pub fn should_process_package(&self, names: &[&str]) -> bool {
        let listed = |list: &[String]| list.iter().any(|p| names.contains(&p.as_str()));

        if !self.only.is_empty() {
            return listed(&self.only);
        }
        !listed(&self.exclude)
    }
}
