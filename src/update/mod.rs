//! Update decisions and version patching
//!
//! This module provides:
//! - The patcher that rewrites one version token in sbt text
//! - Package filters from CLI args
//! - Requested target versions from CLI args and a versions file
//! - The judge that pairs extracted dependencies with their targets

mod filter;
mod patch;
mod targets;

pub use filter::UpdateFilter;
pub use patch::{locate_version, patch_dependency, update_dependency, PatchOutcome, VersionMatch};
pub use targets::VersionTargets;

use crate::domain::{Dependency, SkipReason};

/// Decides which version, if any, to request for each dependency
pub struct UpdateJudge {
    /// Filter configuration
    filter: UpdateFilter,
    /// Requested versions
    targets: VersionTargets,
}

impl UpdateJudge {
    /// Create a new UpdateJudge
    pub fn new(filter: UpdateFilter, targets: VersionTargets) -> Self {
        Self { filter, targets }
    }

    /// Names a dependency can be referred to by, most specific first
    pub fn keys_for(dependency: &Dependency, scala_version: Option<&str>) -> Vec<String> {
        let mut keys = vec![dependency.package_name(scala_version)];
        if !keys.contains(&dependency.dep_name) {
            keys.push(dependency.dep_name.clone());
        }
        if let Some(var) = &dependency.variable_name {
            keys.push(var.clone());
        }
        keys
    }

    /// Return the dependency with `new_value` set, or the reason it is left alone
    pub fn judge(
        &self,
        dependency: &Dependency,
        scala_version: Option<&str>,
    ) -> Result<Dependency, SkipReason> {
        let keys = Self::keys_for(dependency, scala_version);
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();

        if !self.filter.should_process_package(&keys) {
            return Err(if self.filter.only.is_empty() {
                SkipReason::Excluded
            } else {
                SkipReason::NotInOnlyList
            });
        }

        self.targets
            .lookup(&keys)
            .map(|version| dependency.with_new_value(version))
            .ok_or(SkipReason::NoTarget)
    }
}
