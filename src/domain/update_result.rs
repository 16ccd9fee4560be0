//! Per-dependency update outcomes

use super::Dependency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why a dependency was left untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No target version was supplied for this dependency
    NoTarget,
    /// The file already declares the requested version
    AlreadyAtTarget,
    /// Package was excluded via --exclude
    Excluded,
    /// Package not in --only list
    NotInOnlyList,
    /// The extracted version no longer appears in the text
    StaleSnapshot,
    /// The extracted version appears more than once in the text
    AmbiguousMatch,
    /// The patcher rejected the request
    Invalid(String),
}

impl SkipReason {
    /// Returns true for the version conflict outcomes of the patcher
    pub fn is_conflict(&self) -> bool {
        matches!(self, SkipReason::StaleSnapshot | SkipReason::AmbiguousMatch)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoTarget => write!(f, "no target version"),
            SkipReason::AlreadyAtTarget => write!(f, "already at target"),
            SkipReason::Excluded => write!(f, "excluded by --exclude"),
            SkipReason::NotInOnlyList => write!(f, "not in --only list"),
            SkipReason::StaleSnapshot => write!(f, "version conflict: current version not found"),
            SkipReason::AmbiguousMatch => {
                write!(f, "version conflict: current version appears more than once")
            }
            SkipReason::Invalid(msg) => write!(f, "invalid: {}", msg),
        }
    }
}

/// Result of an update attempt for a single dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateResult {
    /// The version token was rewritten
    Update {
        /// The dependency as extracted
        dependency: Dependency,
        /// The version written in its place
        new_version: String,
    },
    /// The dependency was not rewritten
    Skip {
        /// The dependency as extracted
        dependency: Dependency,
        /// The reason for skipping
        reason: SkipReason,
    },
}

impl UpdateResult {
    /// Creates an Update result
    pub fn update(dependency: Dependency, new_version: impl Into<String>) -> Self {
        UpdateResult::Update {
            dependency,
            new_version: new_version.into(),
        }
    }

    /// Creates a Skip result
    pub fn skip(dependency: Dependency, reason: SkipReason) -> Self {
        UpdateResult::Skip { dependency, reason }
    }

    /// Returns true if this is an update result
    pub fn is_update(&self) -> bool {
        matches!(self, UpdateResult::Update { .. })
    }

    /// Returns true if this is a skip result
    pub fn is_skip(&self) -> bool {
        matches!(self, UpdateResult::Skip { .. })
    }

    /// Returns true if the patcher refused because of a version conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, UpdateResult::Skip { reason, .. } if reason.is_conflict())
    }

    /// Returns the dependency reference
    pub fn dependency(&self) -> &Dependency {
        match self {
            UpdateResult::Update { dependency, .. } => dependency,
            UpdateResult::Skip { dependency, .. } => dependency,
        }
    }

    /// Returns the `group:artifact` name
    pub fn dep_name(&self) -> &str {
        &self.dependency().dep_name
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateResult::Update {
                dependency,
                new_version,
            } => {
                write!(
                    f,
                    "{}: {} → {}",
                    dependency.dep_name, dependency.current_value, new_version
                )
            }
            UpdateResult::Skip { dependency, reason } => {
                write!(f, "{}: skipped ({})", dependency.dep_name, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CrossVersion;

    fn sample_dependency() -> Dependency {
        Dependency::new("org.typelevel", "cats-core", "2.9.0")
            .with_cross_version(CrossVersion::Binary)
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(format!("{}", SkipReason::NoTarget), "no target version");
        assert_eq!(
            format!("{}", SkipReason::AlreadyAtTarget),
            "already at target"
        );
        assert_eq!(format!("{}", SkipReason::Excluded), "excluded by --exclude");
        assert_eq!(
            format!("{}", SkipReason::StaleSnapshot),
            "version conflict: current version not found"
        );
        assert_eq!(
            format!("{}", SkipReason::Invalid("empty".to_string())),
            "invalid: empty"
        );
    }

    #[test]
    fn test_skip_reason_is_conflict() {
        assert!(SkipReason::StaleSnapshot.is_conflict());
        assert!(SkipReason::AmbiguousMatch.is_conflict());
        assert!(!SkipReason::AlreadyAtTarget.is_conflict());
        assert!(!SkipReason::NoTarget.is_conflict());
    }

    #[test]
    fn test_update_result_update() {
        let dep = sample_dependency();
        let result = UpdateResult::update(dep.clone(), "2.10.0");

        assert!(result.is_update());
        assert!(!result.is_skip());
        assert!(!result.is_conflict());
        assert_eq!(result.dep_name(), "org.typelevel:cats-core");
        assert_eq!(result.dependency(), &dep);
    }

    #[test]
    fn test_update_result_conflict() {
        let result = UpdateResult::skip(sample_dependency(), SkipReason::AmbiguousMatch);
        assert!(result.is_skip());
        assert!(result.is_conflict());
    }

    #[test]
    fn test_update_result_display() {
        let dep = sample_dependency();
        let result = UpdateResult::update(dep.clone(), "2.10.0");
        assert_eq!(
            format!("{}", result),
            "org.typelevel:cats-core: 2.9.0 → 2.10.0"
        );

        let result = UpdateResult::skip(dep, SkipReason::NoTarget);
        assert_eq!(
            format!("{}", result),
            "org.typelevel:cats-core: skipped (no target version)"
        );
    }

    #[test]
    fn test_serde_update_result() {
        let result = UpdateResult::update(sample_dependency(), "2.10.0");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"type\":\"update\""));
        let parsed: UpdateResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);

        let skip = UpdateResult::skip(sample_dependency(), SkipReason::StaleSnapshot);
        let json = serde_json::to_string(&skip).unwrap();
        assert!(json.contains("\"stale_snapshot\""));
    }
}
