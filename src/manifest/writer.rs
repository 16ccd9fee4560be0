//! Manifest file writing and update operations
//!
//! This module provides:
//! - Sequential application of version patches to one file's text
//! - Dry-run mode support (no actual file modifications)
//! - Conflict reporting instead of partial or guessed edits

use crate::domain::{ManifestUpdateResult, SkipReason, UpdateResult};
use crate::error::ManifestError;
use crate::manifest::sbt::extract_package_file;
use crate::update::{patch_dependency, PatchOutcome, UpdateJudge};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Writer for sbt files that applies version updates
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a ManifestWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Read a file, apply every judged update and write it back if it changed
    pub fn apply_updates(
        &self,
        path: &Path,
        judge: &UpdateJudge,
    ) -> Result<ManifestUpdateResult, ManifestError> {
        let content = read_manifest(path)?;
        let (updated, results) = apply_to_content(&content, judge);

        let mut manifest = ManifestUpdateResult::new(path);
        for result in results {
            manifest.add_result(result);
        }

        if updated != content && !self.dry_run {
            write_manifest(path, &updated)?;
            tracing::info!(path = %path.display(), updates = manifest.update_count(), "wrote manifest");
        }

        manifest.original = content;
        manifest.updated = updated;
        Ok(manifest)
    }
}

/// Apply every judged update to `content`, one after another.
///
/// Each patch operates on the text produced by the previous one. Returns the
/// final text and one result per extracted dependency, in source order.
pub fn apply_to_content(content: &str, judge: &UpdateJudge) -> (String, Vec<UpdateResult>) {
    let package_file = extract_package_file(content);
    let scala_version = package_file.scala_version.as_deref();

    let mut current = content.to_string();
    let mut results = Vec::with_capacity(package_file.deps.len());
    // Versions already written to shared `val`s during this run
    let mut written_variables: HashMap<String, String> = HashMap::new();

    for dependency in &package_file.deps {
        let mut upgrade = match judge.judge(dependency, scala_version) {
            Ok(upgrade) => upgrade,
            Err(reason) => {
                results.push(UpdateResult::skip(dependency.clone(), reason));
                continue;
            }
        };

        // A shared val already set to this target reads as unchanged; set to
        // anything else it stays stale for this descriptor.
        if let Some(written) = upgrade
            .variable_name
            .as_ref()
            .and_then(|var| written_variables.get(var))
        {
            if upgrade.new_value.as_ref() == Some(written) {
                upgrade.current_value = written.clone();
            }
        }

        let outcome = match patch_dependency(&current, &upgrade) {
            Ok(outcome) => outcome,
            Err(e) => {
                results.push(UpdateResult::skip(
                    dependency.clone(),
                    SkipReason::Invalid(e.to_string()),
                ));
                continue;
            }
        };

        let result = match outcome {
            PatchOutcome::Unchanged(_) => {
                UpdateResult::skip(dependency.clone(), SkipReason::AlreadyAtTarget)
            }
            PatchOutcome::Patched(patched) => {
                current = patched;
                let new_version = upgrade.new_value.clone().unwrap_or_default();
                if let Some(var) = &upgrade.variable_name {
                    written_variables.insert(var.clone(), new_version.clone());
                }
                UpdateResult::update(dependency.clone(), new_version)
            }
            PatchOutcome::Stale => {
                tracing::info!(dep = %dependency.dep_name, "skipping: version changed since extraction");
                UpdateResult::skip(dependency.clone(), SkipReason::StaleSnapshot)
            }
            PatchOutcome::Ambiguous => {
                tracing::info!(dep = %dependency.dep_name, "skipping: version is not unique in file");
                UpdateResult::skip(dependency.clone(), SkipReason::AmbiguousMatch)
            }
        };
        results.push(result);
    }

    (current, results)
}

/// Read a manifest file content safely
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::not_found(path));
    }
    fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::{UpdateFilter, VersionTargets};
    use tempfile::TempDir;

    const BUILD_SBT: &str = r#"scalaVersion := "2.13.12"

val akkaVersion = "2.6.20"

libraryDependencies ++= Seq(
  "com.typesafe.akka" %% "akka-actor" % akkaVersion,
  "com.typesafe.akka" %% "akka-stream" % akkaVersion,
  "org.typelevel" %% "cats-core" % "2.9.0",
  "org.scalatest" %% "scalatest" % "3.2.17" % Test
)
"#;

    fn judge(values: &[&str]) -> UpdateJudge {
        UpdateJudge::new(
            UpdateFilter::new(),
            VersionTargets::from_assignments(values).unwrap(),
        )
    }

    fn create_build_sbt(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("build.sbt");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_manifest_writer_new() {
        assert!(!ManifestWriter::new(false).is_dry_run());
        assert!(ManifestWriter::new(true).is_dry_run());
        assert!(ManifestWriter::dry_run().is_dry_run());
    }

    #[test]
    fn test_apply_to_content_single_update() {
        let (updated, results) =
            apply_to_content(BUILD_SBT, &judge(&["org.typelevel:cats-core=2.10.0"]));
        assert_eq!(updated, BUILD_SBT.replace("2.9.0", "2.10.0"));
        assert_eq!(results.len(), 5);
        assert_eq!(results.iter().filter(|r| r.is_update()).count(), 1);
        assert!(results
            .iter()
            .filter(|r| r.is_skip())
            .all(|r| matches!(r, UpdateResult::Skip { reason: SkipReason::NoTarget, .. })));
    }

    #[test]
    fn test_apply_to_content_shared_variable() {
        let (updated, results) = apply_to_content(BUILD_SBT, &judge(&["akkaVersion=2.6.21"]));
        assert_eq!(updated, BUILD_SBT.replace("2.6.20", "2.6.21"));

        let actor = &results[1];
        let stream = &results[2];
        assert!(actor.is_update());
        assert_eq!(
            stream,
            &UpdateResult::skip(stream.dependency().clone(), SkipReason::AlreadyAtTarget)
        );
    }

    #[test]
    fn test_apply_to_content_shared_variable_with_different_targets() {
        let (updated, results) = apply_to_content(
            BUILD_SBT,
            &judge(&[
                "com.typesafe.akka:akka-actor=2.6.21",
                "com.typesafe.akka:akka-stream=2.6.19",
            ]),
        );
        assert_eq!(updated, BUILD_SBT.replace("2.6.20", "2.6.21"));
        assert!(results[1].is_update());
        assert_eq!(
            results[2],
            UpdateResult::skip(results[2].dependency().clone(), SkipReason::StaleSnapshot)
        );
    }

    #[test]
    fn test_apply_to_content_already_at_target() {
        let (updated, results) =
            apply_to_content(BUILD_SBT, &judge(&["org.typelevel:cats-core=2.9.0"]));
        assert_eq!(updated, BUILD_SBT);
        assert!(results.iter().any(|r| matches!(
            r,
            UpdateResult::Skip { reason: SkipReason::AlreadyAtTarget, .. }
        )));
    }

    #[test]
    fn test_apply_to_content_ambiguous() {
        let content = r#"libraryDependencies += "org.example" % "foo" % "1.0.0"
libraryDependencies += "org.example" % "bar" % "1.0.0"
"#;
        let (updated, results) = apply_to_content(content, &judge(&["org.example:foo=1.1.0"]));
        assert_eq!(updated, content);
        assert_eq!(
            results[0],
            UpdateResult::skip(results[0].dependency().clone(), SkipReason::AmbiguousMatch)
        );
        assert!(results[0].is_conflict());
    }

    #[test]
    fn test_apply_to_content_stale_after_earlier_patch() {
        // foo's new version equals bar's current one, so bar's literal is no longer unique
        let content = r#"libraryDependencies += "org.example" % "foo" % "1.0.0"
libraryDependencies += "org.example" % "bar" % "1.1.0"
"#;
        let (updated, results) = apply_to_content(
            content,
            &judge(&["org.example:foo=1.1.0", "org.example:bar=1.2.0"]),
        );
        assert_eq!(updated, content.replace("1.0.0", "1.1.0"));
        assert!(results[0].is_update());
        assert!(results[1].is_conflict());
    }

    #[test]
    fn test_apply_updates_dry_run() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_build_sbt(&temp_dir, BUILD_SBT);

        let writer = ManifestWriter::dry_run();
        let result = writer
            .apply_updates(&path, &judge(&["org.typelevel:cats-core=2.10.0"]))
            .unwrap();

        assert_eq!(result.update_count(), 1);
        assert!(result.modified);
        assert_eq!(result.original, BUILD_SBT);
        assert!(result.updated.contains("2.10.0"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, BUILD_SBT);
    }

    #[test]
    fn test_apply_updates_actual_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_build_sbt(&temp_dir, BUILD_SBT);

        let writer = ManifestWriter::new(false);
        writer
            .apply_updates(&path, &judge(&["org.scalatest:scalatest=3.2.18"]))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, BUILD_SBT.replace("3.2.17", "3.2.18"));
    }

    #[test]
    fn test_apply_updates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("build.sbt");
        let err = ManifestWriter::new(false)
            .apply_updates(&path, &judge(&[]))
            .unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_read_write_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plugins.sbt");
        write_manifest(&path, "addSbtPlugin(\"a\" % \"b\" % \"1.0\")\n").unwrap();
        assert_eq!(
            read_manifest(&path).unwrap(),
            "addSbtPlugin(\"a\" % \"b\" % \"1.0\")\n"
        );
    }
}
