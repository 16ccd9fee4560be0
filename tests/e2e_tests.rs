//! End-to-end tests for the sbtup CLI
//!
//! These tests verify:
//! - Dry-run mode leaves files unchanged
//! - CLI produces the expected JSON output schema
//! - Exit codes are correct for various scenarios

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BUILD_SBT: &str = r#"ThisBuild / scalaVersion := "2.13.12"

val catsVersion = "2.9.0"

libraryDependencies ++= Seq(
  "org.typelevel" %% "cats-core" % catsVersion,
  "com.typesafe" % "config" % "1.4.3",
  "org.scalatest" %% "scalatest" % "3.2.17" % Test
)
"#;

/// Create a test directory with a build.sbt
fn create_test_project(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("build.sbt");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

fn sbtup() -> Command {
    Command::cargo_bin("sbtup").unwrap()
}

#[test]
fn test_dry_run_leaves_file_unchanged() {
    let (_dir, path) = create_test_project(BUILD_SBT);

    sbtup()
        .arg(&path)
        .args(["--set", "com.typesafe:config=1.4.4", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.typesafe:config"))
        .stdout(predicate::str::contains("(dry-run)"));

    assert_eq!(fs::read_to_string(&path).unwrap(), BUILD_SBT);
}

#[test]
fn test_update_writes_file() {
    let (_dir, path) = create_test_project(BUILD_SBT);

    sbtup()
        .arg(&path)
        .args(["--set", "catsVersion=2.10.0", "--set", "com.typesafe:config=1.4.4"])
        .assert()
        .success();

    let expected = BUILD_SBT
        .replace("\"2.9.0\"", "\"2.10.0\"")
        .replace("\"1.4.3\"", "\"1.4.4\"");
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_json_output_schema() {
    let (_dir, path) = create_test_project(BUILD_SBT);

    let output = sbtup()
        .arg(&path)
        .args(["--set", "org.typelevel:cats-core_2.13=2.10.0", "--json", "-n"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["summary"]["updates"], 1);
    assert_eq!(json["summary"]["conflicts"], 0);

    let update = &json["manifests"][0]["updates"][0];
    assert_eq!(update["name"], "org.typelevel:cats-core");
    assert_eq!(update["module"], "org.typelevel:cats-core_2.13");
    assert_eq!(update["from"], "2.9.0");
    assert_eq!(update["to"], "2.10.0");
    assert_eq!(update["variable"], "catsVersion");
}

#[test]
fn test_diff_output() {
    let (_dir, path) = create_test_project(BUILD_SBT);

    sbtup()
        .arg(&path)
        .args(["--set", "com.typesafe:config=1.4.4", "--diff", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "-  \"com.typesafe\" % \"config\" % \"1.4.3\",",
        ))
        .stdout(predicate::str::contains(
            "+  \"com.typesafe\" % \"config\" % \"1.4.4\",",
        ));
}

#[test]
fn test_list_outputs_dependencies() {
    let (_dir, path) = create_test_project(BUILD_SBT);

    let output = sbtup().arg(&path).args(["--list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let deps = json[0]["deps"].as_array().unwrap();
    let names: Vec<&str> = deps
        .iter()
        .map(|d| d["dep_name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "org.scala-lang:scala-library",
            "org.typelevel:cats-core",
            "com.typesafe:config",
            "org.scalatest:scalatest"
        ]
    );
    assert_eq!(json[0]["scala_version"], "2.13.12");
}

#[test]
fn test_conflict_exits_with_code_2() {
    let content = BUILD_SBT.replace("\"1.4.3\"", "\"3.2.17\"");
    let (_dir, path) = create_test_project(&content);

    sbtup()
        .arg(&path)
        .args(["--set", "com.typesafe:config=1.4.4"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("appears more than once"));

    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_missing_file_exits_with_code_2() {
    let dir = tempfile::tempdir().unwrap();

    sbtup()
        .arg(dir.path().join("missing.sbt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse"))
        .stderr(predicate::str::contains("missing.sbt"));
}

#[test]
fn test_no_targets_warns_and_changes_nothing() {
    let (_dir, path) = create_test_project(BUILD_SBT);

    sbtup()
        .arg(&path)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("no version targets given"));

    assert_eq!(fs::read_to_string(&path).unwrap(), BUILD_SBT);
}

#[test]
fn test_list_does_not_warn_about_targets() {
    let (_dir, path) = create_test_project(BUILD_SBT);

    sbtup()
        .arg(&path)
        .arg("--list")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("no version targets").not());
}

#[test]
fn test_invalid_target_fails() {
    let (_dir, path) = create_test_project(BUILD_SBT);

    sbtup()
        .arg(&path)
        .args(["--set", "com.typesafe:config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_conflicting_flags_fail() {
    sbtup()
        .args(["--json", "--diff"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--json and --diff"));
}

#[test]
fn test_version_flag() {
    sbtup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sbtup"));
}
