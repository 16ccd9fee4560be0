//! CLI argument parsing module for sbtup

use crate::error::ConfigError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Safe dependency version patcher for sbt build definitions
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sbtup",
    version,
    about = "Update dependency versions in sbt build files without touching anything else"
)]
pub struct CliArgs {
    /// sbt files to process
    #[arg(default_value = "build.sbt")]
    pub files: Vec<PathBuf>,

    // Version targets
    /// Requested version as KEY=VERSION; KEY is group:artifact, the
    /// cross-versioned module name, or a version val (repeatable)
    #[arg(long = "set", value_name = "KEY=VERSION", action = ArgAction::Append)]
    pub set: Vec<String>,

    /// TOML file with a [versions] table of KEY = "VERSION" entries
    #[arg(long, value_name = "FILE")]
    pub versions: Option<PathBuf>,

    // Package filters
    /// Exclude specific packages from update (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Update only specific packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    // General options
    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// List extracted dependencies instead of updating
    #[arg(long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,
}

impl CliArgs {
    /// Reject option combinations that make no sense together
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet && self.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }
        if self.json && self.diff {
            return Err(ConfigError::ConflictingOptions {
                message: "--json and --diff cannot be used together".to_string(),
            });
        }
        if self.list && self.diff {
            return Err(ConfigError::ConflictingOptions {
                message: "--list does not produce a diff".to_string(),
            });
        }
        Ok(())
    }

    /// Check if any version target source was given
    pub fn has_targets(&self) -> bool {
        !self.set.is_empty() || self.versions.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["sbtup"]);
        assert_eq!(args.files, vec![PathBuf::from("build.sbt")]);
        assert!(args.set.is_empty());
        assert!(args.versions.is_none());
        assert!(args.exclude.is_empty());
        assert!(args.only.is_empty());
        assert!(!args.dry_run);
        assert!(!args.list);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.json);
        assert!(!args.diff);
        assert!(!args.has_targets());
    }

    #[test]
    fn test_multiple_files() {
        let args = CliArgs::parse_from(["sbtup", "build.sbt", "project/plugins.sbt"]);
        assert_eq!(
            args.files,
            vec![
                PathBuf::from("build.sbt"),
                PathBuf::from("project/plugins.sbt")
            ]
        );
    }

    #[test]
    fn test_set_multiple() {
        let args = CliArgs::parse_from([
            "sbtup",
            "--set",
            "org.typelevel:cats-core=2.10.0",
            "--set",
            "akkaVersion=2.6.21",
        ]);
        assert_eq!(args.set, vec!["org.typelevel:cats-core=2.10.0", "akkaVersion=2.6.21"]);
        assert!(args.has_targets());
    }

    #[test]
    fn test_versions_file() {
        let args = CliArgs::parse_from(["sbtup", "--versions", "versions.toml"]);
        assert_eq!(args.versions, Some(PathBuf::from("versions.toml")));
        assert!(args.has_targets());
    }

    #[test]
    fn test_dry_run_short_flag() {
        let args = CliArgs::parse_from(["sbtup", "-n"]);
        assert!(args.dry_run);
    }

    #[test]
    fn test_filters() {
        let args = CliArgs::parse_from(["sbtup", "--only", "a:b", "--exclude", "c:d"]);
        assert_eq!(args.only, vec!["a:b"]);
        assert_eq!(args.exclude, vec!["c:d"]);
    }

    #[test]
    fn test_validate_ok() {
        let args = CliArgs::parse_from(["sbtup", "--json", "--verbose"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_quiet_verbose() {
        let args = CliArgs::parse_from(["sbtup", "-q", "--verbose"]);
        let err = args.validate().unwrap_err();
        assert!(format!("{}", err).contains("--quiet and --verbose"));
    }

    #[test]
    fn test_validate_json_diff() {
        let args = CliArgs::parse_from(["sbtup", "--json", "--diff"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_list_diff() {
        let args = CliArgs::parse_from(["sbtup", "--list", "--diff"]);
        assert!(args.validate().is_err());
    }
}
