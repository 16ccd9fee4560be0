//! Error types using thiserror
//!
//! - PatchError: invalid input handed to the patcher (caller bugs, not conflicts)
//! - ManifestError: reading or writing sbt files, reported per file
//! - ConfigError: bad version targets or CLI options, fatal for the run
//!
//! Version conflicts (stale or ambiguous version text) are not errors. The
//! patcher reports them through its return value.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid input to the patcher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// No target version was set on the dependency
    #[error("no new version requested for '{dep_name}'")]
    MissingNewValue { dep_name: String },

    /// The dependency carries an empty current version
    #[error("dependency '{dep_name}' has an empty current version")]
    EmptyCurrentValue { dep_name: String },

    /// The requested version is empty
    #[error("empty new version requested for '{dep_name}'")]
    EmptyNewValue { dep_name: String },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `--set` value is not of the form KEY=VERSION
    #[error("invalid version target '{value}': expected KEY=VERSION")]
    InvalidTarget { value: String },

    /// Failed to read the versions file
    #[error("failed to read versions file {path}: {source}")]
    VersionsFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Versions file is not valid TOML or has the wrong shape
    #[error("failed to parse versions file {path}: {message}")]
    VersionsFileParse { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl ManifestError {
    /// Returns true when the file could not be read, as opposed to written
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            ManifestError::NotFound { .. } | ManifestError::ReadError { .. }
        )
    }

    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidTarget error
    pub fn invalid_target(value: impl Into<String>) -> Self {
        ConfigError::InvalidTarget {
            value: value.into(),
        }
    }

    /// Creates a new VersionsFileParse error
    pub fn versions_file_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::VersionsFileParse {
            path: path.into(),
            message: message.into(),
        }
    }
}
