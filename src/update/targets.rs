//! Requested target versions
//!
//! Targets come from two places:
//! - a TOML file with a `[versions]` table
//! - repeated `--set KEY=VERSION` arguments, which override the file
//!
//! A key names a dependency by `group:artifact`, by its cross-versioned
//! module name (`group:artifact_2.13`), or by the `val` holding its version.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from dependency key to requested version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionTargets {
    versions: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VersionsFile {
    #[serde(default)]
    versions: BTreeMap<String, String>,
}

impl VersionTargets {
    /// Create an empty set of targets
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one target
    pub fn insert(&mut self, key: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(key.into(), version.into());
    }

    /// Parse a `KEY=VERSION` argument
    pub fn parse_assignment(value: &str) -> Result<(String, String), ConfigError> {
        let (key, version) = value
            .split_once('=')
            .ok_or_else(|| ConfigError::invalid_target(value))?;
        let (key, version) = (key.trim(), version.trim());
        if key.is_empty() || version.is_empty() {
            return Err(ConfigError::invalid_target(value));
        }
        Ok((key.to_string(), version.to_string()))
    }

    /// Build targets from `KEY=VERSION` arguments
    pub fn from_assignments<S: AsRef<str>>(values: &[S]) -> Result<Self, ConfigError> {
        let mut targets = Self::new();
        for value in values {
            let (key, version) = Self::parse_assignment(value.as_ref())?;
            targets.insert(key, version);
        }
        Ok(targets)
    }

    /// Parse the contents of a versions file
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: VersionsFile = toml::from_str(content)
            .map_err(|e| ConfigError::versions_file_parse(path, e.to_string()))?;

        if let Some((key, _)) = file
            .versions
            .iter()
            .find(|(k, v)| k.trim().is_empty() || v.trim().is_empty())
        {
            return Err(ConfigError::versions_file_parse(
                path,
                format!("empty key or version for entry '{}'", key),
            ));
        }

        Ok(Self {
            versions: file.versions,
        })
    }

    /// Read a versions file from disk
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::VersionsFileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_toml_str(&content, path)
    }

    /// Merge `other` into `self`; entries in `other` win
    pub fn merge(mut self, other: VersionTargets) -> Self {
        self.versions.extend(other.versions);
        self
    }

    /// Find the target for the first key that has one
    pub fn lookup(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.versions.get(*key))
            .map(String::as_str)
    }

    /// Number of targets
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true if no targets were given
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
