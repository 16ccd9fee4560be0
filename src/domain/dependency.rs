//! Dependency declaration structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of sbt setting a declaration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Module coordinate (`libraryDependencies`, `dependencyOverrides`, plain vals)
    Library,
    /// `addSbtPlugin(...)`
    Plugin,
    /// `scalaVersion := ...`
    Scala,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Library => write!(f, "library"),
            DependencyKind::Plugin => write!(f, "plugin"),
            DependencyKind::Scala => write!(f, "scala"),
        }
    }
}

/// How the artifact name is suffixed at resolution time, after the
/// operator between group and artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossVersion {
    /// `%`: plain Java artifact
    #[default]
    Disabled,
    /// `%%`: Scala binary version suffix (`_2.13`)
    Binary,
    /// `%%%`: platform and Scala binary suffix (`_sjs1_2.13` for Scala.js)
    Platform,
}

impl CrossVersion {
    /// Parse the operator between group and artifact
    pub fn from_operator(op: &str) -> Option<Self> {
        match op {
            "%" => Some(CrossVersion::Disabled),
            "%%" => Some(CrossVersion::Binary),
            "%%%" => Some(CrossVersion::Platform),
            _ => None,
        }
    }

    /// The operator as written in sbt
    pub fn operator(&self) -> &'static str {
        match self {
            CrossVersion::Disabled => "%",
            CrossVersion::Binary => "%%",
            CrossVersion::Platform => "%%%",
        }
    }

    /// Returns true for `%%` and `%%%`
    pub fn is_cross_versioned(&self) -> bool {
        *self != CrossVersion::Disabled
    }
}

/// Scala.js platform suffix assumed for `%%%` artifacts
const SCALAJS_PLATFORM: &str = "sjs1";

/// One dependency declaration found in an sbt file
///
/// `current_value` is always a verbatim substring of the text it was
/// extracted from. `new_value` is filled in by the caller before patching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Organization, e.g. `org.typelevel`
    pub group_id: String,
    /// Artifact name as written, without any Scala binary suffix
    pub artifact_id: String,
    /// `group:artifact`
    pub dep_name: String,
    /// Operator used between group and artifact
    pub cross_version: CrossVersion,
    /// Configuration scope such as `test` or `provided`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Setting the declaration came from
    pub kind: DependencyKind,
    /// Version literal exactly as it appears in the file
    pub current_value: String,
    /// Version requested by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// Name of the `val` holding the version, if the version was referenced indirectly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    /// Line of the declaration (1-based)
    pub line_number: usize,
}

impl Dependency {
    /// Creates a new library dependency
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        current_value: impl Into<String>,
    ) -> Self {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        let dep_name = format!("{}:{}", group_id, artifact_id);
        Self {
            group_id,
            artifact_id,
            dep_name,
            cross_version: CrossVersion::Disabled,
            scope: None,
            kind: DependencyKind::Library,
            current_value: current_value.into(),
            new_value: None,
            variable_name: None,
            line_number: 0,
        }
    }

    /// Sets the cross-version operator (builder pattern)
    pub fn with_cross_version(mut self, cross_version: CrossVersion) -> Self {
        self.cross_version = cross_version;
        self
    }

    /// Sets the configuration scope (builder pattern)
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the declaration kind (builder pattern)
    pub fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the variable name for this dependency (builder pattern)
    pub fn with_variable(mut self, var_name: impl Into<String>) -> Self {
        self.variable_name = Some(var_name.into());
        self
    }

    /// Sets the source line (builder pattern)
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    /// Returns a copy with the requested version set
    pub fn with_new_value(&self, new_value: impl Into<String>) -> Self {
        let mut dep = self.clone();
        dep.new_value = Some(new_value.into());
        dep
    }

    /// Returns true if this is a test-scoped dependency
    pub fn is_test(&self) -> bool {
        matches!(self.scope.as_deref(), Some(s) if s.eq_ignore_ascii_case("test"))
    }

    /// Returns the published module name, applying the Scala binary suffix
    /// for cross-versioned artifacts when the Scala version is known.
    pub fn package_name(&self, scala_version: Option<&str>) -> String {
        let Some(binary) = scala_version.and_then(scala_binary_version) else {
            return self.dep_name.clone();
        };
        match self.cross_version {
            CrossVersion::Disabled => self.dep_name.clone(),
            CrossVersion::Binary => format!("{}:{}_{}", self.group_id, self.artifact_id, binary),
            CrossVersion::Platform => format!(
                "{}:{}_{}_{}",
                self.group_id, self.artifact_id, SCALAJS_PLATFORM, binary
            ),
        }
    }
}

/// Binary compatibility suffix for a Scala version: `2.13.12` → `2.13`, `3.3.1` → `3`
pub fn scala_binary_version(scala_version: &str) -> Option<String> {
    let mut parts = scala_version.split('.');
    let major = parts.next().filter(|m| !m.is_empty())?;
    if !major.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if major != "2" {
        return Some(major.to_string());
    }
    let minor = parts.next().filter(|m| m.chars().all(|c| c.is_ascii_digit()))?;
    if minor.is_empty() {
        return None;
    }
    Some(format!("{}.{}", major, minor))
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" {} \"{}\" % \"{}\"",
            self.group_id,
            self.cross_version.operator(),
            self.artifact_id,
            self.current_value
        )?;
        if let Some(scope) = &self.scope {
            write!(f, " % \"{}\"", scope)?;
        }
        Ok(())
    }
}
