//! sbt build definition extractor
//!
//! Handles:
//! - Module coordinates: `"group" % "artifact" % "version"`, with `%%` / `%%%`
//!   cross-version operators and an optional `% "test"` / `% Test` scope
//! - Multi-line `libraryDependencies ++= Seq(...)` blocks (coordinates are
//!   recognized on whatever line they sit)
//! - Versions held in `val` / `lazy val` / `var` definitions
//! - `addSbtPlugin(...)` in `project/plugins.sbt`
//! - `scalaVersion := "..."` (including `ThisBuild / scalaVersion`)
//! - `resolvers += "name" at "url"`
//!
//! Extraction is best effort and never fails: anything that does not look
//! like a declaration is skipped. Every extracted `current_value` is copied
//! verbatim from the text.

use crate::domain::{scala_binary_version, CrossVersion, Dependency, DependencyKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Everything extracted from one sbt file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFile {
    /// Declarations in source order
    pub deps: Vec<Dependency>,
    /// Scala version declared by `scalaVersion`, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scala_version: Option<String>,
    /// Repository URLs from `resolvers`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub registry_urls: Vec<String>,
}

impl PackageFile {
    /// Returns true if nothing was recognized
    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}

// val akkaVersion = "2.6.20"  /  lazy val circe: String = "0.14.6"
static VAL_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:lazy\s+)?(?:val|var)\s+(\w+)\s*(?::\s*String\s*)?=\s*"([^"\s]+)"\s*;?\s*$"#)
        .unwrap()
});

// scalaVersion := "2.13.12"  /  ThisBuild / scalaVersion := scala213
static SCALA_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?:ThisBuild\s*/\s*)?scalaVersion(?:\s+in\s+ThisBuild)?\s*:=\s*(?:"([^"\s]+)"|([A-Za-z_]\w*))"#,
    )
    .unwrap()
});

// "group" %% "artifact" % "version" % "test"
static COORDINATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""([^"\s]+)"\s*(%{1,3})\s*"([^"\s]+)"\s*%\s*(?:"([^"\s]+)"|([A-Za-z_]\w*))(?:\s*%\s*(?:"([^"\s]+)"|([A-Za-z]\w*)))?"#,
    )
    .unwrap()
});

static SBT_PLUGIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"addSbtPlugin\s*\(").unwrap());

// "Sonatype OSS" at "https://oss.sonatype.org/content/repositories/releases"
static RESOLVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"\s+at\s+"([^"]+)""#).unwrap());

const SCALA_ORGANIZATION: &str = "org.scala-lang";

/// Extract all dependency declarations from sbt file content
pub fn extract_package_file(content: &str) -> PackageFile {
    let lines = code_lines(content);
    let variables = extract_variables(&lines);

    let mut package_file = PackageFile::default();

    for (line_number, line) in &lines {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(dep) = parse_scala_version(line, &variables) {
            if package_file.scala_version.is_none() {
                package_file.scala_version = Some(dep.current_value.clone());
            }
            package_file.deps.push(dep.at_line(*line_number));
            continue;
        }

        let kind = if SBT_PLUGIN.is_match(line) {
            DependencyKind::Plugin
        } else {
            DependencyKind::Library
        };

        for caps in COORDINATE.captures_iter(line) {
            if let Some(dep) = parse_coordinate(&caps, &variables, kind) {
                package_file.deps.push(dep.at_line(*line_number));
            }
        }

        for caps in RESOLVER.captures_iter(line) {
            let url = caps[1].to_string();
            if !package_file.registry_urls.contains(&url) {
                package_file.registry_urls.push(url);
            }
        }
    }

    tracing::debug!(
        deps = package_file.deps.len(),
        scala_version = package_file.scala_version.as_deref(),
        "extracted sbt dependencies"
    );

    package_file
}

/// Collect `val name = "literal"` definitions (first definition wins)
fn extract_variables(lines: &[(usize, String)]) -> HashMap<String, String> {
    let mut variables = HashMap::new();
    for (_, line) in lines {
        if let Some(caps) = VAL_DEF.captures(line) {
            variables
                .entry(caps[1].to_string())
                .or_insert_with(|| caps[2].to_string());
        }
    }
    variables
}

fn parse_scala_version(line: &str, variables: &HashMap<String, String>) -> Option<Dependency> {
    let caps = SCALA_VERSION.captures(line)?;
    let (version, variable_name) = resolve_version(caps.get(1), caps.get(2), variables)?;

    let binary = scala_binary_version(&version);
    let dep = if binary.as_deref() == Some("3") {
        Dependency::new(SCALA_ORGANIZATION, "scala3-library", version)
            .with_cross_version(CrossVersion::Binary)
    } else {
        Dependency::new(SCALA_ORGANIZATION, "scala-library", version)
    };
    let dep = dep.with_kind(DependencyKind::Scala);

    Some(match variable_name {
        Some(name) => dep.with_variable(name),
        None => dep,
    })
}

fn parse_coordinate(
    caps: &regex::Captures<'_>,
    variables: &HashMap<String, String>,
    kind: DependencyKind,
) -> Option<Dependency> {
    let group = caps.get(1)?.as_str();
    let cross_version = CrossVersion::from_operator(caps.get(2)?.as_str())?;
    let artifact = caps.get(3)?.as_str();
    let (version, variable_name) = resolve_version(caps.get(4), caps.get(5), variables)?;

    let mut dep = Dependency::new(group, artifact, version)
        .with_cross_version(cross_version)
        .with_kind(kind);

    if let Some(scope) = caps.get(6).or_else(|| caps.get(7)) {
        dep = dep.with_scope(scope.as_str());
    }
    if let Some(name) = variable_name {
        dep = dep.with_variable(name);
    }

    Some(dep)
}

/// Resolve a version given either as a literal or as a `val` reference.
///
/// Returns `None` for references to names not defined in the file.
fn resolve_version(
    literal: Option<regex::Match<'_>>,
    identifier: Option<regex::Match<'_>>,
    variables: &HashMap<String, String>,
) -> Option<(String, Option<String>)> {
    if let Some(literal) = literal {
        return Some((literal.as_str().to_string(), None));
    }

    let name = identifier?.as_str();
    let value = variables.get(name)?;
    Some((value.clone(), Some(name.to_string())))
}

/// Split content into lines with comments blanked out, keeping 1-based line numbers.
///
/// String literals are preserved so URLs and versions containing `//` survive.
fn code_lines(content: &str) -> Vec<(usize, String)> {
    let mut in_block = false;
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, strip_comments(line, &mut in_block)))
        .collect()
}

fn strip_comments(line: &str, in_block: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if *in_block {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block = false;
                out.push(' ');
            }
            continue;
        }

        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('\'', _) => {
                out.push(c);
                // Copy a char literal ('"', '/', '\n') whole so its content
                // cannot open a string or a comment.
                let len = char_literal_len(chars.clone());
                out.extend(chars.by_ref().take(len));
            }
            ('/', Some('/')) => break,
            ('/', Some('*')) => {
                chars.next();
                *in_block = true;
            }
            _ => out.push(c),
        }
    }

    out
}

/// Length of the rest of a char literal after its opening quote, closing
/// quote included, or 0 when the quote does not start one (Scala symbols).
fn char_literal_len(mut rest: impl Iterator<Item = char>) -> usize {
    match rest.next() {
        Some('\\') => {
            // '\n', '\'', '\u0041'
            let mut len = 1;
            for c in rest.take(6) {
                len += 1;
                if c == '\'' && len > 2 {
                    return len;
                }
            }
            0
        }
        Some('\'') | None => 0,
        Some(_) => match rest.next() {
            Some('\'') => 2,
            _ => 0,
        },
    }
}
