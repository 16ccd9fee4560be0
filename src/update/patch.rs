//! Version token patcher
//!
//! Rewrites the version of one extracted dependency in the text it came from.
//! The edit is a plain substring substitution of `current_value` by
//! `new_value`, performed only when `current_value` occurs exactly once.
//! Anything else is refused:
//! - no occurrence: the text changed since extraction (stale snapshot)
//! - several occurrences: there is no way to tell which one belongs to the
//!   dependency (ambiguous match)
//!
//! When several dependencies of one file are updated, each call must receive
//! the output of the previous one.

use crate::domain::Dependency;
use crate::error::PatchError;
use std::borrow::Cow;

/// Where a version string sits in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionMatch {
    /// Exactly one occurrence, starting at this byte offset
    Unique(usize),
    /// Not present
    Missing,
    /// Present more than once (overlapping occurrences count)
    Ambiguous,
}

/// Decision taken by the patcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome<'a> {
    /// Requested version equals the current one; the input text, untouched
    Unchanged(&'a str),
    /// The single occurrence was replaced
    Patched(String),
    /// `current_value` is no longer in the text
    Stale,
    /// `current_value` occurs more than once
    Ambiguous,
}

impl<'a> PatchOutcome<'a> {
    /// Returns the resulting text, or `None` on a conflict
    pub fn into_content(self) -> Option<Cow<'a, str>> {
        match self {
            PatchOutcome::Unchanged(content) => Some(Cow::Borrowed(content)),
            PatchOutcome::Patched(content) => Some(Cow::Owned(content)),
            PatchOutcome::Stale | PatchOutcome::Ambiguous => None,
        }
    }

    /// Returns true for stale and ambiguous outcomes
    pub fn is_conflict(&self) -> bool {
        matches!(self, PatchOutcome::Stale | PatchOutcome::Ambiguous)
    }
}

/// Find `value` in `content`
pub fn locate_version(content: &str, value: &str) -> VersionMatch {
    let Some(first) = content.find(value) else {
        return VersionMatch::Missing;
    };
    // A second occurrence may overlap the first ("1.1" in "1.1.1"),
    // so search again from the next char boundary rather than past the match.
    let next = first + content[first..].chars().next().map_or(1, char::len_utf8);
    if content[next..].contains(value) {
        VersionMatch::Ambiguous
    } else {
        VersionMatch::Unique(first)
    }
}

/// Decide how to apply `dependency.new_value` to `content`.
///
/// Errors are reserved for malformed requests; version conflicts are
/// reported through [`PatchOutcome`].
pub fn patch_dependency<'a>(
    content: &'a str,
    dependency: &Dependency,
) -> Result<PatchOutcome<'a>, PatchError> {
    let current = dependency.current_value.as_str();
    let new_value = dependency
        .new_value
        .as_deref()
        .ok_or_else(|| PatchError::MissingNewValue {
            dep_name: dependency.dep_name.clone(),
        })?;

    if current.is_empty() {
        return Err(PatchError::EmptyCurrentValue {
            dep_name: dependency.dep_name.clone(),
        });
    }
    if new_value.is_empty() {
        return Err(PatchError::EmptyNewValue {
            dep_name: dependency.dep_name.clone(),
        });
    }

    if new_value == current {
        return Ok(PatchOutcome::Unchanged(content));
    }

    let outcome = match locate_version(content, current) {
        VersionMatch::Unique(offset) => {
            let mut patched =
                String::with_capacity(content.len() - current.len() + new_value.len());
            patched.push_str(&content[..offset]);
            patched.push_str(new_value);
            patched.push_str(&content[offset + current.len()..]);
            PatchOutcome::Patched(patched)
        }
        VersionMatch::Missing => PatchOutcome::Stale,
        VersionMatch::Ambiguous => PatchOutcome::Ambiguous,
    };

    match &outcome {
        PatchOutcome::Patched(_) => tracing::debug!(
            dep = %dependency.dep_name,
            from = current,
            to = new_value,
            "patched version"
        ),
        PatchOutcome::Stale => tracing::debug!(
            dep = %dependency.dep_name,
            current,
            "current version not found, refusing to patch"
        ),
        PatchOutcome::Ambiguous => tracing::debug!(
            dep = %dependency.dep_name,
            current,
            "current version occurs more than once, refusing to patch"
        ),
        PatchOutcome::Unchanged(_) => {}
    }

    Ok(outcome)
}

/// Apply `dependency.new_value` to `content`.
///
/// Returns `Ok(None)` when the edit cannot be made safely (stale or
/// ambiguous version text); the caller must not write anything in that case.
/// When the version is unchanged the input is returned borrowed, byte for byte.
pub fn update_dependency<'a>(
    content: &'a str,
    dependency: &Dependency,
) -> Result<Option<Cow<'a, str>>, PatchError> {
    Ok(patch_dependency(content, dependency)?.into_content())
}
