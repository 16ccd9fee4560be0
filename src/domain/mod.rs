//! Core domain models for sbtup
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency declarations extracted from sbt files
//! - Per-dependency update outcomes
//! - Summary and result structures

mod dependency;
mod summary;
mod update_result;

pub use dependency::{scala_binary_version, CrossVersion, Dependency, DependencyKind};
pub use summary::{ManifestUpdateResult, UpdateSummary};
pub use update_result::{SkipReason, UpdateResult};
