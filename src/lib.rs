//! sbtup - dependency version patcher for sbt build definitions
//!
//! This library provides:
//! - Extraction of dependency declarations from `build.sbt` and
//!   `project/*.sbt` text
//! - A patcher that rewrites exactly one version token and refuses
//!   when the text no longer matches what was extracted

pub mod cli;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod update;

pub use domain::Dependency;
pub use manifest::{extract_package_file, PackageFile};
pub use update::update_dependency;
