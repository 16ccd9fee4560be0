//! sbt file extraction and writing
//!
//! This module provides functionality to:
//! - Extract dependency declarations from sbt build definitions
//! - Apply version patches to a file and write it back

mod sbt;
mod writer;

pub use sbt::{extract_package_file, PackageFile};
pub use writer::{apply_to_content, read_manifest, write_manifest, ManifestWriter};

use crate::error::ManifestError;
use std::path::Path;

/// Extract dependencies from an sbt file on disk
pub fn parse_manifest(path: &Path) -> Result<PackageFile, ManifestError> {
    let content = read_manifest(path)?;
    Ok(extract_package_file(&content))
}
