#![deny(missing_docs)]

//! # Descriptor Discovery
//!
//! Resolves command paths to `WEB-INF/web.xml` files.

use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File name of a deployment descriptor.
pub const DESCRIPTOR_FILE: &str = "web.xml";

/// Directory that holds the descriptor inside an application.
pub const DESCRIPTOR_DIR: &str = "WEB-INF";

/// Every `WEB-INF/web.xml` below `root`, sorted by path.
pub fn find_descriptors(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == DESCRIPTOR_FILE)
        .filter(|e| {
            e.path()
                .parent()
                .and_then(Path::file_name)
                .is_some_and(|dir| dir == DESCRIPTOR_DIR)
        })
        .map(|e| e.into_path())
        .collect();
    found.sort();
    debug!(root = ?root, count = found.len(), "descriptors discovered");
    found
}

/// Resolves `path` to descriptor files: the file itself, or every descriptor under a directory.
pub fn resolve(path: &Path) -> CliResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(CliError::General(format!(
            "Descriptor not found: {:?}",
            path
        )));
    }

    let found = find_descriptors(path);
    if found.is_empty() {
        return Err(CliError::General(format!(
            "No {}/{} found under {:?}",
            DESCRIPTOR_DIR, DESCRIPTOR_FILE, path
        )));
    }
    Ok(found)
}
