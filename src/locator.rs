//! Input file discovery.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension carried by every song and log data file.
pub const DATA_FILE_EXTENSION: &str = "json";

/// Recursively collects the absolute paths of the files under `root` whose
/// extension is exactly `extension`.
///
/// Paths come back in traversal order. A missing or unreadable root, or any
/// directory that cannot be read during the walk, is an error.
pub fn find_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let root = std::fs::canonicalize(root)
        .with_context(|| format!("Failed to resolve data directory {}", root.display()))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(true) {
        let entry =
            entry.with_context(|| format!("Failed to walk data directory {}", root.display()))?;
        if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new(extension)) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
