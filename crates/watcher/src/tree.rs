//! Directory tree enumeration for recursive registration

use crate::error::WatchError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// `root` followed by every directory below it
///
/// Symlinks are not followed. Fails if `root` is missing or unreadable.
pub fn directories_under(root: &Path) -> Result<Vec<PathBuf>, WatchError> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| WatchError::WalkFailed {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}
