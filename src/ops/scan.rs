use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::MediaError;
use crate::types::media_kind::MediaKind;

/// Lists the files directly inside `dir` whose extension is on `kind`'s
/// allow-list.
///
/// Subdirectories are not descended into. Returned paths are absolute and
/// sorted by file name so repeated scans of an unchanged directory agree.
///
/// # Errors
///
/// `DirectoryMissing` if `dir` is not an existing directory, or the
/// underlying I/O error if an entry cannot be read.
pub fn list_media_files(dir: &Path, kind: MediaKind) -> Result<Vec<PathBuf>, MediaError> {
    if !dir.is_dir() {
        return Err(MediaError::DirectoryMissing(dir.to_path_buf()));
    }
    let root = std::path::absolute(dir).map_err(|e| MediaError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        // is_file() follows symlinks, so linked media is picked up too
        if path.is_file() && kind.matches(path) {
            files.push(path.to_path_buf());
        }
    }
    log::debug!(
        "found {} {} file(s) in {}",
        files.len(),
        kind.label(),
        root.display()
    );
    Ok(files)
}
