//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use crate::util::errors::RmakeError;

/// Resolve `path` against `base` unless it is already absolute.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Borrow `path` as UTF-8, the form CMake arguments are passed in.
pub fn utf8_path(path: &Path) -> Result<&str, RmakeError> {
    path.to_str().ok_or_else(|| {
        RmakeError::InvalidArguments(format!(
            "path is not valid UTF-8: {}",
            path.display()
        ))
    })
}

/// Create a directory and all of its parents.
///
/// Relative paths are resolved against the current working directory.
/// Succeeds if the directory already exists. Returns the resolved path.
pub fn create_dir(path: &Path) -> Result<PathBuf, RmakeError> {
    let full_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| RmakeError::filesystem(".", e))?;
        cwd.join(path)
    };

    fs::create_dir_all(&full_path).map_err(|e| RmakeError::filesystem(&full_path, e))?;
    tracing::debug!("created directory {}", full_path.display());
    Ok(full_path)
}

/// Remove a directory and all its contents, if it exists.
pub fn delete_dir(path: &Path) -> Result<(), RmakeError> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| RmakeError::filesystem(path, e))?;
        tracing::debug!("removed directory {}", path.display());
    }
    Ok(())
}
