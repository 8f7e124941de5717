//! Output placement
//!
//! Moves are delete-if-exists then rename. They are not atomic against other
//! writers to the destination, and a failed multi-file move is not rolled back.

use crate::domain::{AutoVtexError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Creates `dir` and its parents if absent
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| AutoVtexError::staging(dir, e))
}

/// Moves `source` into `dest_dir`, replacing a file of the same name
///
/// Falls back to copy and delete when a rename is not possible (for example
/// across volumes). Returns the destination path.
pub fn move_replacing(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| AutoVtexError::staging(source, "path has no file name"))?;
    let dest = dest_dir.join(file_name);

    match fs::remove_file(&dest) {
        Ok(()) => tracing::debug!(path = %dest.display(), "Replaced existing file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(AutoVtexError::staging(&dest, e)),
    }

    if let Err(rename_err) = fs::rename(source, &dest) {
        tracing::debug!(
            source = %source.display(),
            error = %rename_err,
            "Rename failed, copying instead"
        );
        fs::copy(source, &dest).map_err(|e| AutoVtexError::staging(source, e))?;
        fs::remove_file(source).map_err(|e| AutoVtexError::staging(source, e))?;
    }

    tracing::debug!(from = %source.display(), to = %dest.display(), "Moved artifact");
    Ok(dest)
}

/// Removes `dir` if it exists and is empty
///
/// Returns `Ok(false)` when the directory still has entries.
pub fn remove_dir_if_empty(dir: &Path) -> Result<bool> {
    let mut entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(AutoVtexError::staging(dir, e)),
    };
    if entries.next().is_some() {
        return Ok(false);
    }
    fs::remove_dir(dir).map_err(|e| AutoVtexError::staging(dir, e))?;
    Ok(true)
}
