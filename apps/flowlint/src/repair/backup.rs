//! Replace a workflow file with repaired content, keeping one backup.

use crate::error::LintError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `<path>.backup`, appended to the full file name.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".backup");
    PathBuf::from(s)
}

/// Move the original aside (first time only) and write `content` in its place.
///
/// An existing backup is never replaced, so it always holds the state from
/// before the first repair. Returns the backup path.
pub fn write_with_backup(path: &Path, content: &str) -> Result<PathBuf, LintError> {
    let io_err = |source| LintError::FileIo {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let backup = backup_path(path);
    if !backup.exists() {
        fs::rename(path, &backup).map_err(io_err)?;
        debug!(backup = %backup.display(), "moved original aside");
    }
    fs::write(path, content).map_err(io_err)?;
    Ok(backup)
}
