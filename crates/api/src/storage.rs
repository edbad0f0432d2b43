//! Local filesystem helpers for the three storage directories.

use std::io;
use std::path::Path;

use crate::config::StorageConfig;

/// Create the upload, screenshot and model asset directories if absent.
pub async fn ensure_dirs(storage: &StorageConfig) -> io::Result<()> {
    for dir in [
        &storage.upload_dir,
        &storage.screenshots_dir,
        &storage.models_dir,
    ] {
        tokio::fs::create_dir_all(dir).await?;
        tracing::debug!(dir = %dir.display(), "Storage directory ready");
    }
    Ok(())
}

/// Remove a file, treating an already missing file as success.
///
/// Returns `true` if a file was actually removed.
pub async fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
