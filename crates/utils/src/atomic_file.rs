//! Atomic file operations so readers never observe a half-written document

use docstore_core::{Error, Result};
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Whether a directory entry is a temporary file left by [`write_atomic`]
pub fn is_temp_file_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(TEMP_FILE_SUFFIX)
}

/// Write data to a file atomically by writing to a temporary file and renaming
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // Same directory as the target so the rename stays on one file system
    let temp_path = parent.join(format!(".{}{TEMP_FILE_SUFFIX}", Uuid::new_v4()));

    let result = async {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .await
            .map_err(|e| Error::io(&temp_path, "create temporary file", e))?;

        file.write_all(content)
            .await
            .map_err(|e| Error::io(&temp_path, "write to temporary file", e))?;

        file.sync_all()
            .await
            .map_err(|e| Error::io(&temp_path, "sync temporary file", e))?;

        Ok::<(), Error>(())
    }
    .await;

    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
        return result;
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(Error::io(path, "atomic rename", e));
    }

    Ok(())
}
