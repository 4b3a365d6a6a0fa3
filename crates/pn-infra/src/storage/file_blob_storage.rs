use std::fs::{File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use pn_core::ports::{BlobStoragePort, StorageError};
use tokio::fs;

const LOCK_FILE_NAME: &str = "pastenow.lock";

/// Stores each blob as `<dir>/<key>.json`, replacing it atomically on write.
///
/// The directory is locked exclusively for the lifetime of the value, so at
/// most one process owns the stored history at a time.
pub struct FileBlobStorage {
    dir: PathBuf,
    _lock: File,
}

impl FileBlobStorage {
    /// Creates `dir` if needed and takes its lock.
    ///
    /// Fails with [`StorageError::InUse`] while another owner holds it.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        let open_error = |reason: String| StorageError::Open {
            path: dir.display().to_string(),
            reason,
        };

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| open_error(e.to_string()))?;

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(dir.join(LOCK_FILE_NAME))
            .map_err(|e| open_error(e.to_string()))?;

        match lock.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(StorageError::InUse {
                    path: dir.display().to_string(),
                })
            }
            Err(TryLockError::Error(e)) => return Err(open_error(e.to_string())),
        }

        tracing::debug!(dir = %dir.display(), "Storage directory locked");
        Ok(Self { dir, _lock: lock })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        anyhow::ensure!(
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "invalid storage key: {key:?}"
        );
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Writes `bytes` to a sibling temp file, then renames it over the target.
    ///
    /// The target holds either the previous or the new content, never a
    /// partial write.
    async fn atomic_write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create storage dir failed: {}", self.dir.display()))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes)
            .await
            .with_context(|| format!("write temp blob failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, path).await.with_context(|| {
            format!(
                "rename temp blob to target failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl BlobStoragePort for FileBlobStorage {
    async fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let read_error = |reason: String| StorageError::Read {
            key: key.to_string(),
            reason,
        };
        let path = self.path_for(key).map_err(|e| read_error(e.to_string()))?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(format!("{}: {e}", path.display()))),
        }
    }

    async fn write_blob(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let write_error = |err: anyhow::Error| StorageError::Write {
            key: key.to_string(),
            reason: format!("{err:#}"),
        };
        let path = self.path_for(key).map_err(write_error)?;
        self.atomic_write(&path, bytes).await.map_err(write_error)
    }
}
