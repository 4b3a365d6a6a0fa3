use async_trait::async_trait;

use crate::ports::errors::StorageError;

/// Durable key-value slot for opaque blobs.
#[async_trait]
pub trait BlobStoragePort: Send + Sync {
    /// Returns `Ok(None)` when nothing was ever written under `key`.
    async fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    async fn write_blob(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}
