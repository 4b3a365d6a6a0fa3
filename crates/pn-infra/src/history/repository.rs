use std::sync::Arc;

use async_trait::async_trait;
use pn_core::ports::{BlobStoragePort, HistoryPersistencePort, PersistenceError};
use pn_core::ClipboardEntry;
use tracing::{debug, warn};

use super::codec::{decode_history, encode_history};

/// Storage key of the persisted history.
pub const HISTORY_KEY: &str = "clipboardHistory";

/// Persists the history as one JSON blob in a [`BlobStoragePort`].
pub struct BlobHistoryRepository {
    storage: Arc<dyn BlobStoragePort>,
}

impl BlobHistoryRepository {
    pub fn new(storage: Arc<dyn BlobStoragePort>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl HistoryPersistencePort for BlobHistoryRepository {
    async fn save(&self, entries: &[ClipboardEntry]) -> Result<(), PersistenceError> {
        let bytes = encode_history(entries)?;
        self.storage.write_blob(HISTORY_KEY, &bytes).await?;
        debug!(count = entries.len(), bytes = bytes.len(), "Saved clipboard history");
        Ok(())
    }

    async fn load(&self) -> Vec<ClipboardEntry> {
        let bytes = match self.storage.read_blob(HISTORY_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = HISTORY_KEY, "No persisted clipboard history");
                return Vec::new();
            }
            Err(err) => {
                warn!(error = %err, "Failed to read clipboard history, starting empty");
                return Vec::new();
            }
        };

        match decode_history(&bytes) {
            Ok(entries) => {
                debug!(count = entries.len(), "Loaded clipboard history");
                entries
            }
            Err(err) => {
                warn!(error = %err, "Persisted clipboard history is corrupt, starting empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBlobStorage;

    #[tokio::test]
    async fn load_without_data_is_empty() {
        let repo = BlobHistoryRepository::new(Arc::new(InMemoryBlobStorage::new()));
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_of_corrupt_blob_is_empty() {
        let storage = InMemoryBlobStorage::with_blob(HISTORY_KEY, b"\x00garbage".to_vec());
        let repo = BlobHistoryRepository::new(Arc::new(storage));
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let storage = Arc::new(InMemoryBlobStorage::new());
        let repo = BlobHistoryRepository::new(storage.clone());
        let entries = vec![
            ClipboardEntry::image(vec![137, 80, 78, 71], 2),
            ClipboardEntry::text("hello", 1),
        ];

        repo.save(&entries).await.unwrap();

        assert!(storage.blob(HISTORY_KEY).await.is_some());
        assert_eq!(repo.load().await, entries);
    }

    #[tokio::test]
    async fn save_reports_storage_failure() {
        let storage = Arc::new(InMemoryBlobStorage::new());
        storage.set_fail_writes(true);
        let repo = BlobHistoryRepository::new(storage);

        let err = repo.save(&[ClipboardEntry::text("x", 1)]).await.unwrap_err();

        assert!(matches!(err, PersistenceError::Storage(_)));
    }

    #[tokio::test]
    async fn read_failure_degrades_to_empty() {
        let storage = Arc::new(InMemoryBlobStorage::with_blob(HISTORY_KEY, b"[]".to_vec()));
        storage.set_fail_reads(true);
        let repo = BlobHistoryRepository::new(storage);
        assert!(repo.load().await.is_empty());
    }
}
