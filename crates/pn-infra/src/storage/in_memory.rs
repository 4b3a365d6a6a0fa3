use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use pn_core::ports::{BlobStoragePort, StorageError};
use tokio::sync::Mutex;

/// In-memory [`BlobStoragePort`] for tests and ephemeral runs.
///
/// Reads and writes can be forced to fail to exercise error paths.
#[derive(Default)]
pub struct InMemoryBlobStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.into(), bytes);
        Self {
            blobs: Mutex::new(blobs),
            ..Self::default()
        }
    }

    pub async fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().await.get(key).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStoragePort for InMemoryBlobStorage {
    async fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read {
                key: key.to_string(),
                reason: "simulated read failure".to_string(),
            });
        }
        Ok(self.blobs.lock().await.get(key).cloned())
    }

    async fn write_blob(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "simulated write failure".to_string(),
            });
        }
        self.blobs.lock().await.insert(key.to_string(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
