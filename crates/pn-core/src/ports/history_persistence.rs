use async_trait::async_trait;

use crate::clipboard::ClipboardEntry;
use crate::ports::errors::PersistenceError;

/// Saves and restores the full history sequence.
#[async_trait]
pub trait HistoryPersistencePort: Send + Sync {
    /// Persists `entries` in the given (canonical) order.
    async fn save(&self, entries: &[ClipboardEntry]) -> Result<(), PersistenceError>;

    /// Restores the last saved sequence.
    ///
    /// Never fails: missing or unreadable data yields an empty history.
    async fn load(&self) -> Vec<ClipboardEntry>;
}
