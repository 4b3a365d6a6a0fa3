use std::sync::Arc;

use async_trait::async_trait;
use pn_core::ports::ClipboardChangeHandler;
use pn_core::{ClipboardEntry, DeleteOutcome, EntryId, InsertOutcome, PinOutcome};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use super::command::HistoryCommand;
use super::HistoryEvent;
use crate::usecases::WriteEntryToClipboardUseCase;
use crate::EngineError;

/// Result of asking the engine to copy an entry back to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    NotFound,
}

/// Cloneable front door to the running history engine.
///
/// Every call is a request to the single history owner; calls from any
/// number of tasks are applied one at a time in arrival order.
#[derive(Clone)]
pub struct HistoryHandle {
    commands: mpsc::Sender<HistoryCommand>,
    events: broadcast::Sender<HistoryEvent>,
    writer: Option<Arc<WriteEntryToClipboardUseCase>>,
}

impl HistoryHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<HistoryCommand>,
        events: broadcast::Sender<HistoryEvent>,
        writer: Option<Arc<WriteEntryToClipboardUseCase>>,
    ) -> Self {
        Self {
            commands,
            events,
            writer,
        }
    }

    pub async fn insert(&self, entry: ClipboardEntry) -> Result<InsertOutcome, EngineError> {
        self.request(|reply| HistoryCommand::Insert { entry, reply })
            .await
    }

    /// Entries whose content contains `search` (case-insensitive), in
    /// display order. An empty search returns everything.
    pub async fn filtered(&self, search: &str) -> Result<Vec<ClipboardEntry>, EngineError> {
        let search = search.to_string();
        self.request(|reply| HistoryCommand::Filtered { search, reply })
            .await
    }

    pub async fn get(&self, id: &EntryId) -> Result<Option<ClipboardEntry>, EngineError> {
        let id = id.clone();
        self.request(|reply| HistoryCommand::Get { id, reply }).await
    }

    pub async fn toggle_pin(&self, id: &EntryId) -> Result<PinOutcome, EngineError> {
        let id = id.clone();
        self.request(|reply| HistoryCommand::TogglePin { id, reply })
            .await
    }

    /// Whether deleting `id` should be confirmed by the user first.
    pub async fn requires_confirmation(&self, id: &EntryId) -> Result<bool, EngineError> {
        let id = id.clone();
        self.request(|reply| HistoryCommand::RequiresConfirmation { id, reply })
            .await
    }

    /// Deletes unconditionally; confirmation is the caller's job.
    pub async fn delete(&self, id: &EntryId) -> Result<DeleteOutcome, EngineError> {
        let id = id.clone();
        self.request(|reply| HistoryCommand::Delete { id, reply })
            .await
    }

    /// Removes every entry, pinned ones included. Returns how many were removed.
    pub async fn clear_all(&self) -> Result<usize, EngineError> {
        self.request(|reply| HistoryCommand::ClearAll { reply })
            .await
    }

    /// Writes the entry back to the system clipboard.
    ///
    /// History order and timestamps are left alone.
    pub async fn copy(&self, id: &EntryId) -> Result<CopyOutcome, EngineError> {
        let writer = self.writer.clone().ok_or(EngineError::ClipboardUnavailable)?;
        let Some(entry) = self.get(id).await? else {
            return Ok(CopyOutcome::NotFound);
        };
        writer.execute(entry).await?;
        Ok(CopyOutcome::Copied)
    }

    /// Waits until every change made so far has been handed to storage.
    pub async fn flush(&self) -> Result<(), EngineError> {
        self.request(|reply| HistoryCommand::Flush { reply }).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    /// Asks the owner to stop. Requests sent afterwards fail with
    /// [`EngineError::RuntimeStopped`].
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.commands
            .send(HistoryCommand::Shutdown)
            .await
            .map_err(|_| EngineError::RuntimeStopped)
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> HistoryCommand,
    ) -> Result<T, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(make(reply))
            .await
            .map_err(|_| EngineError::RuntimeStopped)?;
        rx.await.map_err(|_| EngineError::RuntimeStopped)
    }
}

#[async_trait]
impl ClipboardChangeHandler for HistoryHandle {
    async fn on_clipboard_changed(&self, entry: ClipboardEntry) -> anyhow::Result<()> {
        match self.insert(entry).await? {
            InsertOutcome::Inserted(id) => debug!(entry_id = %id, "Captured clipboard entry"),
            InsertOutcome::Duplicate(id) => {
                debug!(existing_id = %id, "Capture matches an existing entry")
            }
        }
        Ok(())
    }
}
