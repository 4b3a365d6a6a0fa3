use std::sync::Arc;

use pn_core::ports::{HistoryPersistencePort, SystemClipboardPort};
use pn_core::{GenerationTracker, HistoryStore};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use crate::history::{HistoryHandle, HistoryRuntime, PersistenceWriter};
use crate::usecases::WriteEntryToClipboardUseCase;
use crate::EngineError;

const COMMAND_CAPACITY: usize = 64;
const EVENT_CAPACITY: usize = 128;

/// Assembles and starts the history engine.
pub struct HistoryEngineBuilder {
    persistence: Arc<dyn HistoryPersistencePort>,
    clipboard: Option<Arc<dyn SystemClipboardPort>>,
    tracker: Arc<GenerationTracker>,
}

impl HistoryEngineBuilder {
    pub fn new(persistence: Arc<dyn HistoryPersistencePort>) -> Self {
        Self {
            persistence,
            clipboard: None,
            tracker: Arc::new(GenerationTracker::new()),
        }
    }

    /// Without a clipboard the engine still manages history, but
    /// [`HistoryHandle::copy`] fails with [`EngineError::ClipboardUnavailable`].
    pub fn with_clipboard(mut self, clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Share a tracker with a clipboard watcher so copies are not re-captured.
    pub fn with_tracker(mut self, tracker: Arc<GenerationTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    /// Loads the persisted history and spawns the owner and writer tasks.
    pub async fn start(self) -> HistoryEngine {
        let loaded = self.persistence.load().await;
        let store = HistoryStore::restore(loaded);
        let latest_timestamp_ms = store.latest_timestamp_ms();
        info!(entries = store.len(), "History loaded");

        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (writer_tx, writer_rx) = mpsc::unbounded_channel();
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let writer = PersistenceWriter::new(self.persistence, writer_rx, event_tx.clone());
        let runtime = HistoryRuntime::new(store, command_rx, writer_tx, event_tx.clone());

        let writer_task = tokio::spawn(writer.run());
        let runtime_task = tokio::spawn(runtime.run());

        let clipboard_writer = self.clipboard.map(|clipboard| {
            Arc::new(WriteEntryToClipboardUseCase::new(
                clipboard,
                Arc::clone(&self.tracker),
            ))
        });

        HistoryEngine {
            handle: HistoryHandle::new(command_tx, event_tx, clipboard_writer),
            tracker: self.tracker,
            latest_timestamp_ms,
            runtime_task,
            writer_task,
        }
    }
}

/// A started engine: its handle plus the background tasks behind it.
pub struct HistoryEngine {
    handle: HistoryHandle,
    tracker: Arc<GenerationTracker>,
    latest_timestamp_ms: Option<i64>,
    runtime_task: JoinHandle<()>,
    writer_task: JoinHandle<()>,
}

impl HistoryEngine {
    pub fn handle(&self) -> HistoryHandle {
        self.handle.clone()
    }

    pub fn tracker(&self) -> Arc<GenerationTracker> {
        Arc::clone(&self.tracker)
    }

    /// Newest timestamp found in the loaded history, if any.
    pub fn latest_timestamp_ms(&self) -> Option<i64> {
        self.latest_timestamp_ms
    }

    /// Stops the owner and waits for every queued save to finish.
    pub async fn shutdown(self) -> Result<(), EngineError> {
        // Already stopped is fine; the tasks are joined either way.
        let _ = self.handle.shutdown().await;
        self.runtime_task.await?;
        self.writer_task.await?;
        info!("History engine stopped");
        Ok(())
    }
}
