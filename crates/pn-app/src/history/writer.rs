use std::sync::Arc;

use pn_core::ports::HistoryPersistencePort;
use pn_core::ClipboardEntry;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use super::HistoryEvent;

pub(crate) enum WriterMessage {
    Save(Vec<ClipboardEntry>),
    Flush(oneshot::Sender<()>),
}

/// Writes history snapshots off the owner task.
///
/// Snapshots that pile up while a save is in flight collapse into the newest
/// one, so storage always ends at the latest state.
pub(crate) struct PersistenceWriter {
    persistence: Arc<dyn HistoryPersistencePort>,
    rx: mpsc::UnboundedReceiver<WriterMessage>,
    events: broadcast::Sender<HistoryEvent>,
}

impl PersistenceWriter {
    pub(crate) fn new(
        persistence: Arc<dyn HistoryPersistencePort>,
        rx: mpsc::UnboundedReceiver<WriterMessage>,
        events: broadcast::Sender<HistoryEvent>,
    ) -> Self {
        Self {
            persistence,
            rx,
            events,
        }
    }

    pub(crate) async fn run(mut self) {
        while let Some(message) = self.rx.recv().await {
            let mut pending = None;
            let mut waiters = Vec::new();
            self.absorb(message, &mut pending, &mut waiters);
            while let Ok(message) = self.rx.try_recv() {
                self.absorb(message, &mut pending, &mut waiters);
            }

            if let Some(snapshot) = pending {
                self.save(&snapshot).await;
            }
            for waiter in waiters {
                let _ = waiter.send(());
            }
        }
        debug!("Persistence writer stopped");
    }

    fn absorb(
        &self,
        message: WriterMessage,
        pending: &mut Option<Vec<ClipboardEntry>>,
        waiters: &mut Vec<oneshot::Sender<()>>,
    ) {
        match message {
            WriterMessage::Save(snapshot) => *pending = Some(snapshot),
            WriterMessage::Flush(reply) => waiters.push(reply),
        }
    }

    async fn save(&self, snapshot: &[ClipboardEntry]) {
        match self.persistence.save(snapshot).await {
            Ok(()) => debug!(entries = snapshot.len(), "History saved"),
            Err(err) => {
                warn!(error = %err, entries = snapshot.len(), "Failed to save history");
                let _ = self.events.send(HistoryEvent::PersistenceFailed {
                    reason: err.to_string(),
                });
            }
        }
    }
}
