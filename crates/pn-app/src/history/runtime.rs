use pn_core::{DeleteOutcome, HistoryStore, InsertOutcome, PinOutcome};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use super::command::HistoryCommand;
use super::writer::WriterMessage;
use super::HistoryEvent;

/// Sole owner of the history.
///
/// Commands are applied strictly one after another. Every mutation hands a
/// snapshot to the persistence writer and publishes a [`HistoryEvent`]; the
/// owner itself never waits on storage.
pub(crate) struct HistoryRuntime {
    store: HistoryStore,
    commands: mpsc::Receiver<HistoryCommand>,
    writer: mpsc::UnboundedSender<WriterMessage>,
    events: broadcast::Sender<HistoryEvent>,
}

impl HistoryRuntime {
    pub(crate) fn new(
        store: HistoryStore,
        commands: mpsc::Receiver<HistoryCommand>,
        writer: mpsc::UnboundedSender<WriterMessage>,
        events: broadcast::Sender<HistoryEvent>,
    ) -> Self {
        Self {
            store,
            commands,
            writer,
            events,
        }
    }

    pub(crate) async fn run(mut self) {
        info!(entries = self.store.len(), "History runtime started");
        while let Some(command) = self.commands.recv().await {
            if !self.apply(command) {
                break;
            }
        }
        info!(entries = self.store.len(), "History runtime stopped");
    }

    /// Returns `false` once the runtime should stop.
    fn apply(&mut self, command: HistoryCommand) -> bool {
        match command {
            HistoryCommand::Insert { entry, reply } => {
                let outcome = self.store.insert(entry);
                match &outcome {
                    InsertOutcome::Inserted(id) => {
                        debug!(entry_id = %id, total = self.store.len(), "Entry recorded");
                        self.persist();
                        self.publish(HistoryEvent::Inserted { id: id.clone() });
                    }
                    InsertOutcome::Duplicate(id) => {
                        debug!(entry_id = %id, "Duplicate capture ignored");
                    }
                }
                let _ = reply.send(outcome);
            }
            HistoryCommand::TogglePin { id, reply } => {
                let outcome = self.store.toggle_pin(&id);
                if let PinOutcome::Toggled { pinned } = outcome {
                    debug!(entry_id = %id, pinned, "Pin toggled");
                    self.persist();
                    self.publish(HistoryEvent::PinToggled { id, pinned });
                }
                let _ = reply.send(outcome);
            }
            HistoryCommand::RequiresConfirmation { id, reply } => {
                let _ = reply.send(self.store.requires_confirmation(&id));
            }
            HistoryCommand::Delete { id, reply } => {
                let outcome = self.store.delete(&id);
                if let DeleteOutcome::Deleted(entry) = &outcome {
                    debug!(entry_id = %entry.id(), "Entry deleted");
                    self.persist();
                    self.publish(HistoryEvent::Deleted {
                        id: entry.id().clone(),
                    });
                }
                let _ = reply.send(outcome);
            }
            HistoryCommand::ClearAll { reply } => {
                let removed = self.store.clear_all();
                info!(removed, "History cleared");
                self.persist();
                self.publish(HistoryEvent::Cleared { removed });
                let _ = reply.send(removed);
            }
            HistoryCommand::Filtered { search, reply } => {
                let _ = reply.send(self.store.filtered(&search));
            }
            HistoryCommand::Get { id, reply } => {
                let _ = reply.send(self.store.get(&id).cloned());
            }
            HistoryCommand::Flush { reply } => {
                if self.writer.send(WriterMessage::Flush(reply)).is_err() {
                    debug!("Persistence writer gone; flush skipped");
                }
            }
            HistoryCommand::Shutdown => return false,
        }
        true
    }

    fn persist(&self) {
        if self
            .writer
            .send(WriterMessage::Save(self.store.snapshot()))
            .is_err()
        {
            debug!("Persistence writer gone; snapshot dropped");
        }
    }

    fn publish(&self, event: HistoryEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
