use pn_core::{ClipboardEntry, DeleteOutcome, EntryId, InsertOutcome, PinOutcome};
use tokio::sync::oneshot;

/// Requests handled by the history owner, one at a time.
pub(crate) enum HistoryCommand {
    Insert {
        entry: ClipboardEntry,
        reply: oneshot::Sender<InsertOutcome>,
    },
    TogglePin {
        id: EntryId,
        reply: oneshot::Sender<PinOutcome>,
    },
    RequiresConfirmation {
        id: EntryId,
        reply: oneshot::Sender<bool>,
    },
    Delete {
        id: EntryId,
        reply: oneshot::Sender<DeleteOutcome>,
    },
    ClearAll {
        reply: oneshot::Sender<usize>,
    },
    Filtered {
        search: String,
        reply: oneshot::Sender<Vec<ClipboardEntry>>,
    },
    Get {
        id: EntryId,
        reply: oneshot::Sender<Option<ClipboardEntry>>,
    },
    /// Replies once every save queued before it has completed.
    Flush {
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}
