use pn_core::EntryId;

/// Change notification published after every history mutation.
///
/// Presentation layers subscribe and re-query the view when one arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    Inserted { id: EntryId },
    PinToggled { id: EntryId, pinned: bool },
    Deleted { id: EntryId },
    Cleared { removed: usize },
    /// The last save failed; the in-memory history is still correct.
    PersistenceFailed { reason: String },
}
