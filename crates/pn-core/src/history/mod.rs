//! Clipboard history rules: storage, ordering and search.

mod ordering;
mod query;
mod store;

pub use ordering::{canonical_order, is_canonically_ordered, sort_canonical};
pub use query::filter_entries;
pub use store::{DeleteOutcome, HistoryStore, InsertOutcome, PinOutcome};
