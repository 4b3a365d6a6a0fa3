mod command;
mod event;
mod handle;
mod runtime;
mod writer;

pub use event::HistoryEvent;
pub use handle::{CopyOutcome, HistoryHandle};

pub(crate) use runtime::HistoryRuntime;
pub(crate) use writer::PersistenceWriter;
