//! Port interfaces
//!
//! Ports define the contract between the history engine and the
//! infrastructure or platform code that backs it. The engine depends only on
//! these traits, so tests can run it against in-memory fakes.

mod app_dirs;
mod blob_storage;
mod clipboard_change_handler;
mod clock;
pub mod errors;
mod history_persistence;
mod system_clipboard;

pub use app_dirs::AppDirsPort;
pub use blob_storage::BlobStoragePort;
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::ClockPort;
pub use errors::{
    AppDirsError, ClipboardError, CorruptHistoryError, PersistenceError, StorageError,
};
pub use history_persistence::HistoryPersistencePort;
pub use system_clipboard::SystemClipboardPort;
