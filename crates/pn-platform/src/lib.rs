//! # pn-platform
//!
//! Platform-specific implementations for pastenow.
//!
//! This crate talks to the operating system: the `arboard` clipboard
//! adapter, the polling clipboard watcher, and application directories.

pub mod app_dirs;
pub mod clipboard;
pub mod runtime;

pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::ArboardClipboard;
pub use runtime::{ClipboardWatcher, PollOutcome, DEFAULT_POLL_INTERVAL};
