mod watcher;

pub use watcher::{ClipboardWatcher, PollOutcome, DEFAULT_POLL_INTERVAL};
