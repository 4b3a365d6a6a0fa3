//! Clipboard change handler port
//!
//! The platform watcher builds an entry for every detected clipboard change
//! and hands it to this handler. The app layer implements it by forwarding
//! the entry to the history owner, which decides whether it is new.

use async_trait::async_trait;

use crate::clipboard::ClipboardEntry;

#[async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    async fn on_clipboard_changed(&self, entry: ClipboardEntry) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_is_object_safe() {
        fn assert_object_safe(_handler: Option<&dyn ClipboardChangeHandler>) {}
        assert_object_safe(None);
    }
}
