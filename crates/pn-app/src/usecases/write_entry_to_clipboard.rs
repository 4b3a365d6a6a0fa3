use std::sync::Arc;

use pn_core::ports::{ClipboardError, SystemClipboardPort};
use pn_core::{ClipboardEntry, GenerationToken, GenerationTracker};

use crate::EngineError;

/// Put a history entry back on the system clipboard.
///
/// The clipboard is cleared before writing. The resulting generation is
/// marked as seen so the watcher does not record the write as a new capture.
pub struct WriteEntryToClipboardUseCase {
    clipboard: Arc<dyn SystemClipboardPort>,
    tracker: Arc<GenerationTracker>,
}

impl WriteEntryToClipboardUseCase {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>, tracker: Arc<GenerationTracker>) -> Self {
        Self { clipboard, tracker }
    }

    #[tracing::instrument(
        name = "usecase.clipboard.write_entry.execute",
        skip(self, entry),
        fields(entry_id = %entry.id(), is_image = entry.is_image())
    )]
    pub async fn execute(&self, entry: ClipboardEntry) -> Result<GenerationToken, EngineError> {
        let clipboard = Arc::clone(&self.clipboard);
        let token = tokio::task::spawn_blocking(move || -> Result<_, ClipboardError> {
            clipboard.clear()?;
            match entry.image_bytes() {
                Some(png) => clipboard.write_image(png)?,
                None => clipboard.write_text(entry.content())?,
            }
            clipboard.generation_token()
        })
        .await??;

        self.tracker.mark_seen(token.clone()).await;
        tracing::debug!(token = %token, "Clipboard written");
        Ok(token)
    }
}
