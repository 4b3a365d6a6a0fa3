//! Clipboard watcher runtime
//!
//! Polls the system clipboard on a fixed interval and turns every detected
//! change into a new [`ClipboardEntry`] handed to a [`ClipboardChangeHandler`].
//!
//! ```text
//! SystemClipboardPort
//!      ↓  generation token changed?
//! ClipboardWatcher   (this module)
//!      ↓  ClipboardEntry
//! ClipboardChangeHandler
//!      ↓
//! History owner (dedup + insert)
//! ```
//!
//! The watcher does not deduplicate entries; the history store decides
//! whether a capture is new. A failed poll is logged and the loop carries on
//! with the next tick; only cancellation stops it.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use pn_core::ports::{ClipboardChangeHandler, ClipboardError, ClockPort, SystemClipboardPort};
use pn_core::{ClipboardEntry, GenerationTracker};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Unchanged,
    Captured,
    /// The clipboard changed but holds neither an image nor text.
    Unsupported,
}

pub struct ClipboardWatcher {
    clipboard: Arc<dyn SystemClipboardPort>,
    handler: Arc<dyn ClipboardChangeHandler>,
    clock: Arc<dyn ClockPort>,
    tracker: Arc<GenerationTracker>,
    interval: Duration,
}

impl ClipboardWatcher {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        handler: Arc<dyn ClipboardChangeHandler>,
        clock: Arc<dyn ClockPort>,
        tracker: Arc<GenerationTracker>,
    ) -> Self {
        Self {
            clipboard,
            handler,
            clock,
            tracker,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Records the current generation without capturing it, so content
    /// already on the clipboard at startup is not recorded.
    pub async fn prime(&self) -> Result<()> {
        let token = self.call(|c| c.generation_token()).await?;
        self.tracker.mark_seen(token).await;
        Ok(())
    }

    /// Polls the clipboard once.
    pub async fn check_once(&self) -> Result<PollOutcome> {
        let token = self.call(|c| c.generation_token()).await?;
        if !self.tracker.observe(&token).await {
            return Ok(PollOutcome::Unchanged);
        }
        trace!(token = %token, "Clipboard generation changed");

        let entry = match self.call(|c| c.read_image()).await? {
            Some(png_bytes) => ClipboardEntry::image(png_bytes, self.clock.now_ms()),
            None => match self.call(|c| c.read_text()).await? {
                Some(text) => ClipboardEntry::text(text, self.clock.now_ms()),
                None => {
                    debug!("Clipboard holds no supported content, ignoring");
                    return Ok(PollOutcome::Unsupported);
                }
            },
        };

        debug!(
            entry_id = %entry.id(),
            is_image = entry.is_image(),
            "Clipboard change captured"
        );
        self.handler.on_clipboard_changed(entry).await?;
        Ok(PollOutcome::Captured)
    }

    /// Polls until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) {
        if let Err(e) = self.prime().await {
            warn!(error = %e, "Failed to read initial clipboard generation");
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the prime above covers it.
        ticker.tick().await;

        info!(interval_ms = self.interval.as_millis() as u64, "Clipboard watcher started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.check_once().await {
                        warn!(error = %e, "Clipboard poll failed, skipping tick");
                    }
                }
            }
        }
        info!("Clipboard watcher stopped");
    }

    /// Runs a clipboard call on the blocking pool.
    async fn call<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn SystemClipboardPort) -> Result<T, ClipboardError> + Send + 'static,
        T: Send + 'static,
    {
        let clipboard = Arc::clone(&self.clipboard);
        Ok(tokio::task::spawn_blocking(move || f(clipboard.as_ref())).await??)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pn_core::GenerationToken;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct ClipboardState {
        generation: u64,
        text: Option<String>,
        image: Option<Vec<u8>>,
        fail_reads: bool,
    }

    #[derive(Default)]
    struct FakeClipboard {
        state: Mutex<ClipboardState>,
    }

    impl FakeClipboard {
        fn set_text(&self, text: &str) {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.text = Some(text.to_string());
            state.image = None;
        }

        fn set_image(&self, png: Vec<u8>) {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.image = Some(png);
        }

        fn set_nothing(&self) {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.text = None;
            state.image = None;
        }

        fn set_fail_reads(&self, fail: bool) {
            self.state.lock().unwrap().fail_reads = fail;
        }
    }

    impl SystemClipboardPort for FakeClipboard {
        fn generation_token(&self) -> Result<GenerationToken, ClipboardError> {
            let state = self.state.lock().unwrap();
            if state.fail_reads {
                return Err(ClipboardError::Read("simulated".into()));
            }
            Ok(GenerationToken::new(state.generation.to_string()))
        }

        fn read_image(&self) -> Result<Option<Vec<u8>>, ClipboardError> {
            Ok(self.state.lock().unwrap().image.clone())
        }

        fn read_text(&self) -> Result<Option<String>, ClipboardError> {
            Ok(self.state.lock().unwrap().text.clone())
        }

        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.set_text(text);
            Ok(())
        }

        fn write_image(&self, png_bytes: &[u8]) -> Result<(), ClipboardError> {
            self.set_image(png_bytes.to_vec());
            Ok(())
        }

        fn clear(&self) -> Result<(), ClipboardError> {
            self.set_nothing();
            Ok(())
        }
    }

    struct ChannelHandler(mpsc::UnboundedSender<ClipboardEntry>);

    #[async_trait]
    impl ClipboardChangeHandler for ChannelHandler {
        async fn on_clipboard_changed(&self, entry: ClipboardEntry) -> anyhow::Result<()> {
            self.0.send(entry)?;
            Ok(())
        }
    }

    struct FixedClock(i64);

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            self.0
        }
    }

    fn watcher(
        clipboard: Arc<FakeClipboard>,
    ) -> (ClipboardWatcher, mpsc::UnboundedReceiver<ClipboardEntry>, Arc<GenerationTracker>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let tracker = Arc::new(GenerationTracker::new());
        let watcher = ClipboardWatcher::new(
            clipboard,
            Arc::new(ChannelHandler(tx)),
            Arc::new(FixedClock(42)),
            tracker.clone(),
        );
        (watcher, rx, tracker)
    }

    #[tokio::test]
    async fn unchanged_generation_is_a_no_op() {
        let clipboard = Arc::new(FakeClipboard::default());
        clipboard.set_text("hello");
        let (watcher, mut rx, _) = watcher(clipboard);

        watcher.prime().await.unwrap();

        assert_eq!(watcher.check_once().await.unwrap(), PollOutcome::Unchanged);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn text_change_is_captured() {
        let clipboard = Arc::new(FakeClipboard::default());
        let (watcher, mut rx, _) = watcher(clipboard.clone());
        watcher.prime().await.unwrap();

        clipboard.set_text("hello");

        assert_eq!(watcher.check_once().await.unwrap(), PollOutcome::Captured);
        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.content(), "hello");
        assert_eq!(entry.timestamp_ms(), 42);
        assert!(!entry.is_image());
        assert!(!entry.is_pinned());
    }

    #[tokio::test]
    async fn image_takes_priority_over_text() {
        let clipboard = Arc::new(FakeClipboard::default());
        let (watcher, mut rx, _) = watcher(clipboard.clone());
        watcher.prime().await.unwrap();

        clipboard.set_text("caption");
        clipboard.set_image(vec![1, 2, 3]);

        watcher.check_once().await.unwrap();
        let entry = rx.try_recv().unwrap();
        assert!(entry.is_image());
        assert_eq!(entry.content(), pn_core::IMAGE_PLACEHOLDER);
        assert_eq!(entry.image_bytes(), Some(&[1u8, 2, 3][..]));
    }

    #[tokio::test]
    async fn unsupported_content_is_ignored() {
        let clipboard = Arc::new(FakeClipboard::default());
        let (watcher, mut rx, _) = watcher(clipboard.clone());
        watcher.prime().await.unwrap();

        clipboard.set_nothing();

        assert_eq!(watcher.check_once().await.unwrap(), PollOutcome::Unsupported);
        assert!(rx.try_recv().is_err());
        assert_eq!(watcher.check_once().await.unwrap(), PollOutcome::Unchanged);
    }

    #[tokio::test]
    async fn empty_text_is_captured() {
        let clipboard = Arc::new(FakeClipboard::default());
        let (watcher, mut rx, _) = watcher(clipboard.clone());
        watcher.prime().await.unwrap();

        clipboard.set_text("");

        assert_eq!(watcher.check_once().await.unwrap(), PollOutcome::Captured);
        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.content(), "");
        assert!(!entry.is_image());
    }

    #[tokio::test]
    async fn identical_content_is_still_handed_over() {
        let clipboard = Arc::new(FakeClipboard::default());
        let (watcher, mut rx, _) = watcher(clipboard.clone());
        watcher.prime().await.unwrap();

        clipboard.set_text("same");
        watcher.check_once().await.unwrap();
        clipboard.set_text("same");
        watcher.check_once().await.unwrap();

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn marked_generation_is_skipped() {
        let clipboard = Arc::new(FakeClipboard::default());
        let (watcher, mut rx, tracker) = watcher(clipboard.clone());
        watcher.prime().await.unwrap();

        clipboard.set_text("copied from history");
        let token = clipboard.generation_token().unwrap();
        tracker.mark_seen(token).await;

        assert_eq!(watcher.check_once().await.unwrap(), PollOutcome::Unchanged);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn read_failure_surfaces_as_error() {
        let clipboard = Arc::new(FakeClipboard::default());
        let (watcher, _rx, _) = watcher(clipboard.clone());
        clipboard.set_fail_reads(true);
        assert!(watcher.check_once().await.is_err());
    }

    #[tokio::test]
    async fn run_loop_survives_failures_and_stops_on_cancel() {
        let clipboard = Arc::new(FakeClipboard::default());
        let (watcher, mut rx, _) = watcher(clipboard.clone());
        let watcher = watcher.with_interval(Duration::from_millis(10));
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(watcher.run(shutdown.clone()));

        clipboard.set_fail_reads(true);
        tokio::time::sleep(Duration::from_millis(40)).await;
        clipboard.set_fail_reads(false);
        clipboard.set_text("after failure");

        let entry = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("watcher should keep polling")
            .expect("handler channel open");
        assert_eq!(entry.content(), "after failure");

        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("watcher should stop")
            .unwrap();
    }
}
