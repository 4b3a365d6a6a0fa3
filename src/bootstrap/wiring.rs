//! Dependency wiring: concrete adapters plugged into the engine ports.

use std::sync::Arc;

use anyhow::Context;
use pn_app::{HistoryEngine, HistoryEngineBuilder};
use pn_core::ports::{ClockPort, SystemClipboardPort};
use pn_infra::{BlobHistoryRepository, FileBlobStorage, MonotonicClock, SystemClock};
use pn_platform::ClipboardWatcher;

use super::config::Settings;

/// Start the history engine over file storage in the configured data dir.
///
/// Pass a clipboard when the engine needs to write to it (`run`, `copy`).
/// Fails while another engine, in this process or another, owns the dir.
pub async fn start_engine(
    settings: &Settings,
    clipboard: Option<Arc<dyn SystemClipboardPort>>,
) -> anyhow::Result<HistoryEngine> {
    let storage = FileBlobStorage::open(settings.data_dir.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to open history in {}",
                settings.data_dir.display()
            )
        })?;
    let storage = Arc::new(storage);
    let repository = Arc::new(BlobHistoryRepository::new(storage));

    let builder = HistoryEngineBuilder::new(repository);
    let builder = match clipboard {
        Some(clipboard) => builder.with_clipboard(clipboard),
        None => builder,
    };
    Ok(builder.start().await)
}

/// Build a watcher feeding captures into `engine`.
///
/// The watcher shares the engine's generation tracker, and its clock starts
/// at the newest persisted timestamp.
pub fn build_watcher(
    engine: &HistoryEngine,
    clipboard: Arc<dyn SystemClipboardPort>,
    settings: &Settings,
) -> ClipboardWatcher {
    let clock: Arc<dyn ClockPort> = Arc::new(MonotonicClock::new(
        Arc::new(SystemClock),
        engine.latest_timestamp_ms().unwrap_or(0),
    ));

    ClipboardWatcher::new(
        clipboard,
        Arc::new(engine.handle()),
        clock,
        engine.tracker(),
    )
    .with_interval(settings.poll_interval)
}
