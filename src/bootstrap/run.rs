//! Long-running mode: watch the clipboard until interrupted.

use std::sync::Arc;

use anyhow::Context;
use pn_app::HistoryEvent;
use pn_core::ports::SystemClipboardPort;
use pn_platform::ArboardClipboard;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::config::Settings;
use super::wiring::{build_watcher, start_engine};

pub async fn run_daemon(settings: &Settings) -> anyhow::Result<()> {
    let clipboard: Arc<dyn SystemClipboardPort> =
        Arc::new(ArboardClipboard::new().context("Failed to open system clipboard")?);

    let engine = start_engine(settings, Some(Arc::clone(&clipboard))).await?;
    let watcher = build_watcher(&engine, clipboard, settings);
    let shutdown = CancellationToken::new();

    #[cfg(unix)]
    let control_task = {
        let server = super::control::ControlServer::bind(&settings.data_dir)?;
        tokio::spawn(server.serve(engine.handle(), shutdown.clone()))
    };

    let mut events = engine.handle().subscribe();
    let event_log = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(HistoryEvent::PersistenceFailed { reason }) => {
                    warn!(%reason, "History could not be saved; changes kept in memory")
                }
                Ok(event) => tracing::debug!(?event, "History changed"),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "History event listener lagged")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let watcher_task = tokio::spawn(watcher.run(shutdown.clone()));
    info!(
        data_dir = %settings.data_dir.display(),
        interval_ms = settings.poll_interval.as_millis() as u64,
        "pastenow running, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Shutting down");

    shutdown.cancel();
    watcher_task.await.context("Clipboard watcher task failed")?;
    #[cfg(unix)]
    control_task.await.context("Control socket task failed")?;
    engine.shutdown().await.context("History engine did not stop cleanly")?;
    event_log.abort();
    Ok(())
}
