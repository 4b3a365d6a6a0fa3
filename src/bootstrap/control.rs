//! Local control socket of a running `pastenow run`.
//!
//! The daemon owns the history directory, so one-shot commands from other
//! processes are sent here and applied through the daemon's own handle.
//! Each connection carries one JSON request line and one JSON reply line.

use std::fs::Permissions;
use std::io::ErrorKind;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use pn_app::HistoryHandle;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::{execute, Command};

pub const SOCKET_FILE_NAME: &str = "pastenow.sock";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ControlReply {
    Ok { output: String },
    Err { message: String },
}

pub fn socket_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SOCKET_FILE_NAME)
}

pub struct ControlServer {
    listener: UnixListener,
    path: PathBuf,
}

impl ControlServer {
    /// Binds the socket in `data_dir`.
    ///
    /// Call only while holding the history lock: any socket file already
    /// there belongs to a daemon that is gone.
    pub fn bind(data_dir: &Path) -> anyhow::Result<Self> {
        let path = socket_path(data_dir);
        match std::fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "Removed stale control socket"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to remove stale socket {}", path.display())
                })
            }
        }

        let listener = UnixListener::bind(&path)
            .with_context(|| format!("Failed to bind control socket {}", path.display()))?;
        std::fs::set_permissions(&path, Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to restrict {}", path.display()))?;

        info!(path = %path.display(), "Control socket listening");
        Ok(Self { listener, path })
    }

    /// Answers requests until `shutdown` fires, then removes the socket file.
    pub async fn serve(self, history: HistoryHandle, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, _)) => {
                        let history = history.clone();
                        tokio::spawn(async move {
                            if let Err(e) = answer(stream, &history).await {
                                warn!(error = %e, "Control request failed");
                            }
                        });
                    }
                    Err(e) => warn!(error = %e, "Failed to accept control connection"),
                },
            }
        }

        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!(error = %e, "Control socket already gone");
        }
    }
}

async fn answer(stream: UnixStream, history: &HistoryHandle) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut line = String::new();
    BufReader::new(reader).read_line(&mut line).await?;

    let reply = match serde_json::from_str::<Command>(line.trim_end()) {
        Ok(Command::Run) => ControlReply::Err {
            message: "pastenow is already running".to_string(),
        },
        Ok(command) => {
            debug!(?command, "Control request");
            let mut output = Vec::new();
            match execute(history, command, &mut output).await {
                Ok(()) => ControlReply::Ok {
                    output: String::from_utf8_lossy(&output).into_owned(),
                },
                Err(e) => ControlReply::Err {
                    message: format!("{e:#}"),
                },
            }
        }
        Err(e) => ControlReply::Err {
            message: format!("Malformed control request: {e}"),
        },
    };

    let mut payload = serde_json::to_vec(&reply)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.shutdown().await?;
    Ok(())
}

/// Sends `command` to a running daemon and returns its printed output.
///
/// `Ok(None)` means no daemon is listening in `data_dir`.
pub async fn try_forward(data_dir: &Path, command: &Command) -> anyhow::Result<Option<String>> {
    let path = socket_path(data_dir);
    let stream = match UnixStream::connect(&path).await {
        Ok(stream) => stream,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::ConnectionRefused) => {
            return Ok(None)
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to reach pastenow at {}", path.display()))
        }
    };

    let (reader, mut writer) = stream.into_split();
    let mut request = serde_json::to_vec(command)?;
    request.push(b'\n');
    writer
        .write_all(&request)
        .await
        .context("Failed to send command to pastenow")?;

    let mut line = String::new();
    BufReader::new(reader)
        .read_line(&mut line)
        .await
        .context("Failed to read reply from pastenow")?;

    match serde_json::from_str(line.trim_end()).context("Malformed reply from pastenow")? {
        ControlReply::Ok { output } => Ok(Some(output)),
        ControlReply::Err { message } => Err(anyhow!(message)),
    }
}
