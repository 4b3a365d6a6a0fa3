//! Command-line shell over the history engine.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use pn_app::{CopyOutcome, HistoryHandle};
use pn_core::ports::SystemClipboardPort;
use pn_core::{ClipboardEntry, DeleteOutcome, EntryId, PinOutcome};
use pn_platform::ArboardClipboard;
use serde::{Deserialize, Serialize};

use crate::bootstrap::{run_daemon, start_engine, Settings};

const PREVIEW_CHARS: usize = 60;

#[derive(Parser, Debug)]
#[command(
    name = "pastenow",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clipboard history manager"
)]
pub struct Cli {
    /// Config file. Defaults to config.toml in the app data directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Watch the clipboard and record history until Ctrl-C (default).
    Run,
    /// Print history, pinned entries first.
    List {
        /// Only entries containing this text, ignoring case.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Put an entry back on the clipboard.
    Copy { id: String },
    /// Pin or unpin an entry.
    Pin { id: String },
    /// Delete an entry. Pinned entries need --yes.
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete every entry, pinned ones included. Needs --yes.
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

/// Run `command` against the history stored under `settings`.
///
/// One-shot commands go to a running `pastenow run` when there is one, so
/// the history keeps a single owner. Otherwise they open the history here.
pub async fn run_command(command: Command, settings: &Settings) -> anyhow::Result<()> {
    if command == Command::Run {
        return run_daemon(settings).await;
    }

    #[cfg(unix)]
    if let Some(output) = crate::bootstrap::try_forward(&settings.data_dir, &command).await? {
        print!("{output}");
        return Ok(());
    }

    // Nobody else owns this selection afterwards, so the write holds it.
    let clipboard = match command {
        Command::Copy { .. } => Some(Arc::new(
            ArboardClipboard::new()
                .context("Failed to open system clipboard")?
                .holding_selection(),
        ) as Arc<dyn SystemClipboardPort>),
        _ => None,
    };

    let engine = start_engine(settings, clipboard).await?;
    let result = execute(&engine.handle(), command, &mut io::stdout()).await;
    engine
        .shutdown()
        .await
        .context("History engine did not stop cleanly")?;
    result
}

/// Apply a one-shot command and print its result to `out`.
pub async fn execute(
    history: &HistoryHandle,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Run => bail!("`run` is not a one-shot command"),
        Command::List { search } => {
            let entries = history.filtered(search.as_deref().unwrap_or("")).await?;
            for entry in &entries {
                writeln!(out, "{}", format_entry(entry))?;
            }
        }
        Command::Copy { id } => {
            let id = EntryId::from(id);
            match history.copy(&id).await? {
                CopyOutcome::Copied => writeln!(out, "Copied {id}")?,
                CopyOutcome::NotFound => bail!("No entry with id {id}"),
            }
        }
        Command::Pin { id } => {
            let id = EntryId::from(id);
            match history.toggle_pin(&id).await? {
                PinOutcome::Toggled { pinned: true } => writeln!(out, "Pinned {id}")?,
                PinOutcome::Toggled { pinned: false } => writeln!(out, "Unpinned {id}")?,
                PinOutcome::NotFound => bail!("No entry with id {id}"),
            }
        }
        Command::Delete { id, yes } => {
            let id = EntryId::from(id);
            if history.requires_confirmation(&id).await? && !yes {
                bail!("Entry {id} is pinned; pass --yes to delete it");
            }
            match history.delete(&id).await? {
                DeleteOutcome::Deleted(_) => writeln!(out, "Deleted {id}")?,
                DeleteOutcome::NotFound => bail!("No entry with id {id}"),
            }
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("Clearing removes pinned entries too; pass --yes to confirm");
            }
            let removed = history.clear_all().await?;
            writeln!(out, "Removed {removed} entries")?;
        }
    }
    history.flush().await?;
    Ok(())
}

/// One line per entry: pin marker, id, local time, first line of content.
pub fn format_entry(entry: &ClipboardEntry) -> String {
    let marker = if entry.is_pinned() { '*' } else { ' ' };
    let when = DateTime::from_timestamp_millis(entry.timestamp_ms())
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| entry.timestamp_ms().to_string());
    format!("{marker} {}  {when}  {}", entry.id(), preview(entry))
}

fn preview(entry: &ClipboardEntry) -> String {
    if let Some(png) = entry.image_bytes() {
        return format!("{} ({} bytes)", entry.content(), png.len());
    }
    let first_line = entry.content().lines().next().unwrap_or("");
    let mut text: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS || entry.content().lines().nth(1).is_some() {
        text.push('…');
    }
    text
}
