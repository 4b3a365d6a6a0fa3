//! # pn-core
//!
//! Core domain models and history rules for pastenow.
//!
//! This crate contains the clipboard entry model, the history store with its
//! dedup and ordering rules, and the ports the engine depends on. It performs
//! no I/O.

pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod ids;
pub mod ports;

pub use clipboard::{ClipboardEntry, GenerationToken, GenerationTracker, IMAGE_PLACEHOLDER};
pub use config::AppConfig;
pub use history::{DeleteOutcome, HistoryStore, InsertOutcome, PinOutcome};
pub use ids::EntryId;
