//! # pn-app
//!
//! Runs the clipboard history as a single-owner task. Captures from the
//! watcher and requests from the presentation layer all go through a
//! [`HistoryHandle`]; saves happen on a separate writer task.

mod builder;
mod error;
pub mod history;
pub mod usecases;

pub use builder::{HistoryEngine, HistoryEngineBuilder};
pub use error::EngineError;
pub use history::{CopyOutcome, HistoryEvent, HistoryHandle};
