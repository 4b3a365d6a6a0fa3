//! # pn-infra
//!
//! Persistence and infrastructure adapters for pastenow: the JSON history
//! codec, the blob-backed history repository, blob storage backends and
//! clocks.

pub mod history;
pub mod storage;
pub mod time;

pub use history::{BlobHistoryRepository, HISTORY_KEY};
pub use storage::{FileBlobStorage, InMemoryBlobStorage};
pub use time::{MonotonicClock, SystemClock};
