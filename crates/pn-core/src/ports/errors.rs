use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard read failed: {0}")]
    Read(String),

    #[error("clipboard write failed: {0}")]
    Write(String),

    #[error("image conversion failed: {0}")]
    Image(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage at {path} is in use by another pastenow process")]
    InUse { path: String },

    #[error("failed to open storage at {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("storage read failed for key {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("storage write failed for key {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Failure to persist the history. Never fatal: the in-memory history stays
/// authoritative and the next mutation retries the save.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize history: {0}")]
    Serialization(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A persisted history that could not be decoded. Recovered by starting empty.
#[derive(Debug, Error)]
pub enum CorruptHistoryError {
    #[error("history payload is not valid: {0}")]
    Malformed(String),

    #[error("entry {id} carries undecodable image data: {reason}")]
    InvalidImageData { id: String, reason: String },
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory unavailable")]
    DataLocalDirUnavailable,
}
