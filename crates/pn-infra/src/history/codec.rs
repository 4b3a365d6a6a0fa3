//! JSON encoding of the persisted history.
//!
//! The payload is a JSON array of objects with the fields `id`, `content`,
//! `timestamp` (milliseconds since the Unix epoch), `imageData` (standard
//! base64 of the PNG bytes, omitted for text entries) and `isPinned`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pn_core::ids::EntryId;
use pn_core::ports::{CorruptHistoryError, PersistenceError};
use pn_core::ClipboardEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedEntry {
    id: String,
    content: String,
    timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_data: Option<String>,
    #[serde(default)]
    is_pinned: bool,
}

impl From<&ClipboardEntry> for PersistedEntry {
    fn from(entry: &ClipboardEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            content: entry.content().to_string(),
            timestamp: entry.timestamp_ms(),
            image_data: entry.image_bytes().map(|bytes| STANDARD.encode(bytes)),
            is_pinned: entry.is_pinned(),
        }
    }
}

impl TryFrom<PersistedEntry> for ClipboardEntry {
    type Error = CorruptHistoryError;

    fn try_from(persisted: PersistedEntry) -> Result<Self, Self::Error> {
        let image_bytes = persisted
            .image_data
            .map(|encoded| {
                STANDARD
                    .decode(encoded)
                    .map_err(|e| CorruptHistoryError::InvalidImageData {
                        id: persisted.id.clone(),
                        reason: e.to_string(),
                    })
            })
            .transpose()?;

        Ok(ClipboardEntry::restore(
            EntryId::from_string(persisted.id),
            persisted.content,
            image_bytes,
            persisted.timestamp,
            persisted.is_pinned,
        ))
    }
}

pub fn encode_history(entries: &[ClipboardEntry]) -> Result<Vec<u8>, PersistenceError> {
    let persisted: Vec<PersistedEntry> = entries.iter().map(PersistedEntry::from).collect();
    serde_json::to_vec(&persisted).map_err(|e| PersistenceError::Serialization(e.to_string()))
}

pub fn decode_history(bytes: &[u8]) -> Result<Vec<ClipboardEntry>, CorruptHistoryError> {
    let persisted: Vec<PersistedEntry> =
        serde_json::from_slice(bytes).map_err(|e| CorruptHistoryError::Malformed(e.to_string()))?;
    persisted.into_iter().map(ClipboardEntry::try_from).collect()
}
