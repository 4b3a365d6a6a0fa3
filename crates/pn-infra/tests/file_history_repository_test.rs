//! File-backed history persistence, end to end.

use std::sync::Arc;

use pn_core::ports::HistoryPersistencePort;
use pn_core::{ClipboardEntry, EntryId, HistoryStore};
use pn_infra::{BlobHistoryRepository, FileBlobStorage};
use tempfile::TempDir;

/// Opens the directory afresh; drop the result before opening it again.
async fn repository(dir: &TempDir) -> BlobHistoryRepository {
    BlobHistoryRepository::new(Arc::new(
        FileBlobStorage::open(dir.path()).await.unwrap(),
    ))
}

#[tokio::test]
async fn first_run_loads_empty_history() {
    let dir = TempDir::new().unwrap();
    assert!(repository(&dir).await.load().await.is_empty());
}

#[tokio::test]
async fn history_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut store = HistoryStore::new();
    store.insert(ClipboardEntry::text("first", 1));
    store.insert(ClipboardEntry::image(vec![0x89, b'P', b'N', b'G', 0, 1], 2));
    let pinned = ClipboardEntry::text("keep me", 3);
    let pinned_id = pinned.id().clone();
    store.insert(pinned);
    store.toggle_pin(&pinned_id);
    let saved = store.snapshot();

    repository(&dir).await.save(&saved).await.unwrap();

    let restored = HistoryStore::restore(repository(&dir).await.load().await);
    assert_eq!(restored.snapshot(), saved);
    assert!(restored.requires_confirmation(&pinned_id));
}

#[tokio::test]
async fn corrupt_file_degrades_to_empty_history() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("clipboardHistory.json"), b"[{\"id\": 1").unwrap();

    assert!(repository(&dir).await.load().await.is_empty());
}

#[tokio::test]
async fn blob_written_matches_documented_shape() {
    let dir = TempDir::new().unwrap();
    let entry = ClipboardEntry::restore(EntryId::from("abc"), "hi".into(), None, 42, false);

    repository(&dir).await.save(&[entry]).await.unwrap();

    let raw = std::fs::read(dir.path().join("clipboardHistory.json")).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"id": "abc", "content": "hi", "timestamp": 42, "isPinned": false}])
    );
}
