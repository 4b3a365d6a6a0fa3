//! In-memory clipboard history.
//!
//! The store owns the entry sequence and keeps it in canonical order after
//! every mutation. Each slot carries an insertion sequence number so entries
//! with equal pin state and timestamp keep a stable, total order: the later
//! insertion comes first.

use std::cmp::Reverse;

use tracing::warn;

use crate::clipboard::ClipboardEntry;
use crate::ids::EntryId;

use super::query::filter_entries;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(EntryId),
    /// A same-capture entry already exists; carries its id.
    Duplicate(EntryId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutcome {
    Toggled { pinned: bool },
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(ClipboardEntry),
    NotFound,
}

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    entry: ClipboardEntry,
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    slots: Vec<Slot>,
    next_seq: u64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a persisted sequence.
    ///
    /// Earlier positions count as later insertions when timestamps tie. The
    /// sequence is put in canonical order first; an entry repeating an id or
    /// a capture that comes before it in that order is dropped.
    pub fn restore(entries: Vec<ClipboardEntry>) -> Self {
        let total = entries.len() as u64;
        let mut candidates = Self {
            slots: entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| Slot {
                    seq: total - index as u64,
                    entry,
                })
                .collect(),
            next_seq: total,
        };
        candidates.sort();

        let mut store = Self {
            slots: Vec::with_capacity(candidates.slots.len()),
            next_seq: total,
        };
        for slot in candidates.slots {
            if store.position(slot.entry.id()).is_some() {
                warn!(entry_id = %slot.entry.id(), "Dropping restored entry with duplicate id");
                continue;
            }
            if store.find_same_capture(&slot.entry).is_some() {
                warn!(entry_id = %slot.entry.id(), "Dropping restored entry with duplicate content");
                continue;
            }
            store.slots.push(slot);
        }
        store
    }

    /// Adds `entry` unless a same-capture entry already exists.
    pub fn insert(&mut self, entry: ClipboardEntry) -> InsertOutcome {
        if let Some(existing) = self.find_same_capture(&entry) {
            return InsertOutcome::Duplicate(existing.id().clone());
        }

        self.next_seq += 1;
        let id = entry.id().clone();
        self.slots.push(Slot {
            seq: self.next_seq,
            entry,
        });
        self.sort();
        InsertOutcome::Inserted(id)
    }

    pub fn toggle_pin(&mut self, id: &EntryId) -> PinOutcome {
        let Some(index) = self.position(id) else {
            return PinOutcome::NotFound;
        };
        let pinned = self.slots[index].entry.toggle_pin();
        self.sort();
        PinOutcome::Toggled { pinned }
    }

    /// Whether deleting `id` needs the caller to confirm first.
    ///
    /// True only for pinned entries; unknown ids need no confirmation.
    pub fn requires_confirmation(&self, id: &EntryId) -> bool {
        self.get(id).is_some_and(ClipboardEntry::is_pinned)
    }

    /// Removes the entry, pinned or not.
    pub fn delete(&mut self, id: &EntryId) -> DeleteOutcome {
        match self.position(id) {
            Some(index) => DeleteOutcome::Deleted(self.slots.remove(index).entry),
            None => DeleteOutcome::NotFound,
        }
    }

    /// Empties the store, pinned entries included. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.slots.len();
        self.slots.clear();
        removed
    }

    pub fn get(&self, id: &EntryId) -> Option<&ClipboardEntry> {
        self.slots
            .iter()
            .map(|slot| &slot.entry)
            .find(|entry| entry.id() == id)
    }

    /// Entries in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = &ClipboardEntry> {
        self.slots.iter().map(|slot| &slot.entry)
    }

    /// Owned copy of the canonical sequence, as persisted.
    pub fn snapshot(&self) -> Vec<ClipboardEntry> {
        self.entries().cloned().collect()
    }

    pub fn filtered(&self, search: &str) -> Vec<ClipboardEntry> {
        filter_entries(self.entries(), search)
    }

    pub fn latest_timestamp_ms(&self) -> Option<i64> {
        self.entries().map(ClipboardEntry::timestamp_ms).max()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.entry.id() == id)
    }

    fn find_same_capture(&self, entry: &ClipboardEntry) -> Option<&ClipboardEntry> {
        self.entries().find(|existing| existing.is_same_capture(entry))
    }

    fn sort(&mut self) {
        self.slots.sort_by_key(|slot| {
            (
                Reverse(slot.entry.is_pinned()),
                Reverse(slot.entry.timestamp_ms()),
                Reverse(slot.seq),
            )
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ordering::is_canonically_ordered;

    fn inserted_id(outcome: InsertOutcome) -> EntryId {
        match outcome {
            InsertOutcome::Inserted(id) => id,
            InsertOutcome::Duplicate(id) => panic!("unexpected duplicate of {id}"),
        }
    }

    fn contents(store: &HistoryStore) -> Vec<String> {
        store.entries().map(|e| e.content().to_string()).collect()
    }

    #[test]
    fn insert_prepends_newest() {
        let mut store = HistoryStore::new();
        store.insert(ClipboardEntry::text("a", 1));
        store.insert(ClipboardEntry::text("b", 2));
        assert_eq!(contents(&store), vec!["b", "a"]);
    }

    #[test]
    fn duplicate_insert_keeps_original() {
        let mut store = HistoryStore::new();
        let id = inserted_id(store.insert(ClipboardEntry::text("hello", 1)));

        let outcome = store.insert(ClipboardEntry::text("hello", 2));

        assert_eq!(outcome, InsertOutcome::Duplicate(id.clone()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).map(ClipboardEntry::timestamp_ms), Some(1));
    }

    #[test]
    fn duplicate_of_pinned_entry_is_rejected() {
        let mut store = HistoryStore::new();
        let id = inserted_id(store.insert(ClipboardEntry::text("keep", 1)));
        store.toggle_pin(&id);
        store.insert(ClipboardEntry::text("other", 2));

        let outcome = store.insert(ClipboardEntry::text("keep", 3));

        assert_eq!(outcome, InsertOutcome::Duplicate(id));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn duplicate_image_is_rejected() {
        let mut store = HistoryStore::new();
        store.insert(ClipboardEntry::image(vec![1, 2, 3], 1));
        let outcome = store.insert(ClipboardEntry::image(vec![1, 2, 3], 2));
        assert!(matches!(outcome, InsertOutcome::Duplicate(_)));
        assert!(matches!(
            store.insert(ClipboardEntry::image(vec![9], 3)),
            InsertOutcome::Inserted(_)
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn toggle_pin_moves_entry_to_front() {
        let mut store = HistoryStore::new();
        let old = inserted_id(store.insert(ClipboardEntry::text("old", 1)));
        store.insert(ClipboardEntry::text("new", 2));

        assert_eq!(store.toggle_pin(&old), PinOutcome::Toggled { pinned: true });

        assert_eq!(contents(&store), vec!["old", "new"]);
        assert!(is_canonically_ordered(&store.snapshot()));
    }

    #[test]
    fn toggle_pin_unknown_id_is_not_found() {
        let mut store = HistoryStore::new();
        store.insert(ClipboardEntry::text("a", 1));
        assert_eq!(store.toggle_pin(&EntryId::new()), PinOutcome::NotFound);
    }

    #[test]
    fn double_toggle_restores_position_with_tied_timestamps() {
        let mut store = HistoryStore::new();
        store.insert(ClipboardEntry::text("a", 5));
        let b = inserted_id(store.insert(ClipboardEntry::text("b", 5)));
        store.insert(ClipboardEntry::text("c", 5));
        let before = store.snapshot();

        store.toggle_pin(&b);
        store.toggle_pin(&b);

        assert_eq!(store.snapshot(), before);
        assert_eq!(contents(&store), vec!["c", "b", "a"]);
    }

    #[test]
    fn confirmation_required_only_for_pinned() {
        let mut store = HistoryStore::new();
        let id = inserted_id(store.insert(ClipboardEntry::text("a", 1)));
        assert!(!store.requires_confirmation(&id));
        store.toggle_pin(&id);
        assert!(store.requires_confirmation(&id));
        assert!(!store.requires_confirmation(&EntryId::new()));
    }

    #[test]
    fn delete_removes_pinned_entry_unconditionally() {
        let mut store = HistoryStore::new();
        let id = inserted_id(store.insert(ClipboardEntry::text("a", 1)));
        store.toggle_pin(&id);

        match store.delete(&id) {
            DeleteOutcome::Deleted(entry) => assert_eq!(entry.id(), &id),
            DeleteOutcome::NotFound => panic!("entry should exist"),
        }
        assert!(store.is_empty());
        assert_eq!(store.delete(&id), DeleteOutcome::NotFound);
    }

    #[test]
    fn clear_all_removes_pinned_too() {
        let mut store = HistoryStore::new();
        let id = inserted_id(store.insert(ClipboardEntry::text("a", 1)));
        store.toggle_pin(&id);
        store.insert(ClipboardEntry::text("b", 2));

        assert_eq!(store.clear_all(), 2);
        assert!(store.is_empty());
        assert!(store.filtered("").is_empty());
    }

    #[test]
    fn restore_sorts_and_drops_duplicates() {
        let a = ClipboardEntry::text("a", 1);
        let same_id = ClipboardEntry::restore(a.id().clone(), "x".into(), None, 7, false);
        let same_content = ClipboardEntry::text("a", 9);
        let pinned = ClipboardEntry::restore(EntryId::new(), "p".into(), None, 0, true);

        let store = HistoryStore::restore(vec![a, same_id, same_content, pinned]);

        // Canonical order is p, a@9, x@7, a@1; the last repeats x's id.
        assert_eq!(contents(&store), vec!["p", "a", "x"]);
        assert_eq!(
            store.entries().map(ClipboardEntry::timestamp_ms).collect::<Vec<_>>(),
            vec![0, 9, 7]
        );
    }

    #[test]
    fn restore_keeps_first_duplicate_in_canonical_order() {
        let older = ClipboardEntry::text("same", 1);
        let pinned = ClipboardEntry::restore(EntryId::new(), "same".into(), None, 5, true);
        let pinned_id = pinned.id().clone();

        // Persisted out of canonical order: the unpinned copy comes first.
        let store = HistoryStore::restore(vec![older, pinned]);

        assert_eq!(store.len(), 1);
        let kept = store.entries().next().unwrap();
        assert_eq!(kept.id(), &pinned_id);
        assert!(kept.is_pinned());
    }

    #[test]
    fn restore_keeps_persisted_order_for_ties() {
        let first = ClipboardEntry::text("first", 3);
        let second = ClipboardEntry::text("second", 3);
        let mut store = HistoryStore::restore(vec![first, second]);
        store.insert(ClipboardEntry::text("third", 3));
        assert_eq!(contents(&store), vec!["third", "first", "second"]);
    }

    #[test]
    fn latest_timestamp_tracks_max() {
        let mut store = HistoryStore::new();
        assert_eq!(store.latest_timestamp_ms(), None);
        store.insert(ClipboardEntry::text("a", 4));
        store.insert(ClipboardEntry::text("b", 2));
        assert_eq!(store.latest_timestamp_ms(), Some(4));
    }

    #[test]
    fn walkthrough_hello_world() {
        let mut store = HistoryStore::new();
        let hello = inserted_id(store.insert(ClipboardEntry::text("hello", 1)));
        assert!(matches!(
            store.insert(ClipboardEntry::text("hello", 2)),
            InsertOutcome::Duplicate(_)
        ));
        assert_eq!(store.get(&hello).map(ClipboardEntry::timestamp_ms), Some(1));

        store.toggle_pin(&hello);
        assert_eq!(store.len(), 1);

        store.insert(ClipboardEntry::text("world", 3));
        let view = store.filtered("");
        assert_eq!(view[0].content(), "hello");
        assert!(view[0].is_pinned());
        assert_eq!(view[1].content(), "world");
        assert!(!view[1].is_pinned());

        let found = store.filtered("wor");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].content(), "world");

        store.clear_all();
        assert!(store.filtered("").is_empty());
    }
}
