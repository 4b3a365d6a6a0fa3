//! Canonical history ordering: pinned entries first, then newest first.

use std::cmp::Ordering;

use crate::clipboard::ClipboardEntry;

/// Compares two entries by the canonical rule.
///
/// Entries with equal pin state and timestamp compare as equal; callers rely
/// on a stable sort to keep their relative insertion order.
pub fn canonical_order(a: &ClipboardEntry, b: &ClipboardEntry) -> Ordering {
    b.is_pinned()
        .cmp(&a.is_pinned())
        .then_with(|| b.timestamp_ms().cmp(&a.timestamp_ms()))
}

/// Stable-sorts `entries` into canonical order.
pub fn sort_canonical(entries: &mut [ClipboardEntry]) {
    entries.sort_by(canonical_order);
}

/// Checks every adjacent pair against the canonical rule.
pub fn is_canonically_ordered(entries: &[ClipboardEntry]) -> bool {
    entries
        .windows(2)
        .all(|pair| canonical_order(&pair[0], &pair[1]) != Ordering::Greater)
}
