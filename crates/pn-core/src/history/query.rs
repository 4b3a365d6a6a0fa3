//! Search filter over history entries.

use crate::clipboard::ClipboardEntry;

use super::ordering::sort_canonical;

/// Returns the entries whose content contains `search`, ignoring case.
///
/// An empty `search` keeps every entry. The result is always re-sorted into
/// canonical order, whatever order `entries` arrived in.
pub fn filter_entries<'a, I>(entries: I, search: &str) -> Vec<ClipboardEntry>
where
    I: IntoIterator<Item = &'a ClipboardEntry>,
{
    let mut matched: Vec<ClipboardEntry> = if search.is_empty() {
        entries.into_iter().cloned().collect()
    } else {
        let needle = search.to_lowercase();
        entries
            .into_iter()
            .filter(|entry| entry.content_matches(&needle))
            .cloned()
            .collect()
    };
    sort_canonical(&mut matched);
    matched
}
