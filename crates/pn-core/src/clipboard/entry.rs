use crate::ids::EntryId;

/// Label stored as `content` for image captures.
pub const IMAGE_PLACEHOLDER: &str = "[Image]";

/// One recorded clipboard capture.
///
/// `content` holds the captured text, or [`IMAGE_PLACEHOLDER`] when the
/// capture is an image. `image_bytes` holds the PNG encoding of the image and
/// is `None` for text captures.
///
/// `PartialEq` compares every field. Use [`ClipboardEntry::is_same_capture`]
/// for the deduplication rule, which ignores `id` and `timestamp_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    id: EntryId,
    content: String,
    image_bytes: Option<Vec<u8>>,
    timestamp_ms: i64,
    is_pinned: bool,
}

impl ClipboardEntry {
    /// Builds a new unpinned text capture with a fresh id.
    pub fn text(content: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            id: EntryId::new(),
            content: content.into(),
            image_bytes: None,
            timestamp_ms,
            is_pinned: false,
        }
    }

    /// Builds a new unpinned image capture with a fresh id.
    pub fn image(png_bytes: Vec<u8>, timestamp_ms: i64) -> Self {
        Self {
            id: EntryId::new(),
            content: IMAGE_PLACEHOLDER.to_string(),
            image_bytes: Some(png_bytes),
            timestamp_ms,
            is_pinned: false,
        }
    }

    /// Rebuilds an entry from persisted fields.
    pub fn restore(
        id: EntryId,
        content: String,
        image_bytes: Option<Vec<u8>>,
        timestamp_ms: i64,
        is_pinned: bool,
    ) -> Self {
        Self {
            id,
            content,
            image_bytes,
            timestamp_ms,
            is_pinned,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn image_bytes(&self) -> Option<&[u8]> {
        self.image_bytes.as_deref()
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    /// Flips the pin flag and returns the new value.
    pub(crate) fn toggle_pin(&mut self) -> bool {
        self.is_pinned = !self.is_pinned;
        self.is_pinned
    }

    pub fn is_image(&self) -> bool {
        self.image_bytes.is_some()
    }

    /// Two entries are the same capture when content and image bytes match.
    pub fn is_same_capture(&self, other: &ClipboardEntry) -> bool {
        self.content == other.content && self.image_bytes == other.image_bytes
    }

    /// Case-insensitive substring match on `content`.
    ///
    /// `needle_lower` must already be lowercased.
    pub(crate) fn content_matches(&self, needle_lower: &str) -> bool {
        self.content.to_lowercase().contains(needle_lower)
    }
}
