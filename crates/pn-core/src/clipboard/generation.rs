//! Clipboard generation tracking.
//!
//! A [`GenerationToken`] is an opaque value that changes whenever the system
//! clipboard is written. The watcher compares tokens between polls and only
//! inspects the clipboard when the token moved. Writes performed by the
//! engine itself (copy from history) are recorded with
//! [`GenerationTracker::mark_seen`] so the next poll does not treat them as a
//! new capture.

use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationToken(String);

impl GenerationToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GenerationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Last observed clipboard generation, shared by the watcher and the copy path.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    last: Mutex<Option<GenerationToken>>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `token` and reports whether it differs from the previous one.
    pub async fn observe(&self, token: &GenerationToken) -> bool {
        let mut last = self.last.lock().await;
        if last.as_ref() == Some(token) {
            return false;
        }
        *last = Some(token.clone());
        true
    }

    /// Records `token` as already seen without reporting a change.
    pub async fn mark_seen(&self, token: GenerationToken) {
        *self.last.lock().await = Some(token);
    }

    pub async fn last(&self) -> Option<GenerationToken> {
        self.last.lock().await.clone()
    }
}
