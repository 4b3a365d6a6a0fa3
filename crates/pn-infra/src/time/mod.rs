use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use pn_core::ports::ClockPort;

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }
}

/// Clock that never goes backwards.
///
/// Returns the larger of the wrapped clock's reading and the previous value,
/// starting from `floor_ms`. Capture timestamps taken from it are
/// non-decreasing even when the wall clock is adjusted.
pub struct MonotonicClock {
    inner: Arc<dyn ClockPort>,
    last_ms: AtomicI64,
}

impl MonotonicClock {
    pub fn new(inner: Arc<dyn ClockPort>, floor_ms: i64) -> Self {
        Self {
            inner,
            last_ms: AtomicI64::new(floor_ms),
        }
    }
}

impl ClockPort for MonotonicClock {
    fn now_ms(&self) -> i64 {
        let now = self.inner.now_ms();
        let previous = self.last_ms.fetch_max(now, Ordering::SeqCst);
        previous.max(now)
    }
}
