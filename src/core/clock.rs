//! Time sources for the controller.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock. It can jump backwards, which the controller tolerates.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock. Clones share the same time.
///
/// # Example
///
/// ```rust
/// use action_feedback::core::{Clock, ManualClock};
///
/// let clock = ManualClock::at_epoch();
/// let handle = clock.clone();
/// handle.advance_ms(250);
/// assert_eq!(clock.elapsed_ms(), 250);
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: DateTime<Utc>,
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            origin: start,
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn at_epoch() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.now.lock() = time;
    }

    /// Move time forward (or backward, for negative values).
    pub fn advance_ms(&self, ms: i64) {
        let mut now = self.now.lock();
        *now += Duration::milliseconds(ms);
    }

    /// Move time to `ms` milliseconds after the clock's origin.
    pub fn set_ms(&self, ms: i64) {
        self.set(self.origin + Duration::milliseconds(ms));
    }

    /// Milliseconds since the clock's origin.
    pub fn elapsed_ms(&self) -> i64 {
        (self.now() - self.origin).num_milliseconds()
    }

    /// Convert an absolute time to milliseconds since the clock's origin.
    pub fn offset_ms(&self, time: DateTime<Utc>) -> i64 {
        (time - self.origin).num_milliseconds()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
