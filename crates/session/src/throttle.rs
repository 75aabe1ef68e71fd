//! Write throttling for progress synchronization.

use std::time::{Duration, Instant};

/// At most one persisted write per this interval per (user, media)
/// pair.
pub const SYNC_INTERVAL: Duration = Duration::from_secs(10);

/// Pure throttling check: a write is due when there is no previous
/// write or the interval has fully elapsed since it.
pub fn is_due(now: Instant, last_write: Option<Instant>, interval: Duration) -> bool {
    match last_write {
        None => true,
        Some(last) => now.saturating_duration_since(last) >= interval,
    }
}

/// Tracks the single scalar the throttle needs: the time of the last
/// successful write.
///
/// Observations below the interval are dropped, not queued; the next
/// eligible observation naturally carries the latest state ("last
/// write wins at the next eligible tick"). The caller records a write
/// only after it succeeded, so a failed write leaves the throttle
/// open for the next observation.
#[derive(Debug, Clone, Default)]
pub struct WriteThrottle {
    last_write: Option<Instant>,
}

impl WriteThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an observation at `now` should be written.
    pub fn is_due(&self, now: Instant, interval: Duration) -> bool {
        is_due(now, self.last_write, interval)
    }

    /// Record a successful write at `now`.
    pub fn record(&mut self, now: Instant) {
        self.last_write = Some(now);
    }
}
