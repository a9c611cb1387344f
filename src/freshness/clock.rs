use crate::model::Timestamp;
use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current time, in microseconds since the Unix epoch.
pub trait Clock: Send + Sync + Debug {
    fn now_micros(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| Timestamp::try_from(d.as_micros()).unwrap_or(Timestamp::MAX))
            .unwrap_or_default()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self { now: AtomicI64::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let by = Timestamp::try_from(by.as_micros()).unwrap_or(Timestamp::MAX);
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| Some(now.saturating_add(by)));
    }

    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(1_000);
        clock.advance(Duration::from_millis(2));
        assert_eq!(clock.now_micros(), 3_000);
        clock.set(10);
        assert_eq!(clock.now_micros(), 10);
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::new(Timestamp::MAX - 5);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now_micros(), Timestamp::MAX);
        clock.advance(Duration::MAX);
        assert_eq!(clock.now_micros(), Timestamp::MAX);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.now_micros() > 0);
    }
}
