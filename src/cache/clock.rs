//! Clock Module
//!
//! Time source abstraction so TTL behavior can be tested without sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

// == Clock Trait ==
/// Source of time for the cache.
///
/// `now` is monotonic and drives TTL checks. `wall_time` is only used for
/// reporting entry timestamps in statistics.
pub trait Clock: Send + Sync + 'static {
    /// Current monotonic instant.
    fn now(&self) -> Instant;

    /// Current wall-clock time.
    fn wall_time(&self) -> DateTime<Utc>;
}

// == System Clock ==
/// Real clock backed by `Instant::now` and `Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// == Mock Clock ==
/// Manually advanced clock for deterministic tests.
///
/// Clones share the same elapsed counter, so a test can keep one handle and
/// give another to the cache.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    start_wall: DateTime<Utc>,
    elapsed_ms: Arc<AtomicU64>,
}

impl MockClock {
    /// Creates a clock frozen at the current real time.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            start_wall: Utc::now(),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves the clock forward by `duration` (millisecond resolution).
    pub fn advance(&self, duration: Duration) {
        self.elapsed_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }

    /// Total time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::milliseconds(self.elapsed().as_millis() as i64);
        self.start_wall + elapsed
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock_starts_frozen() {
        let clock = MockClock::new();
        let a = clock.now();
        let b = clock.now();
        assert_eq!(a, b);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_mock_clock_advance() {
        let clock = MockClock::new();
        let start = clock.now();
        let start_wall = clock.wall_time();

        clock.advance(Duration::from_millis(1500));

        assert_eq!(clock.now().duration_since(start), Duration::from_millis(1500));
        assert_eq!((clock.wall_time() - start_wall).num_milliseconds(), 1500);
    }

    #[test]
    fn test_mock_clock_clones_share_time() {
        let clock = MockClock::new();
        let shared = clock.clone();

        clock.advance(Duration::from_secs(3));

        assert_eq!(shared.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
