//! Cache Observer Module
//!
//! Event hooks the cache reports to. The cache depends on this capability
//! instead of logging directly.

use tracing::{debug, info};

use crate::cache::{Digest, Validity};

// == Observer Trait ==
/// Receives cache events. Every method defaults to a no-op.
///
/// Hooks run while the cache lock is held, so implementations must not call
/// back into the cache.
pub trait CacheObserver: Send + Sync + 'static {
    /// A read found a live entry.
    fn on_hit(&self, _key: &str) {}

    /// A read found nothing usable (absent or stale).
    fn on_miss(&self, _key: &str) {}

    /// An entry was written.
    fn on_insert(&self, _key: &str, _digest: Digest) {}

    /// An entry was evicted to respect capacity.
    fn on_evict(&self, _key: &str) {}

    /// A stale entry was removed by a read or a sweep.
    fn on_stale(&self, _key: &str, _reason: Validity) {}

    /// A sweep pass finished.
    fn on_sweep(&self, _removed: usize) {}

    /// The cache was cleared.
    fn on_clear(&self, _removed: usize) {}

    /// The cache version changed.
    fn on_version_change(&self, _previous: &str, _current: &str) {}
}

// == Noop Observer ==
/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CacheObserver for NoopObserver {}

// == Tracing Observer ==
/// Observer that forwards events to `tracing`.
///
/// Per-key traffic goes to `debug`, bulk operations to `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CacheObserver for TracingObserver {
    fn on_hit(&self, key: &str) {
        debug!(key, "cache hit");
    }

    fn on_miss(&self, key: &str) {
        debug!(key, "cache miss");
    }

    fn on_insert(&self, key: &str, digest: Digest) {
        debug!(key, %digest, "cache set");
    }

    fn on_evict(&self, key: &str) {
        debug!(key, "evicted least recently used entry");
    }

    fn on_stale(&self, key: &str, reason: Validity) {
        debug!(key, reason = reason.as_str(), "removed stale entry");
    }

    fn on_sweep(&self, removed: usize) {
        if removed > 0 {
            info!(removed, "sweep removed stale entries");
        } else {
            debug!("sweep found no stale entries");
        }
    }

    fn on_clear(&self, removed: usize) {
        info!(removed, "cache cleared");
    }

    fn on_version_change(&self, previous: &str, current: &str) {
        info!(previous, current, "cache version changed");
    }
}
