//! Shared Cache Handle
//!
//! Thread-safe, cloneable front for a [`CacheStore`] that also owns the
//! background sweeper.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use crate::cache::{CacheObserver, CacheStats, CacheStore, Clock, Digest, NoopObserver, SystemClock};
use crate::config::CacheConfig;
use crate::tasks::Sweeper;

// == Cache ==
/// Explicitly owned cache instance.
///
/// Clones share the same store. One exclusive lock guards the entries, the
/// recency stamps and the logical clock, so a reader never observes a
/// half-evicted entry. No operation suspends while holding it.
///
/// The sweeper is started with [`Cache::start_sweeper`] and stopped with
/// [`Cache::shutdown`]. Dropping the last clone also stops it.
pub struct Cache<V> {
    inner: Arc<Inner<V>>,
}

struct Inner<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    sweeper: Mutex<Option<Sweeper>>,
    sweep_interval: Duration,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> std::fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("store", &*self.inner.store.lock())
            .field("sweep_interval", &self.inner.sweep_interval)
            .finish()
    }
}

impl<V> Cache<V>
where
    V: Clone + Serialize + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache with the system clock and no observer.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_parts(config, Arc::new(SystemClock), Arc::new(NoopObserver))
    }

    /// Creates a cache reporting to `observer`.
    pub fn with_observer(config: CacheConfig, observer: Arc<dyn CacheObserver>) -> Self {
        Self::with_parts(config, Arc::new(SystemClock), observer)
    }

    /// Creates a cache with an explicit clock and observer.
    pub fn with_parts(
        config: CacheConfig,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn CacheObserver>,
    ) -> Self {
        let store = CacheStore::with_parts(&config, clock, observer);
        Self {
            inner: Arc::new(Inner {
                store: Arc::new(Mutex::new(store)),
                sweeper: Mutex::new(None),
                sweep_interval: config.sweep_interval,
            }),
        }
    }

    // == Cache Operations ==
    /// Stores `payload` under `key`. See [`CacheStore::set`].
    pub fn set(&self, key: impl Into<String>, payload: V) {
        self.inner.store.lock().set(key, payload);
    }

    /// Returns a copy of the live payload under `key`.
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.store.lock().get(key)
    }

    /// Returns whether a live entry exists, without touching recency.
    pub fn has(&self, key: &str) -> bool {
        self.inner.store.lock().has(key)
    }

    /// Removes `key`. Returns whether an entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.store.lock().delete(key)
    }

    /// Removes every entry and resets the recency clock.
    pub fn clear(&self) {
        self.inner.store.lock().clear();
    }

    /// Number of stored entries, stale ones included.
    pub fn size(&self) -> usize {
        self.inner.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.store.lock().is_empty()
    }

    /// Removes every stale entry now. Returns the number removed.
    pub fn sweep(&self) -> usize {
        self.inner.store.lock().sweep()
    }

    /// Read-only statistics snapshot.
    pub fn stats(&self) -> CacheStats {
        self.inner.store.lock().stats()
    }

    /// Digest of the live entry under `key`.
    pub fn digest_of(&self, key: &str) -> Option<Digest> {
        self.inner.store.lock().digest_of(key)
    }

    // == Version ==
    pub fn version(&self) -> String {
        self.inner.store.lock().version().to_string()
    }

    /// Replaces the version tag, lazily invalidating every existing entry.
    /// Returns whether the tag changed.
    pub fn set_version(&self, version: impl Into<String>) -> bool {
        self.inner.store.lock().set_version(version)
    }

    // == Configuration ==
    pub fn capacity(&self) -> usize {
        self.inner.store.lock().capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.store.lock().ttl()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.inner.sweep_interval
    }

    // == Sweeper Lifecycle ==
    /// Starts the periodic sweeper. Returns false if one is already running.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn start_sweeper(&self) -> bool {
        let mut slot = self.inner.sweeper.lock();
        if slot.as_ref().is_some_and(Sweeper::is_running) {
            return false;
        }
        *slot = Some(Sweeper::spawn(
            Arc::downgrade(&self.inner.store),
            self.inner.sweep_interval,
        ));
        true
    }

    pub fn is_sweeper_running(&self) -> bool {
        self.inner
            .sweeper
            .lock()
            .as_ref()
            .is_some_and(Sweeper::is_running)
    }

    /// Stops the sweeper and waits for it to exit. Safe to call repeatedly.
    ///
    /// The cache stays usable afterwards; only background sweeping stops.
    pub async fn shutdown(&self) {
        let sweeper = self.inner.sweeper.lock().take();
        if let Some(sweeper) = sweeper {
            sweeper.shutdown().await;
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MockClock;

    fn mock_cache(capacity: usize, ttl_ms: u64) -> (Cache<String>, MockClock) {
        let clock = MockClock::new();
        let config = CacheConfig::default()
            .with_capacity(capacity)
            .with_ttl(Duration::from_millis(ttl_ms))
            .with_sweep_interval(Duration::from_millis(10));
        let cache = Cache::with_parts(config, Arc::new(clock.clone()), Arc::new(NoopObserver));
        (cache, clock)
    }

    #[test]
    fn test_cache_clones_share_store() {
        let (cache, _) = mock_cache(10, 1000);
        let other = cache.clone();

        cache.set("key", "value".to_string());

        assert_eq!(other.get("key"), Some("value".to_string()));
        assert_eq!(other.size(), 1);
    }

    #[test]
    fn test_cache_configuration_accessors() {
        let (cache, _) = mock_cache(42, 1500);

        assert_eq!(cache.capacity(), 42);
        assert_eq!(cache.ttl(), Duration::from_millis(1500));
        assert_eq!(cache.sweep_interval(), Duration::from_millis(10));
        assert_eq!(cache.version(), "1");
    }

    #[test]
    fn test_cache_manual_sweep() {
        let (cache, clock) = mock_cache(10, 1000);
        cache.set("a", "1".to_string());
        cache.set("b", "2".to_string());

        clock.advance(Duration::from_millis(1001));

        assert_eq!(cache.sweep(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_concurrent_writers_respect_capacity() {
        let (cache, _) = mock_cache(16, 60_000);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..200 {
                        cache.set(format!("t{t}-k{i}"), format!("v{i}"));
                        cache.get(&format!("t{t}-k{}", i / 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.size(), 16);
        let stats = cache.stats();
        assert_eq!(stats.total_entries, 16);
        assert_eq!(stats.valid_entries, 16);
    }

    #[tokio::test]
    async fn test_cache_start_sweeper_is_idempotent() {
        let (cache, _) = mock_cache(10, 1000);

        assert!(cache.start_sweeper());
        assert!(!cache.start_sweeper());
        assert!(cache.is_sweeper_running());

        cache.shutdown().await;
        assert!(!cache.is_sweeper_running());

        // Can be restarted after shutdown
        assert!(cache.start_sweeper());
        cache.shutdown().await;
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_cache_sweeper_removes_stale_entries() {
        let (cache, clock) = mock_cache(10, 1000);
        cache.set("a", "1".to_string());
        cache.start_sweeper();

        clock.advance(Duration::from_secs(2));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(cache.size(), 0);
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_cache_usable_after_shutdown() {
        let (cache, _) = mock_cache(10, 1000);
        cache.start_sweeper();
        cache.shutdown().await;

        cache.set("a", "1".to_string());
        assert_eq!(cache.get("a"), Some("1".to_string()));
    }
}
