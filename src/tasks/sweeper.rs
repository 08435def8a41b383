//! Stale Entry Sweeper
//!
//! Background task that periodically removes expired and version-stale
//! entries from a cache store.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Shortest interval the sweeper will tick at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

// == Sweeper ==
/// Handle to a running sweep task.
///
/// The task holds only a weak reference to the store and exits on its own
/// once the store is dropped. Dropping the handle cancels the task.
#[derive(Debug)]
pub struct Sweeper {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    // == Spawn ==
    /// Spawns the sweep loop on the current Tokio runtime.
    ///
    /// The first pass runs one `interval` after spawning. Sweeps never evict
    /// live entries.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime, like `tokio::spawn`.
    pub fn spawn<V>(store: Weak<Mutex<CacheStore<V>>>, interval: Duration) -> Self
    where
        V: Clone + Serialize + Send + 'static,
    {
        let interval = interval.max(MIN_INTERVAL);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            info!(interval_ms = interval.as_millis() as u64, "sweeper started");

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        info!("sweeper cancelled");
                        break;
                    }
                    _ = ticker.tick() => {}
                }

                let Some(store) = store.upgrade() else {
                    debug!("cache dropped, sweeper exiting");
                    break;
                };

                let removed = store.lock().sweep();
                debug!(removed, "sweep pass finished");
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    // == Is Running ==
    /// Returns true while the task has not finished.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Shutdown ==
    /// Cancels the task and waits for it to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("sweeper task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cache::{MockClock, NoopObserver};
    use crate::config::CacheConfig;

    fn shared_store(ttl: Duration) -> (Arc<Mutex<CacheStore<String>>>, MockClock) {
        let clock = MockClock::new();
        let store = CacheStore::with_parts(
            &CacheConfig::default().with_ttl(ttl),
            Arc::new(clock.clone()),
            Arc::new(NoopObserver),
        );
        (Arc::new(Mutex::new(store)), clock)
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let (store, clock) = shared_store(Duration::from_secs(1));
        store.lock().set("expire_soon", "value".to_string());

        let sweeper = Sweeper::spawn(Arc::downgrade(&store), Duration::from_millis(20));
        clock.advance(Duration::from_secs(2));

        // Wait for a few sweep passes
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(store.lock().len(), 0, "Expired entry should have been swept");
        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_sweeper_preserves_valid_entries() {
        let (store, _) = shared_store(Duration::from_secs(3600));
        store.lock().set("long_lived", "value".to_string());

        let sweeper = Sweeper::spawn(Arc::downgrade(&store), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(store.lock().get("long_lived"), Some("value".to_string()));
        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_sweeper_shutdown_stops_task() {
        let (store, _) = shared_store(Duration::from_secs(1));

        let sweeper = Sweeper::spawn(Arc::downgrade(&store), Duration::from_secs(60));
        assert!(sweeper.is_running());

        tokio::time::timeout(Duration::from_secs(1), sweeper.shutdown())
            .await
            .expect("shutdown should not wait for the next tick");
    }

    #[tokio::test]
    async fn test_sweeper_exits_when_store_dropped() {
        let (store, _) = shared_store(Duration::from_secs(1));

        let sweeper = Sweeper::spawn(Arc::downgrade(&store), Duration::from_millis(10));
        drop(store);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!sweeper.is_running(), "Sweeper should stop once the store is gone");
    }

    #[tokio::test]
    async fn test_sweeper_zero_interval_is_clamped() {
        let (store, clock) = shared_store(Duration::from_millis(10));
        store.lock().set("key", "value".to_string());

        let sweeper = Sweeper::spawn(Arc::downgrade(&store), Duration::ZERO);
        clock.advance(Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(store.lock().is_empty());
        sweeper.shutdown().await;
    }
}
