//! Cache Store Module
//!
//! Single-owner cache engine combining the entry map, recency tracking,
//! capacity eviction and the staleness check. Shared access goes through
//! [`crate::cache::Cache`], which wraps this type in a lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{
    CacheCounters, CacheEntry, CacheObserver, CacheStats, Clock, Digest, NoopObserver,
    RecencyTracker, SystemClock, Validity,
};
use crate::config::CacheConfig;

// == Cache Store ==
/// Bounded map with LRU eviction, TTL expiry and version invalidation.
///
/// Every operation is total: misses, expired entries and version mismatches
/// all surface as `None`/`false`.
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency stamps, same key set as `entries`
    recency: RecencyTracker,
    /// Traffic counters
    counters: CacheCounters,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum entry age
    ttl: Duration,
    /// Current version tag
    version: String,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn CacheObserver>,
}

impl<V> std::fmt::Debug for CacheStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("version", &self.version)
            .field("counters", &self.counters)
            .finish()
    }
}

impl<V: Clone + Serialize> CacheStore<V> {
    // == Constructor ==
    /// Creates a store using the system clock and no observer.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_parts(config, Arc::new(SystemClock), Arc::new(NoopObserver))
    }

    /// Creates a store with an explicit clock and observer.
    pub fn with_parts(
        config: &CacheConfig,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn CacheObserver>,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyTracker::new(),
            counters: CacheCounters::new(),
            capacity: config.capacity,
            ttl: config.ttl,
            version: config.version.clone(),
            clock,
            observer,
        }
    }

    // == Set ==
    /// Stores `payload` under `key`, replacing any previous entry.
    ///
    /// The entry is stamped with the current time and version and becomes
    /// the most recently used key. If the store then holds more than
    /// `capacity` entries, the least recently used one is evicted. With a
    /// capacity of zero that is the entry just written.
    pub fn set(&mut self, key: impl Into<String>, payload: V) {
        let key = key.into();
        let entry = CacheEntry::new(
            payload,
            self.clock.now(),
            self.clock.wall_time(),
            self.version.as_str(),
        );
        let digest = entry.digest;

        self.entries.insert(key.clone(), entry);
        self.recency.touch(&key);
        self.observer.on_insert(&key, digest);

        if self.entries.len() > self.capacity {
            self.evict_one();
        }
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key` if it is live.
    ///
    /// A stale entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.check(key) {
            Some(Validity::Live) => {}
            Some(reason) => {
                self.remove_stale(key, reason);
                self.counters.record_miss();
                self.observer.on_miss(key);
                return None;
            }
            None => {
                self.counters.record_miss();
                self.observer.on_miss(key);
                return None;
            }
        }

        let payload = self.entries.get(key)?.payload.clone();
        self.recency.touch(key);
        self.counters.record_hit();
        self.observer.on_hit(key);
        Some(payload)
    }

    // == Has ==
    /// Returns whether `get(key)` would return a payload.
    ///
    /// Does not advance recency or the hit/miss counters, but does remove
    /// the entry if it is found stale.
    pub fn has(&mut self, key: &str) -> bool {
        match self.check(key) {
            Some(Validity::Live) => true,
            Some(reason) => {
                self.remove_stale(key, reason);
                false
            }
            None => false,
        }
    }

    // == Digest Of ==
    /// Digest of the live entry under `key`, without touching recency.
    pub fn digest_of(&self, key: &str) -> Option<Digest> {
        let entry = self.entries.get(key)?;
        entry
            .is_live(&self.version, self.ttl, self.clock.now())
            .then_some(entry.digest)
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.recency.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes every entry and resets the recency clock.
    ///
    /// Configuration, version and traffic counters are kept.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.recency.clear();
        self.observer.on_clear(removed);
    }

    // == Sweep ==
    /// Removes every stale entry. Returns the number removed.
    ///
    /// Live entries are never touched, whatever the store size.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now();
        let stale: Vec<(String, Validity)> = self
            .entries
            .iter()
            .filter_map(|(key, entry)| {
                let validity = entry.validity(&self.version, self.ttl, now);
                (!validity.is_live()).then(|| (key.clone(), validity))
            })
            .collect();

        let count = stale.len();
        for (key, reason) in stale {
            self.remove_stale(&key, reason);
        }

        self.observer.on_sweep(count);
        count
    }

    // == Stats ==
    /// Read-only snapshot of the store.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let valid_entries = self
            .entries
            .values()
            .filter(|entry| entry.is_live(&self.version, self.ttl, now))
            .count();
        let oldest_entry_time = self.entries.values().map(|e| e.inserted_wall).min();
        let newest_entry_time = self.entries.values().map(|e| e.inserted_wall).max();

        CacheStats {
            total_entries: self.entries.len(),
            valid_entries,
            expired_entries: self.entries.len() - valid_entries,
            capacity: self.capacity,
            ttl_ms: self.ttl.as_millis() as u64,
            version: self.version.clone(),
            oldest_entry_time,
            newest_entry_time,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
            stale_removals: self.counters.stale_removals,
            hit_rate: self.counters.hit_rate(),
        }
    }

    // == Version ==
    /// Current version tag.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Replaces the version tag. Returns whether it changed.
    ///
    /// Existing entries are not visited; they fail the version check the
    /// next time a read or sweep looks at them.
    pub fn set_version(&mut self, version: impl Into<String>) -> bool {
        let version = version.into();
        if version == self.version {
            return false;
        }
        let previous = std::mem::replace(&mut self.version, version);
        self.observer.on_version_change(&previous, &self.version);
        true
    }

    // == Length ==
    /// Number of stored entries, including stale ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn counters(&self) -> CacheCounters {
        self.counters
    }

    #[cfg(test)]
    pub(crate) fn recency(&self) -> &RecencyTracker {
        &self.recency
    }

    #[cfg(test)]
    pub(crate) fn entry_keys(&self) -> std::collections::HashSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    // == Internals ==
    fn check(&self, key: &str) -> Option<Validity> {
        let entry = self.entries.get(key)?;
        Some(entry.validity(&self.version, self.ttl, self.clock.now()))
    }

    fn remove_stale(&mut self, key: &str, reason: Validity) {
        if self.entries.remove(key).is_some() {
            self.recency.remove(key);
            self.counters.record_stale_removals(1);
            self.observer.on_stale(key, reason);
        }
    }

    fn evict_one(&mut self) {
        if let Some(victim) = self.recency.evict_least_recent() {
            self.entries.remove(&victim);
            self.counters.record_eviction();
            self.observer.on_evict(&victim);
        }
    }
}
