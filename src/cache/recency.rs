//! Recency Tracker Module
//!
//! Logical-clock based least-recently-used tracking for eviction.

use std::collections::HashMap;

// == Recency Tracker ==
/// Tracks the last-touched logical time of every key.
///
/// Each touch takes the next value of a counter that only ever grows (until
/// `clear`), so no two keys share a stamp and the minimum is unambiguous.
#[derive(Debug, Default)]
pub struct RecencyTracker {
    /// Last-touched stamp per key
    stamps: HashMap<String, u64>,
    /// Next stamp to hand out
    counter: u64,
}

impl RecencyTracker {
    // == Constructor ==
    /// Creates an empty tracker with the counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Stamps `key` as the most recently used key.
    pub fn touch(&mut self, key: &str) {
        self.counter += 1;
        match self.stamps.get_mut(key) {
            Some(stamp) => *stamp = self.counter,
            None => {
                self.stamps.insert(key.to_string(), self.counter);
            }
        }
    }

    // == Remove ==
    /// Stops tracking `key`. Other keys keep their stamps.
    pub fn remove(&mut self, key: &str) -> bool {
        self.stamps.remove(key).is_some()
    }

    // == Least Recent ==
    /// Returns the key with the smallest stamp.
    ///
    /// Linear in the number of tracked keys.
    pub fn least_recent(&self) -> Option<&str> {
        self.stamps
            .iter()
            .min_by_key(|(_, stamp)| **stamp)
            .map(|(key, _)| key.as_str())
    }

    // == Evict Least Recent ==
    /// Removes and returns the key with the smallest stamp.
    pub fn evict_least_recent(&mut self) -> Option<String> {
        let key = self.least_recent()?.to_string();
        self.stamps.remove(&key);
        Some(key)
    }

    // == Clear ==
    /// Forgets all keys and resets the counter.
    pub fn clear(&mut self) {
        self.stamps.clear();
        self.counter = 0;
    }

    /// Stamp last given to `key`, if tracked.
    pub fn stamp(&self, key: &str) -> Option<u64> {
        self.stamps.get(key).copied()
    }

    /// Current value of the logical clock.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.stamps.contains_key(key)
    }

    /// Iterates over tracked keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.stamps.keys().map(String::as_str)
    }
}
