//! Cache Statistics Module
//!
//! Read-only snapshot of cache contents plus cumulative traffic counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Counters ==
/// Cumulative traffic counters. These survive `clear`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Reads that returned a payload
    pub hits: u64,
    /// Reads that returned nothing (absent or stale)
    pub misses: u64,
    /// Entries removed to respect capacity
    pub evictions: u64,
    /// Entries removed because they were found stale
    pub stale_removals: u64,
}

impl CacheCounters {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_stale_removals(&mut self, count: usize) {
        self.stale_removals += count as u64;
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Cache Stats ==
/// Snapshot returned by `stats()`.
///
/// Entries are classified with the same predicate reads use, but nothing is
/// removed while taking the snapshot, so `expired_entries` counts stale
/// entries that nobody has observed yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored, stale or not
    pub total_entries: usize,
    /// Entries that a read would return
    pub valid_entries: usize,
    /// Entries past TTL or written under another version
    pub expired_entries: usize,
    /// Configured capacity
    pub capacity: usize,
    /// Configured TTL in milliseconds
    pub ttl_ms: u64,
    /// Current version tag
    pub version: String,
    /// Write time of the oldest stored entry
    pub oldest_entry_time: Option<DateTime<Utc>>,
    /// Write time of the newest stored entry
    pub newest_entry_time: Option<DateTime<Utc>>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub stale_removals: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}
