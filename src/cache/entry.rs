//! Cache Entry Module
//!
//! Defines a stored entry and the staleness check applied on every read and
//! sweep.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::Digest;

// == Cache Entry ==
/// A payload plus the metadata recorded when it was written.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload, owned by the cache
    pub payload: V,
    /// Monotonic write time, used for TTL
    pub inserted_at: Instant,
    /// Wall-clock write time, used for reporting
    pub inserted_wall: DateTime<Utc>,
    /// Digest of the payload at write time
    pub digest: Digest,
    /// Cache version in effect at write time
    pub version: String,
}

impl<V: Serialize> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped with the given times and version.
    pub fn new(
        payload: V,
        inserted_at: Instant,
        inserted_wall: DateTime<Utc>,
        version: impl Into<String>,
    ) -> Self {
        let digest = Digest::of(&payload);
        Self {
            payload,
            inserted_at,
            inserted_wall,
            digest,
            version: version.into(),
        }
    }
}

impl<V> CacheEntry<V> {
    // == Validity ==
    /// Classifies the entry against the cache's current version and TTL.
    pub fn validity(&self, version: &str, ttl: Duration, now: Instant) -> Validity {
        validate(&self.version, self.inserted_at, version, ttl, now)
    }

    /// Shorthand for `validity(..).is_live()`.
    pub fn is_live(&self, version: &str, ttl: Duration, now: Instant) -> bool {
        self.validity(version, ttl, now).is_live()
    }

    /// Age of the entry at `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }
}

// == Validity ==
/// Outcome of the staleness check.
///
/// Callers of the cache never see the distinction between the stale
/// variants; it only reaches the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Version matches and age is within TTL
    Live,
    /// Age exceeds TTL
    Expired,
    /// Written under a different cache version
    VersionMismatch,
}

impl Validity {
    pub fn is_live(self) -> bool {
        matches!(self, Validity::Live)
    }

    /// Short label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Validity::Live => "live",
            Validity::Expired => "expired",
            Validity::VersionMismatch => "version_mismatch",
        }
    }
}

/// Pure staleness predicate.
///
/// An entry is live when it was written under `current_version` and its age
/// is at most `ttl`. An age exactly equal to `ttl` is still live. A version
/// mismatch is reported ahead of expiry.
pub fn validate(
    entry_version: &str,
    inserted_at: Instant,
    current_version: &str,
    ttl: Duration,
    now: Instant,
) -> Validity {
    if entry_version != current_version {
        Validity::VersionMismatch
    } else if now.saturating_duration_since(inserted_at) > ttl {
        Validity::Expired
    } else {
        Validity::Live
    }
}
