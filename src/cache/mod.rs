//! Cache Module
//!
//! Bounded in-memory memoization cache with LRU eviction, TTL expiry and
//! lazy version invalidation.

mod clock;
mod digest;
mod entry;
mod handle;
pub mod keys;
pub(crate) mod observer;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, MockClock, SystemClock};
pub use digest::Digest;
pub use entry::{validate, CacheEntry, Validity};
pub use handle::Cache;
pub use observer::{CacheObserver, NoopObserver, TracingObserver};
pub use recency::RecencyTracker;
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;
