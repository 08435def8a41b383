//! Memo Cache - A bounded in-memory memoization cache
//!
//! Caches expensive recomputation results behind opaque string keys with
//! LRU eviction, TTL expiry and lazy version invalidation, plus a small
//! HTTP admin surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheObserver, CacheStats};
pub use config::{CacheConfig, Config};
