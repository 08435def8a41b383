//! Background Tasks Module
//!
//! Contains background tasks that run alongside a cache instance.
//!
//! # Tasks
//! - Sweeper: Removes stale cache entries at a configured interval

mod sweeper;

pub use sweeper::Sweeper;
