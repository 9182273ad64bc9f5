//! Caching utilities for the society directory.
//!
//! Category listings are read far more often than contacts are added, so
//! they are kept in a small time-based cache.

pub mod timed_cache;

pub use timed_cache::TimedCache;
