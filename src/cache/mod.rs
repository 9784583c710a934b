//! Cache Module
//!
//! Provides an in-memory cache with sliding TTL expiration and background sweeping.
//!
//! Only `TtlCache` is public; the store behind its lock is not reachable directly.
//!
//! ```compile_fail
//! use ttl_cache::cache::CacheStore;
//! ```

mod entry;
mod store;
mod ttl_cache;


// Re-export public types
pub(crate) use entry::CacheEntry;
pub(crate) use store::CacheStore;
pub use ttl_cache::TtlCache;
