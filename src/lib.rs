//! TTL Cache - A self-cleaning in-memory key-value cache
//!
//! Entries expire after a period without access (sliding expiration) and a
//! background sweeper physically removes them on a fixed interval.

pub mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::TtlCache;
pub use config::CacheConfig;
pub use error::{CacheError, Result};
