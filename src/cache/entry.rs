//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with sliding expiration.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with its value and last access time.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of insertion or of the most recent read hit
    pub last_access: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry accessed at `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            last_access: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has gone unaccessed for longer than `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `ttl` is still valid.
    /// A `now` earlier than the last access counts as zero age.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_access) > ttl
    }

    // == Touch ==
    /// Refreshes the last access time. Never moves it backwards.
    pub fn touch(&mut self, now: Instant) {
        if now > self.last_access {
            self.last_access = now;
        }
    }
}
