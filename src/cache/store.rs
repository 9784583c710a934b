//! Cache Store Module
//!
//! Key-value storage with sliding TTL checks. The store itself is not
//! synchronized; `TtlCache` guards it with a single mutex shared with the sweeper.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Map from string keys to entries, with the TTL used to judge them.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage, possibly holding logically expired entries
    entries: HashMap<String, CacheEntry<V>>,
    /// Maximum idle time before an entry expires
    ttl: Duration,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store whose entries expire after `ttl` without access.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    // == Put ==
    /// Stores a value, replacing any previous entry for the key.
    ///
    /// The entry's last access is set to `now`.
    pub fn put(&mut self, key: String, value: V, now: Instant) {
        self.entries.insert(key, CacheEntry::new(value, now));
    }

    // == Get ==
    /// Retrieves a clone of the value if present and not expired as of `now`.
    ///
    /// A hit refreshes the entry's last access. A miss leaves the store untouched,
    /// even when an expired entry is still physically present.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<V>
    where
        V: Clone,
    {
        let ttl = self.ttl;
        let entry = self.entries.get_mut(key)?;
        if entry.is_expired_at(now, ttl) {
            return None;
        }
        entry.touch(now);
        Some(entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Remove Expired ==
    /// Removes every entry expired as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now, ttl));
        before - self.entries.len()
    }

    // == Contains Key ==
    /// Returns true if an entry for the key is physically present, expired or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == TTL ==
    /// Returns the idle time after which entries expire.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the number of physically present entries, including expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are physically present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
