//! TTL Cache Module
//!
//! Public cache handle: owns the shared store, starts the expiry sweeper on
//! construction and stops it exactly once on close.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::{validate_durations, CacheConfig};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweeper;

// == TTL Cache ==
/// In-memory key-value cache with sliding expiration and a background sweeper.
///
/// `put`, `get` and `delete` are synchronous and may be called from any thread.
/// They share one lock with the sweeper. After `close` the cache keeps working
/// but expired entries are no longer removed in the background.
///
/// # Example
/// ```no_run
/// # async fn demo() -> ttl_cache::Result<()> {
/// use std::time::Duration;
/// use ttl_cache::TtlCache;
///
/// let cache = TtlCache::new(Duration::from_secs(60), Duration::from_secs(5))?;
/// cache.put("session", 42);
/// assert_eq!(cache.get("session"), Some(42));
/// cache.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TtlCache<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    sweep_interval: Duration,
    /// Set by the first close; later calls are no-ops
    closed: AtomicBool,
    stop_tx: Mutex<Option<oneshot::Sender<()>>>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts its sweeper on the current tokio runtime.
    ///
    /// # Errors
    /// - `CacheError::InvalidConfig` if either duration is zero
    /// - `CacheError::NoRuntime` if called outside a tokio runtime
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Result<Self> {
        validate_durations(ttl, sweep_interval)?;
        Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let (stop_tx, stop_rx) = oneshot::channel();
        let sweeper = spawn_sweeper(store.clone(), sweep_interval, stop_rx);

        info!(?ttl, ?sweep_interval, "TTL cache created");

        Ok(Self {
            store,
            sweep_interval,
            closed: AtomicBool::new(false),
            stop_tx: Mutex::new(Some(stop_tx)),
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    /// Creates a cache from a `CacheConfig`.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.ttl(), config.sweep_interval())
    }

    // == Put ==
    /// Stores a value under `key`, replacing any previous value.
    pub fn put(&self, key: impl Into<String>, value: V) {
        self.store.lock().put(key.into(), value, Instant::now());
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    ///
    /// A hit restarts the entry's expiry countdown.
    pub fn get(&self, key: &str) -> Option<V> {
        self.store.lock().get(key, Instant::now())
    }

    // == Delete ==
    /// Removes the entry for `key`, if any.
    pub fn delete(&self, key: &str) {
        self.store.lock().delete(key);
    }

    // == Shutdown ==
    /// Closes the cache and waits for the sweeper task to finish.
    ///
    /// Only the first caller waits on the sweeper; later callers return at once.
    pub async fn shutdown(&self) {
        self.close();

        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!(error = %err, "Expiry sweeper ended abnormally");
            }
        }
    }
}

impl<V> TtlCache<V> {
    // == Close ==
    /// Signals the sweeper to stop. Safe to call any number of times, concurrently.
    ///
    /// Only the first call sends the stop signal; every other call returns immediately.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            debug!("TTL cache already closed");
            return;
        }

        if let Some(stop_tx) = self.stop_tx.lock().take() {
            // The receiver is gone only if the runtime already dropped the sweeper
            if stop_tx.send(()).is_err() {
                debug!("Expiry sweeper was no longer running");
            }
        }
        info!("TTL cache closed");
    }

    // == Is Closed ==
    /// Returns true once `close` or `shutdown` has run.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Maximum idle time before an entry expires.
    pub fn ttl(&self) -> Duration {
        self.store.lock().ttl()
    }

    /// Time between sweeper passes.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    // == Length ==
    /// Number of physically stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Returns true if nothing is stored, expired or not.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Whether an entry for `key` is physically stored, regardless of expiry.
    pub fn contains_raw(&self, key: &str) -> bool {
        self.store.lock().contains_key(key)
    }
}

impl<V> Drop for TtlCache<V> {
    fn drop(&mut self) {
        self.close();
    }
}
