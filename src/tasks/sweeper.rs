//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries until it
//! is told to stop.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps expired entries every `sweep_interval`.
///
/// Each pass holds the store's lock while it scans every entry. The first pass
/// runs one full interval after spawning. The task returns, without a final
/// pass, as soon as `stop` receives a value or its sender is dropped.
///
/// # Arguments
/// * `store` - Store shared with the cache's callers
/// * `sweep_interval` - Time between passes, must be non-zero
/// * `stop` - One-shot stop signal
///
/// # Returns
/// A JoinHandle that resolves once the task has stopped.
pub(crate) fn spawn_sweeper<V>(
    store: Arc<Mutex<CacheStore<V>>>,
    sweep_interval: Duration,
    mut stop: oneshot::Receiver<()>,
) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
{
    tokio::spawn(async move {
        info!(?sweep_interval, "Starting expiry sweeper");

        let mut ticker = time::interval(sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut stop => {
                    info!("Expiry sweeper stopped");
                    return;
                }
                now = ticker.tick() => {
                    let (removed, remaining) = {
                        let mut guard = store.lock();
                        let removed = guard.remove_expired(now);
                        (removed, guard.len())
                    };

                    if removed > 0 {
                        info!(removed, remaining, "Sweep removed expired entries");
                    } else {
                        debug!(remaining, "Sweep found no expired entries");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn shared_store(ttl: Duration) -> Arc<Mutex<CacheStore<String>>> {
        Arc::new(Mutex::new(CacheStore::new(ttl)))
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let store = shared_store(Duration::from_millis(200));
        store
            .lock()
            .put("expire_soon".to_string(), "value".to_string(), Instant::now());

        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = spawn_sweeper(store.clone(), Duration::from_millis(100), stop_rx);

        time::sleep(Duration::from_millis(600)).await;

        assert!(
            !store.lock().contains_key("expire_soon"),
            "Expired entry should have been swept"
        );

        stop_tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_valid_entries() {
        let store = shared_store(Duration::from_secs(3600));
        store
            .lock()
            .put("long_lived".to_string(), "value".to_string(), Instant::now());

        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = spawn_sweeper(store.clone(), Duration::from_millis(50), stop_rx);

        time::sleep(Duration::from_millis(300)).await;

        assert_eq!(
            store.lock().get("long_lived", Instant::now()),
            Some("value".to_string())
        );

        stop_tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_sweeper_stops_on_signal() {
        let store = shared_store(Duration::from_secs(1));
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = spawn_sweeper(store, Duration::from_secs(3600), stop_rx);

        stop_tx.send(()).unwrap();

        // Stopping does not wait for the next tick
        time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("Sweeper should stop promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn test_sweeper_stops_when_sender_dropped() {
        let store = shared_store(Duration::from_secs(1));
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let handle = spawn_sweeper(store, Duration::from_secs(3600), stop_rx);

        drop(stop_tx);

        time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("Sweeper should stop promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn test_sweeper_performs_no_final_pass() {
        let store = shared_store(Duration::from_millis(10));
        store
            .lock()
            .put("stale".to_string(), "value".to_string(), Instant::now());

        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = spawn_sweeper(store.clone(), Duration::from_secs(3600), stop_rx);

        time::sleep(Duration::from_millis(50)).await;
        stop_tx.send(()).unwrap();
        handle.await.unwrap();

        assert!(store.lock().contains_key("stale"));
    }

    #[tokio::test]
    async fn test_sweeper_accepts_huge_interval() {
        let store = shared_store(Duration::from_secs(1));
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = spawn_sweeper(store, Duration::MAX, stop_rx);

        time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished(), "Sweeper should still be running");

        stop_tx.send(()).unwrap();
        handle.await.expect("Sweeper should exit without panicking");
    }
}
