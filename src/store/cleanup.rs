//! Background expiry of generated usernames.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, mpsc};
use tokio::time::interval;
use tracing::{debug, info};

use super::{ResultCache, UsernameStore};

/// Lower bound on the cleanup interval; `tokio` rejects a zero period.
const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Messages that can be sent to the cleanup task.
#[derive(Debug, Clone)]
pub enum CleanupMessage {
    /// Run a cleanup pass immediately.
    RunNow,
    /// Stop the cleanup task.
    Shutdown,
}

/// Periodically removes expired entries from a shared [`UsernameStore`]
/// and [`ResultCache`].
pub struct StoreCleanup {
    store: Arc<RwLock<UsernameStore>>,
    results: Arc<RwLock<ResultCache>>,
    interval: Duration,
}

impl StoreCleanup {
    /// Creates a cleanup task for the given store and result cache.
    #[must_use]
    pub fn new(
        store: Arc<RwLock<UsernameStore>>,
        results: Arc<RwLock<ResultCache>>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            results,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Returns the interval between passes.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs the cleanup loop until shutdown.
    ///
    /// The first pass runs as soon as the loop starts.
    pub async fn run(&self, mut rx: mpsc::Receiver<CleanupMessage>) {
        info!("Username store cleanup started (every {:?})", self.interval);

        let mut timer = interval(self.interval);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    self.sweep().await;
                }
                msg = rx.recv() => {
                    match msg {
                        Some(CleanupMessage::RunNow) => {
                            debug!("Received cleanup request");
                            self.sweep().await;
                        }
                        Some(CleanupMessage::Shutdown) | None => {
                            info!("Username store cleanup shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Runs a single cleanup pass; returns the number of removed entries.
    pub async fn sweep(&self) -> usize {
        let (removed, remaining) = {
            let mut store = self.store.write().await;
            (store.cleanup_expired(), store.len())
        };
        let (purged, cached) = {
            let mut results = self.results.write().await;
            (results.purge_expired(), results.len())
        };
        debug!(
            "Cleanup pass removed {} usernames ({} remain) and {} check results ({} remain)",
            removed, remaining, purged, cached
        );
        removed + purged
    }

    /// Gets a reference to the shared store.
    #[must_use]
    pub fn store(&self) -> &Arc<RwLock<UsernameStore>> {
        &self.store
    }

    /// Gets a reference to the shared result cache.
    #[must_use]
    pub fn results(&self) -> &Arc<RwLock<ResultCache>> {
        &self.results
    }
}

impl std::fmt::Debug for StoreCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCleanup")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::username::UsernameStatus;

    fn expiring() -> (Arc<RwLock<UsernameStore>>, Arc<RwLock<ResultCache>>) {
        (
            Arc::new(RwLock::new(UsernameStore::new(Duration::ZERO))),
            Arc::new(RwLock::new(ResultCache::new(Duration::ZERO))),
        )
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let (store, results) = expiring();
        store.write().await.add("base", "bases");
        results.write().await.insert("bases", UsernameStatus::Available);

        let cleanup = StoreCleanup::new(
            Arc::clone(&store),
            Arc::clone(&results),
            Duration::from_secs(60),
        );
        assert_eq!(cleanup.sweep().await, 2);
        assert!(store.read().await.is_empty());
        assert!(results.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_results() {
        let store = Arc::new(RwLock::new(UsernameStore::default()));
        let results = Arc::new(RwLock::new(ResultCache::default()));
        results.write().await.insert("freename", UsernameStatus::Available);

        let cleanup = StoreCleanup::new(store, Arc::clone(&results), Duration::from_secs(60));
        assert_eq!(cleanup.sweep().await, 0);
        assert_eq!(results.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let (store, results) = expiring();
        store.write().await.add("base", "bases");

        let cleanup = StoreCleanup::new(Arc::clone(&store), results, Duration::from_secs(3600));
        let (tx, rx) = mpsc::channel(4);
        tx.send(CleanupMessage::RunNow).await.unwrap();
        tx.send(CleanupMessage::Shutdown).await.unwrap();

        let handle = tokio::spawn(async move { cleanup.run(rx).await });
        handle.await.unwrap();

        assert!(store.read().await.is_empty());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let store = Arc::new(RwLock::new(UsernameStore::default()));
        let results = Arc::new(RwLock::new(ResultCache::default()));
        let cleanup = StoreCleanup::new(store, results, Duration::ZERO);
        assert_eq!(cleanup.interval(), MIN_INTERVAL);
    }
}
