//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Lazy expiration only reclaims entries that are looked up again; the sweep
//! reclaims the rest.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

// == Sweeper Handle ==
/// Owns a running sweep task.
///
/// Dropping the handle also stops the task, on its next wake-up.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the task to stop and waits for it to exit.
    pub async fn shutdown(self) -> Result<()> {
        // The receiver is gone only if the task already ended
        let _ = self.shutdown_tx.send(true);

        self.handle.await.map_err(|e| {
            warn!("TTL sweep task ended abnormally: {}", e);
            CacheError::Internal(format!("sweep task failed: {}", e))
        })?;

        info!("TTL sweep task stopped");
        Ok(())
    }
}

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The first sweep happens one full interval after spawning. Each sweep holds
/// the store's write lock for the duration of one scan.
///
/// # Example
/// ```ignore
/// let sweeper = spawn_sweep_task(cache.store(), Duration::from_secs(300));
/// // Later, during shutdown:
/// sweeper.shutdown().await?;
/// ```
pub fn spawn_sweep_task(cache: Arc<RwLock<CacheStore>>, interval: Duration) -> SweeperHandle {
    // tokio's interval panics on a zero period
    let interval = interval.max(Duration::from_millis(1));
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = {
                        let mut store = cache.write().await;
                        store.cleanup_expired()
                    };

                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    });

    SweeperHandle {
        shutdown_tx,
        handle,
    }
}
