//! Cache Sweep Task
//!
//! Background task that periodically deletes expired entries from the
//! persistent cache. Reads already purge stale entries lazily; the sweep
//! also reclaims entries that are never read again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::feed::ArticleFeed;

/// Spawns a background task that sweeps expired entries from every cache
/// namespace of `feed`.
///
/// # Arguments
/// * `feed` - Feed whose caches are swept
/// * `interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(feed: ArticleFeed, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = feed.sweep_expired();
            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
