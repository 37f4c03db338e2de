//! Route Prefetch Task
//!
//! Warms every non-home page once the server is idle, or after a fixed
//! fallback delay when no idle signal is wired. Pages are warmed
//! concurrently and independently: a failing or panicking page is recorded
//! in the report and never affects the others.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Notify;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::feed::ArticleFeed;
use crate::routing::Route;

/// Delay used when no idle signal is available
pub const PREFETCH_FALLBACK_DELAY: Duration = Duration::from_millis(1200);

// == Prefetch Error ==
#[derive(Error, Debug)]
pub enum PrefetchError {
    #[error("failed to warm {route}: {reason}")]
    Load { route: String, reason: String },

    #[error("warming {0} panicked")]
    Panicked(String),
}

/// Loads whatever a page needs so a later visit is served warm.
#[async_trait]
pub trait PageLoader: Send + Sync + 'static {
    async fn prefetch(&self, route: &Route) -> Result<(), PrefetchError>;
}

/// When prefetching starts.
#[derive(Debug, Clone)]
pub struct PrefetchSchedule {
    idle: Option<Arc<Notify>>,
    fallback_delay: Duration,
}

impl PrefetchSchedule {
    /// Starts after `delay`.
    pub fn after_delay(delay: Duration) -> Self {
        Self {
            idle: None,
            fallback_delay: delay,
        }
    }

    /// Starts when `idle` is notified.
    pub fn on_idle(idle: Arc<Notify>) -> Self {
        Self {
            idle: Some(idle),
            fallback_delay: PREFETCH_FALLBACK_DELAY,
        }
    }

    async fn wait(&self) {
        match &self.idle {
            Some(idle) => idle.notified().await,
            None => tokio::time::sleep(self.fallback_delay).await,
        }
    }
}

impl Default for PrefetchSchedule {
    fn default() -> Self {
        Self::after_delay(PREFETCH_FALLBACK_DELAY)
    }
}

/// Outcome of one prefetch pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrefetchReport {
    pub warmed: Vec<String>,
    pub failed: Vec<String>,
}

impl PrefetchReport {
    pub fn total(&self) -> usize {
        self.warmed.len() + self.failed.len()
    }
}

/// Spawns the prefetch pass.
///
/// Aborting the returned handle before the schedule fires cancels the
/// whole pass; aborting it mid-pass cancels the pages still in flight.
pub fn spawn_prefetcher<L: PageLoader>(
    routes: Vec<Route>,
    loader: Arc<L>,
    schedule: PrefetchSchedule,
) -> JoinHandle<PrefetchReport> {
    tokio::spawn(async move {
        schedule.wait().await;
        info!("Prefetching {} pages", routes.len());

        let mut pending: Vec<String> = routes.iter().map(Route::path).collect();
        let mut tasks = JoinSet::new();
        for route in routes {
            let loader = Arc::clone(&loader);
            tasks.spawn(async move {
                let result = loader.prefetch(&route).await;
                (route.path(), result)
            });
        }

        let mut report = PrefetchReport::default();
        while let Some(joined) = tasks.join_next().await {
            let (path, result) = match joined {
                Ok(output) => output,
                Err(err) => {
                    debug!(%err, "prefetch task ended without output");
                    continue;
                }
            };
            if let Some(pos) = pending.iter().position(|p| *p == path) {
                pending.swap_remove(pos);
            }
            match result {
                Ok(()) => {
                    debug!(route = %path, "page warmed");
                    report.warmed.push(path);
                }
                Err(err) => {
                    warn!(%err, "prefetch failed");
                    report.failed.push(path);
                }
            }
        }

        // Pages that produced no output panicked
        for path in pending {
            warn!(err = %PrefetchError::Panicked(path.clone()), "prefetch failed");
            report.failed.push(path);
        }

        info!(
            "Prefetch done: {} warmed, {} failed",
            report.warmed.len(),
            report.failed.len()
        );
        report
    })
}

// == Feed Warmer ==
/// Warms category pages by loading their carousel list into the cache.
/// Static pages have no data and succeed immediately.
#[derive(Clone)]
pub struct FeedWarmer {
    feed: ArticleFeed,
}

impl FeedWarmer {
    pub fn new(feed: ArticleFeed) -> Self {
        Self { feed }
    }
}

#[async_trait]
impl PageLoader for FeedWarmer {
    async fn prefetch(&self, route: &Route) -> Result<(), PrefetchError> {
        match route {
            Route::Category { category } => self
                .feed
                .try_category(category.name)
                .await
                .map(|_| ())
                .map_err(|err| PrefetchError::Load {
                    route: route.path(),
                    reason: err.to_string(),
                }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;
    use crate::models::fixtures::record;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails on `#/contact`, panics on `#/terms`.
    #[derive(Default)]
    struct FlakyLoader {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageLoader for FlakyLoader {
        async fn prefetch(&self, route: &Route) -> Result<(), PrefetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match route {
                Route::Contact => Err(PrefetchError::Load {
                    route: route.path(),
                    reason: "chunk missing".to_string(),
                }),
                Route::Terms => panic!("loader blew up"),
                _ => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let loader = Arc::new(FlakyLoader::default());
        let routes = Route::prefetch_targets();
        let count = routes.len();

        let report = spawn_prefetcher(routes, loader.clone(), PrefetchSchedule::after_delay(Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(loader.calls.load(Ordering::SeqCst), count);
        assert_eq!(report.total(), count);
        assert_eq!(report.failed.len(), 2);
        assert!(report.failed.contains(&"#/contact".to_string()));
        assert!(report.failed.contains(&"#/terms".to_string()));
        assert!(report.warmed.contains(&"#/privacy".to_string()));
    }

    #[tokio::test]
    async fn test_waits_for_idle_signal() {
        let loader = Arc::new(FlakyLoader::default());
        let idle = Arc::new(Notify::new());
        let handle = spawn_prefetcher(
            vec![Route::Privacy],
            loader.clone(),
            PrefetchSchedule::on_idle(idle.clone()),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);

        idle.notify_one();
        let report = handle.await.unwrap();
        assert_eq!(report.warmed, vec!["#/privacy".to_string()]);
    }

    #[tokio::test]
    async fn test_cancel_before_schedule_fires() {
        let loader = Arc::new(FlakyLoader::default());
        let handle = spawn_prefetcher(
            Route::prefetch_targets(),
            loader.clone(),
            PrefetchSchedule::after_delay(Duration::from_secs(60)),
        );

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_feed_warmer_fills_carousel_cache() {
        let store = Arc::new(MemoryStore::new(vec![
            record(1, "Tech", 1),
            record(2, "Știri", 2),
        ]));
        let feed = ArticleFeed::with_default_ttls(store.clone(), Arc::new(MemoryStorage::new()));
        let warmer = Arc::new(FeedWarmer::new(feed.clone()));

        let report = spawn_prefetcher(
            Route::prefetch_targets(),
            warmer,
            PrefetchSchedule::after_delay(Duration::ZERO),
        )
        .await
        .unwrap();
        assert!(report.failed.is_empty());

        // One query per category, none for static pages
        let warmed_calls = store.calls();
        assert_eq!(warmed_calls, crate::routing::CATEGORIES.len());

        assert_eq!(feed.category("Știri").await.len(), 1);
        assert_eq!(store.calls(), warmed_calls);
    }

    #[tokio::test]
    async fn test_feed_warmer_reports_store_failure() {
        let store = Arc::new(MemoryStore::new(Vec::new()));
        store.set_failing(true);
        let feed = ArticleFeed::with_default_ttls(store, Arc::new(MemoryStorage::new()));
        let warmer = FeedWarmer::new(feed);

        assert!(warmer.prefetch(&Route::parse("#/tech")).await.is_err());
        assert!(warmer.prefetch(&Route::Contact).await.is_ok());
    }
}
