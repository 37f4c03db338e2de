//! Background Tasks Module
//!
//! Tasks spawned next to the HTTP server and aborted on shutdown.
//!
//! # Tasks
//! - Cache sweep: deletes expired cache entries at configured intervals
//! - Route prefetch: warms every non-home page once after startup

mod cleanup;
mod prefetch;

pub use cleanup::spawn_cleanup_task;
pub use prefetch::{
    spawn_prefetcher, FeedWarmer, PageLoader, PrefetchError, PrefetchReport, PrefetchSchedule,
    PREFETCH_FALLBACK_DELAY,
};
