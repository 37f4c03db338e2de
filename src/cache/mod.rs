//! Cache Module
//!
//! Time-boxed key/value caching over persistent storage. Every consumer
//! (front page, category carousels, single articles) uses the same
//! [`TtlCache`] under its own namespace and TTL.

mod entry;
mod key;
mod stats;
mod storage;
mod ttl;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use key::{category_key, slugify};
pub use stats::{CacheCounters, CacheStats};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use ttl::TtlCache;

// == Namespaces ==
/// Front-page hero list
pub const HERO_NAMESPACE: &str = "revista_hero_";

/// Per-category carousel lists
pub const CAROUSEL_NAMESPACE: &str = "revista_carousel_";

/// Single articles keyed by slug
pub const ARTICLE_NAMESPACE: &str = "revista_article_";

// == Default TTLs ==
/// TTL of list caches in seconds
pub const LIST_TTL_SECS: u64 = 5 * 60;

/// TTL of the single-article cache in seconds
pub const ARTICLE_TTL_SECS: u64 = 30 * 60;
