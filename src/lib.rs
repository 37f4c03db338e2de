//! Revista - backend for a Romanian online magazine
//!
//! Cached read-through access to the article store, responsive image URL
//! planning, lazy category carousels and idle-time route prefetching,
//! served over a small JSON API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod images;
pub mod models;
pub mod routing;
pub mod store;
pub mod tasks;
pub mod visibility;

pub use api::AppState;
pub use config::Config;
pub use feed::ArticleFeed;
pub use tasks::{spawn_cleanup_task, spawn_prefetcher};
