//! Feed Module
//!
//! Everything between the content store and a rendered list: the cached
//! read-through service, the category carousel with its pagination and
//! swipe state, and the section splits of the home and category pages.

mod carousel;
mod layout;
mod pagination;
mod service;
mod swipe;

// Re-export public types
pub use carousel::{CarouselView, CategoryCarousel, Layout, CAROUSEL_MARGIN_PX, WIDE_BREAKPOINT_PX};
pub use layout::{CategoryPageLayout, HeroSections};
pub use pagination::{Paginator, PAGE_SIZE};
pub use service::{
    ArticleFeed, FeedStats, CAROUSEL_FETCH_LIMIT, HERO_FETCH_LIMIT, RECOMMENDED_LIMIT,
};
pub use swipe::{SwipeTracker, EDGE_RESISTANCE, SWIPE_THRESHOLD_PX};
