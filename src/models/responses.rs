//! Response DTOs for the magazine API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::feed::{CategoryPageLayout, FeedStats, Paginator};
use crate::images::{optimize_url, srcset, ImageLoader, ImageOptions, ImageRender, ImageSize, SrcSetEntry};
use crate::models::Article;
use crate::routing::{CategoryInfo, Route};

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hero: CacheStats,
    pub carousel: CacheStats,
    pub article: CacheStats,
    pub total: CacheStats,
    /// Hit rate across all caches (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<FeedStats> for StatsResponse {
    fn from(stats: FeedStats) -> Self {
        let total = stats.total();
        Self {
            hit_rate: total.hit_rate(),
            hero: stats.hero,
            carousel: stats.carousel,
            article: stats.article,
            total,
        }
    }
}

/// One page of a category carousel (GET /api/categories/:category)
#[derive(Debug, Clone, Serialize)]
pub struct CarouselPageResponse {
    pub category: &'static CategoryInfo,
    pub title: String,
    pub items: Vec<Article>,
    pub page: usize,
    pub total_pages: usize,
    pub can_prev: bool,
    pub can_next: bool,
    /// Every fetched article, for the narrow swipe strip
    pub all: Vec<Article>,
}

impl CarouselPageResponse {
    /// Pages `articles` and moves to `page`, clamped to the valid range.
    pub fn new(category: &'static CategoryInfo, articles: Vec<Article>, page: usize, page_size: usize) -> Self {
        let mut pager = Paginator::new(page_size, articles.len());
        pager.go_to(page);
        Self {
            category,
            title: category.title(),
            items: pager.page(&articles).to_vec(),
            page: pager.current(),
            total_pages: pager.total_pages(),
            can_prev: pager.can_prev(),
            can_next: pager.can_next(),
            all: articles,
        }
    }
}

/// Category page (GET /api/categories/:category/page)
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPageResponse {
    pub category: &'static CategoryInfo,
    #[serde(flatten)]
    pub layout: CategoryPageLayout,
}

/// Image render plan (GET /api/images)
#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    /// Resized main image URL, the input unchanged for unknown hosts
    pub url: String,
    pub size: ImageSize,
    pub srcset: Vec<SrcSetEntry>,
    pub sizes: String,
    pub placeholder: Option<String>,
    /// Initial render plan of the image element
    pub render: ImageRender,
}

impl ImageResponse {
    pub fn new(options: ImageOptions) -> Self {
        let size = options.size;
        let url = optimize_url(&options.src, size.width(), size.quality());
        let srcset = srcset(&options.src, size.quality());
        let loader = ImageLoader::new(options);
        let render = loader.render();
        Self {
            url,
            size,
            srcset,
            sizes: loader.sizes_hint(),
            placeholder: render.placeholder.clone(),
            render,
        }
    }
}

/// Resolved hash route (GET /api/route)
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    /// Canonical path of the resolved page
    pub path: String,
    pub route: Route,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            path: route.path(),
            route,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::record;
    use crate::routing::find_category;

    fn articles(count: u32) -> Vec<Article> {
        (1..=count).map(|i| Article::from(&record(i, "Tech", i))).collect()
    }

    #[test]
    fn test_carousel_page_clamped() {
        let tech = find_category("tech").unwrap();

        let resp = CarouselPageResponse::new(tech, articles(8), 9, 4);
        assert_eq!(resp.page, 2);
        assert_eq!(resp.items.len(), 4);
        assert!(resp.can_prev && !resp.can_next);

        let resp = CarouselPageResponse::new(tech, articles(8), 0, 4);
        assert_eq!(resp.page, 1);
        assert_eq!(resp.all.len(), 8);
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = FeedStats {
            hero: CacheStats {
                hits: 3,
                misses: 1,
                ..Default::default()
            },
            carousel: CacheStats {
                hits: 1,
                misses: 3,
                ..Default::default()
            },
            article: CacheStats::new(),
        };
        let resp = StatsResponse::from(stats);
        assert_eq!(resp.total.hits, 4);
        assert!((resp.hit_rate - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_image_response_for_pexels() {
        let resp = ImageResponse::new(
            ImageOptions::new("https://images.pexels.com/photos/1/a.jpeg?x=1", "a").size(ImageSize::Hero),
        );
        assert!(resp.url.contains("w=1400"));
        assert!(resp.url.contains("q=82"));
        assert_eq!(resp.srcset.len(), 6);
        assert!(resp.placeholder.is_some());
    }

    #[test]
    fn test_image_response_for_unknown_host() {
        let resp = ImageResponse::new(ImageOptions::new("https://cdn.example.com/a.jpg", "a"));
        assert_eq!(resp.url, "https://cdn.example.com/a.jpg");
        assert!(resp.srcset.is_empty());
        assert!(resp.placeholder.is_none());
    }

    #[test]
    fn test_route_response_serialize() {
        let json = serde_json::to_value(RouteResponse::from(Route::parse("stiri"))).unwrap();
        assert_eq!(json["path"], "#/stiri");
        assert_eq!(json["route"]["page"], "category");
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
