//! API Handlers
//!
//! HTTP request handlers for each magazine endpoint. Store failures never
//! surface here: the feed degrades them to empty lists.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::Storage;
use crate::config::Config;
use crate::error::{AppError, Result, ARTICLE_NOT_FOUND};
use crate::feed::{ArticleFeed, CategoryPageLayout, HeroSections, PAGE_SIZE};
use crate::models::{
    ArticleDetail, CarouselPageResponse, CarouselQuery, CategoryPageResponse, HealthResponse,
    ImageQuery, ImageResponse, RouteQuery, RouteResponse, StatsResponse,
};
use crate::routing::{find_category, CategoryInfo, Route};
use crate::store::ContentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached read-through access to the content store
    pub feed: ArticleFeed,
}

impl AppState {
    /// Creates a new AppState around an existing feed.
    pub fn new(feed: ArticleFeed) -> Self {
        Self { feed }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses the configured cache TTLs over the given store and storage.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn ContentStore>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self::new(ArticleFeed::new(
            store,
            storage,
            config.list_ttl(),
            config.article_ttl(),
        ))
    }
}

fn resolve_category(name: &str) -> Result<&'static CategoryInfo> {
    find_category(name).ok_or_else(|| AppError::NotFound(format!("Unknown category '{}'", name)))
}

/// Handler for GET /api/home
///
/// Front-page hero, secondary cards and list.
pub async fn home_handler(State(state): State<AppState>) -> Json<HeroSections> {
    let articles = state.feed.front_page().await;
    Json(HeroSections::from_articles(articles))
}

/// Handler for GET /api/categories/:category
///
/// Carousel list of a category, one page of four at a time.
pub async fn carousel_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CarouselQuery>,
) -> Result<Json<CarouselPageResponse>> {
    let category = resolve_category(&category)?;
    let articles = state.feed.category(category.name).await;

    Ok(Json(CarouselPageResponse::new(
        category,
        articles,
        query.page.unwrap_or(1),
        PAGE_SIZE,
    )))
}

/// Handler for GET /api/categories/:category/page
pub async fn category_page_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryPageResponse>> {
    let category = resolve_category(&category)?;
    let articles = state.feed.category_listing(category.name).await;

    Ok(Json(CategoryPageResponse {
        category,
        layout: CategoryPageLayout::from_articles(articles),
    }))
}

/// Handler for GET /api/articles/:slug
pub async fn article_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleDetail>> {
    state
        .feed
        .article(&slug)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(ARTICLE_NOT_FOUND.to_string()))
}

/// Handler for GET /api/images
///
/// Optimized URL, source-set and placeholder for an image.
pub async fn image_handler(Query(query): Query<ImageQuery>) -> Result<Json<ImageResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }
    Ok(Json(ImageResponse::new(query.options())))
}

/// Handler for GET /api/route
pub async fn route_handler(Query(query): Query<RouteQuery>) -> Json<RouteResponse> {
    let route = Route::parse(query.path.as_deref().unwrap_or_default());
    Json(RouteResponse::from(route))
}

/// Handler for GET /stats
///
/// Returns counters of the three caches.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.feed.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
