//! API Routes
//!
//! Configures the Axum router with all magazine endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    article_handler, carousel_handler, category_page_handler, health_handler, home_handler,
    image_handler, route_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/home` - Front-page sections
/// - `GET /api/categories/:category` - Paged category carousel
/// - `GET /api/categories/:category/page` - Category page layout
/// - `GET /api/articles/:slug` - Article with recommendations
/// - `GET /api/images` - Image render plan
/// - `GET /api/route` - Hash route resolution
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, the pages are served from elsewhere
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/home", get(home_handler))
        .route("/api/categories/:category", get(carousel_handler))
        .route("/api/categories/:category/page", get(category_page_handler))
        .route("/api/articles/:slug", get(article_handler))
        .route("/api/images", get(image_handler))
        .route("/api/route", get(route_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;
    use crate::feed::ArticleFeed;
    use crate::models::fixtures::record;
    use crate::store::MemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(MemoryStore::new(vec![record(1, "Tech", 1)]));
        let feed = ArticleFeed::with_default_ttls(store, Arc::new(MemoryStorage::new()));
        create_router(AppState::new(feed))
    }

    async fn status_of(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of("/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_category_endpoints() {
        assert_eq!(status_of("/api/categories/tech").await, StatusCode::OK);
        assert_eq!(status_of("/api/categories/tech/page").await, StatusCode::OK);
        assert_eq!(status_of("/api/categories/nope").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_article_not_found() {
        assert_eq!(status_of("/api/articles/missing").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_image_without_url() {
        assert_eq!(status_of("/api/images").await, StatusCode::BAD_REQUEST);
    }
}
