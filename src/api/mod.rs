//! API Module
//!
//! HTTP handlers and routing for the magazine backend.
//!
//! # Endpoints
//! - `GET /api/home` - Front-page sections
//! - `GET /api/categories/:category` - Paged category carousel
//! - `GET /api/categories/:category/page` - Category page layout
//! - `GET /api/articles/:slug` - Article with recommendations
//! - `GET /api/images` - Image render plan
//! - `GET /api/route` - Hash route resolution
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
