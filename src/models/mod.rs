//! Data models
//!
//! Article models shared by the feed and the API, plus the DTOs used for
//! HTTP request and response bodies.

mod article;
pub mod requests;
pub mod responses;

pub use article::{format_ro_date, Article, ArticleDetail, ArticleRecord};
#[cfg(test)]
pub(crate) use article::fixtures;
pub use requests::{CarouselQuery, ImageQuery, RouteQuery};
pub use responses::{
    CarouselPageResponse, CategoryPageResponse, ErrorResponse, HealthResponse, ImageResponse,
    RouteResponse, StatsResponse,
};
