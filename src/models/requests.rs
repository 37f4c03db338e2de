//! Request DTOs for the magazine API
//!
//! Query strings accepted by the HTTP endpoints.

use serde::Deserialize;

use crate::images::{ImageOptions, ImageSize};

/// Query for GET /api/categories/:category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarouselQuery {
    /// 1-based page; out-of-range values are clamped
    #[serde(default)]
    pub page: Option<usize>,
}

/// Query for GET /api/images
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageQuery {
    /// Source image URL
    #[serde(default)]
    pub url: String,
    /// Size profile name, `medium` when absent
    #[serde(default)]
    pub size: Option<String>,
    /// Above-the-fold image, loaded eagerly
    #[serde(default)]
    pub priority: bool,
    /// Overrides the default `sizes` hint
    #[serde(default)]
    pub sizes: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl ImageQuery {
    /// Validates the query.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("url cannot be empty".to_string());
        }
        if let Some(size) = &self.size {
            if let Err(err) = size.parse::<ImageSize>() {
                return Some(err);
            }
        }
        None
    }

    /// Loader options for a validated query.
    pub fn options(&self) -> ImageOptions {
        let size = self
            .size
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let mut options = ImageOptions::new(self.url.trim(), self.alt.clone().unwrap_or_default())
            .size(size)
            .priority(self.priority);
        if let Some(sizes) = &self.sizes {
            options = options.sizes(sizes.clone());
        }
        options
    }
}

/// Query for GET /api/route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteQuery {
    /// Hash path, e.g. `#/stiri`; home when absent
    #[serde(default)]
    pub path: Option<String>,
}
