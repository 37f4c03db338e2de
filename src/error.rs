//! Error types for the magazine service
//!
//! Provides unified error handling using thiserror. Library components
//! degrade to empty results on store or storage failures; only the HTTP
//! layer surfaces errors to callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Message rendered when an article slug is unknown.
pub const ARTICLE_NOT_FOUND: &str = "Articol negăsit";

// == App Error Enum ==
/// Unified error type for the HTTP API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested content does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP API.
pub type Result<T> = std::result::Result<T, AppError>;
