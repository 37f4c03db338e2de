//! Content Store Module
//!
//! The remote article collection, reached through a small query interface.
//! `SupabaseStore` talks to PostgREST; `MemoryStore` serves fixed records.

mod memory;
mod query;
mod supabase;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ArticleRecord;

// Re-export public types
pub use memory::MemoryStore;
pub use query::{ArticleQuery, Column, Direction, Filter, Selection, CARD_COLUMNS};
pub use supabase::SupabaseStore;

/// Name of the article collection
pub const ARTICLES_TABLE: &str = "articles";

// == Store Error ==
#[derive(Error, Debug)]
pub enum StoreError {
    /// Request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// Store answered with a non-success status
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A zero-or-one lookup matched several rows
    #[error("expected at most one row, query matched several")]
    NotSingle,

    /// Response body did not match the article schema
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

// == Content Store Trait ==
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Runs the query and returns the matching rows.
    async fn select(&self, query: &ArticleQuery) -> Result<Vec<ArticleRecord>, StoreError>;

    /// Zero-or-one lookup. Several matching rows are an error.
    async fn maybe_single(&self, query: &ArticleQuery) -> Result<Option<ArticleRecord>, StoreError> {
        let mut rows = self.select(&query.clone().limit(2)).await?;
        if rows.len() > 1 {
            return Err(StoreError::NotSingle);
        }
        Ok(rows.pop())
    }
}
