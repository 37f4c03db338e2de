//! Supabase PostgREST content store

use async_trait::async_trait;
use postgrest::Postgrest;
use tracing::debug;

use super::{ArticleQuery, ContentStore, Filter, StoreError, ARTICLES_TABLE};
use crate::models::ArticleRecord;

/// Content store backed by a Supabase project's REST endpoint.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Postgrest,
}

impl SupabaseStore {
    /// Creates a client for `rest_url` (the `/rest/v1` endpoint).
    ///
    /// An empty `api_key` sends no credentials.
    pub fn new(rest_url: impl Into<String>, api_key: &str) -> Self {
        let mut client = Postgrest::new(rest_url.into());
        if !api_key.is_empty() {
            client = client
                .insert_header("apikey", api_key)
                .insert_header("Authorization", format!("Bearer {}", api_key));
        }
        Self { client }
    }
}

#[async_trait]
impl ContentStore for SupabaseStore {
    async fn select(&self, query: &ArticleQuery) -> Result<Vec<ArticleRecord>, StoreError> {
        let mut builder = self.client.from(ARTICLES_TABLE).select(query.select_clause());

        for filter in &query.filters {
            builder = match filter {
                Filter::Eq(column, value) => builder.eq(column.as_str(), value),
                Filter::Neq(column, value) => builder.neq(column.as_str(), value),
            };
        }
        if let Some(order) = query.order_clause() {
            builder = builder.order(order);
        }
        if let Some(limit) = query.limit {
            builder = builder.limit(limit);
        }

        let response = builder
            .execute()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<ArticleRecord> = serde_json::from_str(&body)?;
        debug!(rows = rows.len(), "content store query answered");
        Ok(rows)
    }
}
