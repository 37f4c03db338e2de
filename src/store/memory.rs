//! In-memory content store

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{ArticleQuery, ContentStore, Selection, StoreError};
use crate::models::ArticleRecord;

/// Content store over a fixed set of records.
///
/// Counts every query, can be switched to fail, and can hold queries at a
/// gate until released.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ArticleRecord>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    gate: Option<Arc<Notify>>,
}

impl MemoryStore {
    pub fn new(records: Vec<ArticleRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Every query waits for a `notify_one` on `gate` before answering.
    pub fn gated(records: Vec<ArticleRecord>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(records)
        }
    }

    /// Number of queries received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn insert(&self, record: ArticleRecord) {
        if let Ok(mut records) = self.records.write() {
            records.push(record);
        }
    }
}

fn project(mut record: ArticleRecord, selection: &Selection) -> ArticleRecord {
    if let Selection::Columns(columns) = selection {
        let keep = |name: &str| columns.contains(&name);
        if !keep("slug") {
            record.slug = None;
        }
        if !keep("excerpt") {
            record.excerpt = None;
        }
        if !keep("content") {
            record.content = None;
        }
        if !keep("placeholder_url") {
            record.placeholder_url = None;
        }
    }
    record
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn select(&self, query: &ArticleQuery) -> Result<Vec<ArticleRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Network("store unreachable".to_string()));
        }

        let mut rows: Vec<ArticleRecord> = {
            let records = self
                .records
                .read()
                .map_err(|_| StoreError::Network("store lock poisoned".to_string()))?;
            records.iter().filter(|r| query.matches(r)).cloned().collect()
        };

        rows.sort_by(|a, b| query.compare(a, b));
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows
            .into_iter()
            .map(|r| project(r, &query.selection))
            .collect())
    }
}
