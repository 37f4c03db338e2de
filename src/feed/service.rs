//! Article Feed Service
//!
//! Cache-first read-through access to the content store for every list and
//! article the site renders. Store failures are logged and read as empty;
//! only successful fetches are cached.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{
    category_key, CacheStats, Storage, TtlCache, ARTICLE_NAMESPACE, ARTICLE_TTL_SECS,
    CAROUSEL_NAMESPACE, HERO_NAMESPACE, LIST_TTL_SECS,
};
use crate::models::{Article, ArticleDetail, ArticleRecord};
use crate::store::{ArticleQuery, Column, ContentStore, StoreError, CARD_COLUMNS};

/// Articles fetched for the front page (3 featured + 6 listed)
pub const HERO_FETCH_LIMIT: usize = 9;

/// Articles fetched per category carousel
pub const CAROUSEL_FETCH_LIMIT: usize = 8;

/// Recommendations shown under an article
pub const RECOMMENDED_LIMIT: usize = 3;

const HERO_KEY: &str = "articles";

// == Feed Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedStats {
    pub hero: CacheStats,
    pub carousel: CacheStats,
    pub article: CacheStats,
}

impl FeedStats {
    pub fn total(&self) -> CacheStats {
        let mut total = CacheStats::new();
        total.merge(&self.hero);
        total.merge(&self.carousel);
        total.merge(&self.article);
        total
    }
}

// == Article Feed ==
#[derive(Clone)]
pub struct ArticleFeed {
    store: Arc<dyn ContentStore>,
    hero_cache: TtlCache<Vec<Article>>,
    carousel_cache: TtlCache<Vec<Article>>,
    article_cache: TtlCache<ArticleDetail>,
}

impl ArticleFeed {
    /// Creates a feed with explicit TTLs.
    ///
    /// # Arguments
    /// * `store` - Content store to read from on cache misses
    /// * `storage` - Persistent storage shared by the three caches
    /// * `list_ttl` - TTL of the front-page and carousel lists
    /// * `article_ttl` - TTL of single articles
    pub fn new(
        store: Arc<dyn ContentStore>,
        storage: Arc<dyn Storage>,
        list_ttl: Duration,
        article_ttl: Duration,
    ) -> Self {
        Self {
            store,
            hero_cache: TtlCache::new(storage.clone(), HERO_NAMESPACE, list_ttl),
            carousel_cache: TtlCache::new(storage.clone(), CAROUSEL_NAMESPACE, list_ttl),
            article_cache: TtlCache::new(storage, ARTICLE_NAMESPACE, article_ttl),
        }
    }

    /// Creates a feed with the 5-minute list and 30-minute article TTLs.
    pub fn with_default_ttls(store: Arc<dyn ContentStore>, storage: Arc<dyn Storage>) -> Self {
        Self::new(
            store,
            storage,
            Duration::from_secs(LIST_TTL_SECS),
            Duration::from_secs(ARTICLE_TTL_SECS),
        )
    }

    // == Front Page ==
    /// Most recent articles across all categories.
    pub async fn front_page(&self) -> Vec<Article> {
        if let Some(articles) = self.hero_cache.get(HERO_KEY) {
            return articles;
        }

        let query = ArticleQuery::select(CARD_COLUMNS)
            .order_desc(Column::PublishedAt)
            .limit(HERO_FETCH_LIMIT);

        match self.store.select(&query).await {
            Ok(rows) => {
                let articles = to_articles(&rows);
                self.hero_cache.set(HERO_KEY, &articles);
                articles
            }
            Err(err) => {
                warn!(%err, "failed to fetch front page articles");
                Vec::new()
            }
        }
    }

    // == Category ==
    /// Latest articles of one category, as shown in its carousel.
    pub async fn category(&self, category: &str) -> Vec<Article> {
        match self.try_category(category).await {
            Ok(articles) => articles,
            Err(err) => {
                warn!(category, %err, "failed to fetch category articles");
                Vec::new()
            }
        }
    }

    /// Like [`category`](Self::category) but surfaces store failures.
    pub async fn try_category(&self, category: &str) -> Result<Vec<Article>, StoreError> {
        let key = category_key(category);
        if let Some(articles) = self.carousel_cache.get(&key) {
            debug!(category, "carousel served from cache");
            return Ok(articles);
        }

        let query = ArticleQuery::select(CARD_COLUMNS)
            .eq(Column::Category, category)
            .order_desc(Column::PublishedAt)
            .limit(CAROUSEL_FETCH_LIMIT);

        let rows = self.store.select(&query).await?;
        let articles = to_articles(&rows);
        info!(category, count = articles.len(), "carousel fetched");
        self.carousel_cache.set(&key, &articles);
        Ok(articles)
    }

    /// Every article of a category, newest first. Not cached.
    pub async fn category_listing(&self, category: &str) -> Vec<Article> {
        let query = ArticleQuery::select(CARD_COLUMNS)
            .eq(Column::Category, category)
            .order_desc(Column::PublishedAt);

        match self.store.select(&query).await {
            Ok(rows) => to_articles(&rows),
            Err(err) => {
                warn!(category, %err, "failed to fetch category listing");
                Vec::new()
            }
        }
    }

    // == Article ==
    /// A full article by slug, or `None` when it does not exist or the
    /// store could not be reached.
    pub async fn article(&self, slug: &str) -> Option<ArticleDetail> {
        if let Some(detail) = self.article_cache.get(slug) {
            return Some(detail);
        }

        let query = ArticleQuery::select_all().eq(Column::Slug, slug);
        let record = match self.store.maybe_single(&query).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(slug, "article not found");
                return None;
            }
            Err(err) => {
                warn!(slug, %err, "failed to fetch article");
                return None;
            }
        };

        match self.recommended(&record).await {
            Ok(recommended) => {
                let detail = ArticleDetail::new(&record, recommended);
                self.article_cache.set(slug, &detail);
                Some(detail)
            }
            Err(err) => {
                warn!(slug, %err, "failed to fetch recommendations");
                Some(ArticleDetail::new(&record, Vec::new()))
            }
        }
    }

    async fn recommended(&self, record: &ArticleRecord) -> Result<Vec<Article>, StoreError> {
        let query = ArticleQuery::select(CARD_COLUMNS)
            .eq(Column::Category, record.category.as_str())
            .neq(Column::Id, record.id.as_str())
            .order_desc(Column::PublishedAt)
            .limit(RECOMMENDED_LIMIT);
        let rows = self.store.select(&query).await?;
        Ok(to_articles(&rows))
    }

    // == Maintenance ==
    /// Purges expired entries from all three caches.
    pub fn sweep_expired(&self) -> usize {
        self.hero_cache.sweep_expired()
            + self.carousel_cache.sweep_expired()
            + self.article_cache.sweep_expired()
    }

    pub fn stats(&self) -> FeedStats {
        FeedStats {
            hero: self.hero_cache.stats(),
            carousel: self.carousel_cache.stats(),
            article: self.article_cache.stats(),
        }
    }
}

fn to_articles(rows: &[ArticleRecord]) -> Vec<Article> {
    rows.iter().map(Article::from).collect()
}
