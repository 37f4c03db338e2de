//! Article query builder
//!
//! The subset of the content store's query language the site uses:
//! column selection, equality and inequality filters, a single ordering
//! and a row limit.

use std::cmp::Ordering;

use crate::models::ArticleRecord;

/// Columns that can be filtered or ordered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Slug,
    Category,
    PublishedAt,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Slug => "slug",
            Column::Category => "category",
            Column::PublishedAt => "published_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq(Column, String),
    Neq(Column, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Columns(Vec<&'static str>),
}

/// Columns needed to render article cards.
pub const CARD_COLUMNS: &[&str] = &[
    "id",
    "title",
    "slug",
    "category",
    "author",
    "image_url",
    "published_at",
    "placeholder_url",
];

// == Article Query ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub selection: Selection,
    pub filters: Vec<Filter>,
    pub order: Option<(Column, Direction)>,
    pub limit: Option<usize>,
}

impl ArticleQuery {
    /// Query selecting every column.
    pub fn select_all() -> Self {
        Self {
            selection: Selection::All,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Query selecting the named columns.
    pub fn select(columns: &[&'static str]) -> Self {
        Self {
            selection: Selection::Columns(columns.to_vec()),
            ..Self::select_all()
        }
    }

    pub fn eq(mut self, column: Column, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq(column, value.into()));
        self
    }

    pub fn neq(mut self, column: Column, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Neq(column, value.into()));
        self
    }

    pub fn order_desc(mut self, column: Column) -> Self {
        self.order = Some((column, Direction::Descending));
        self
    }

    pub fn limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// The `select` clause in PostgREST syntax.
    pub fn select_clause(&self) -> String {
        match &self.selection {
            Selection::All => "*".to_string(),
            Selection::Columns(columns) => columns.join(","),
        }
    }

    /// The `order` clause in PostgREST syntax.
    pub fn order_clause(&self) -> Option<String> {
        self.order
            .map(|(column, direction)| format!("{}.{}", column.as_str(), direction.as_str()))
    }

    /// Evaluates the filters against a record.
    pub fn matches(&self, record: &ArticleRecord) -> bool {
        self.filters.iter().all(|filter| match filter {
            Filter::Eq(column, value) => column_value(record, *column).as_deref() == Some(value),
            Filter::Neq(column, value) => column_value(record, *column).as_deref() != Some(value),
        })
    }

    /// Orders two records by the query's ordering.
    pub fn compare(&self, a: &ArticleRecord, b: &ArticleRecord) -> Ordering {
        let Some((column, direction)) = self.order else {
            return Ordering::Equal;
        };
        let ordering = match column {
            Column::PublishedAt => a.published_at.cmp(&b.published_at),
            _ => column_value(a, column).cmp(&column_value(b, column)),
        };
        match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

fn column_value(record: &ArticleRecord, column: Column) -> Option<String> {
    match column {
        Column::Id => Some(record.id.clone()),
        Column::Slug => record.slug.clone(),
        Column::Category => Some(record.category.clone()),
        Column::PublishedAt => Some(record.published_at.to_rfc3339()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::record;

    #[test]
    fn test_clauses() {
        let query = ArticleQuery::select(&["id", "title"])
            .eq(Column::Category, "Tech")
            .order_desc(Column::PublishedAt)
            .limit(8);

        assert_eq!(query.select_clause(), "id,title");
        assert_eq!(query.order_clause().as_deref(), Some("published_at.desc"));
        assert_eq!(query.limit, Some(8));
        assert_eq!(ArticleQuery::select_all().select_clause(), "*");
    }

    #[test]
    fn test_matches_eq_and_neq() {
        let query = ArticleQuery::select_all()
            .eq(Column::Category, "Tech")
            .neq(Column::Id, "2");

        assert!(query.matches(&record(1, "Tech", 1)));
        assert!(!query.matches(&record(2, "Tech", 1)));
        assert!(!query.matches(&record(3, "Sport", 1)));
    }

    #[test]
    fn test_neq_matches_missing_value() {
        let mut rec = record(1, "Tech", 1);
        rec.slug = None;
        assert!(ArticleQuery::select_all().neq(Column::Slug, "x").matches(&rec));
        assert!(!ArticleQuery::select_all().eq(Column::Slug, "x").matches(&rec));
    }

    #[test]
    fn test_compare_descending() {
        let query = ArticleQuery::select_all().order_desc(Column::PublishedAt);
        let older = record(1, "Tech", 1);
        let newer = record(2, "Tech", 2);
        assert_eq!(query.compare(&newer, &older), Ordering::Less);
    }
}
