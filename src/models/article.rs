//! Article models
//!
//! `ArticleRecord` is the content store row; `Article` is the display form
//! cached and served to the page components.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Europe::Bucharest;
use serde::{Deserialize, Serialize};

use crate::images::placeholder_for;

const RO_MONTHS: [&str; 12] = [
    "ianuarie",
    "februarie",
    "martie",
    "aprilie",
    "mai",
    "iunie",
    "iulie",
    "august",
    "septembrie",
    "octombrie",
    "noiembrie",
    "decembrie",
];

/// Formats a date the Romanian long way, e.g. `5 martie 2024`, on the
/// Bucharest calendar.
pub fn format_ro_date(date: &DateTime<Utc>) -> String {
    let date = date.with_timezone(&Bucharest);
    let month = RO_MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

// == Article Record ==
/// One row of the `articles` collection.
///
/// Columns left out of a subset select deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub category: String,
    pub author: String,
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub placeholder_url: Option<String>,
}

// == Article ==
/// Display form of an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub category: String,
    pub author: String,
    /// Display-formatted publication date
    pub date: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_url: Option<String>,
}

impl Article {
    /// Hash route of the article page, when it has a slug.
    pub fn href(&self) -> Option<String> {
        self.slug.as_ref().map(|slug| format!("#/article/{}", slug))
    }
}

impl From<&ArticleRecord> for Article {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            category: record.category.clone(),
            author: record.author.clone(),
            date: format_ro_date(&record.published_at),
            image_url: record.image_url.clone(),
            slug: record.slug.clone(),
            placeholder_url: placeholder_for(&record.image_url, record.placeholder_url.as_deref()),
        }
    }
}

// == Article Detail ==
/// A full article page: the article, its body and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDetail {
    pub article: Article,
    /// RFC 3339 publication timestamp
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Body split into paragraphs on blank lines
    pub paragraphs: Vec<String>,
    pub recommended: Vec<Article>,
}

impl ArticleDetail {
    pub fn new(record: &ArticleRecord, recommended: Vec<Article>) -> Self {
        let paragraphs = record
            .content
            .as_deref()
            .unwrap_or_default()
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            article: Article::from(record),
            published_at: record.published_at,
            excerpt: record.excerpt.clone(),
            paragraphs,
            recommended,
        }
    }
}
