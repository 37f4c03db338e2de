//! Page layouts built from article lists

use serde::Serialize;

use crate::models::Article;

/// Front page: one hero, two secondary cards and a list of six.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeroSections {
    pub hero: Option<Article>,
    pub secondary: Vec<Article>,
    pub list: Vec<Article>,
}

impl HeroSections {
    pub fn from_articles(articles: Vec<Article>) -> Self {
        let mut iter = articles.into_iter();
        Self {
            hero: iter.next(),
            secondary: iter.by_ref().take(2).collect(),
            list: iter.take(6).collect(),
        }
    }

    /// Nothing to render.
    pub fn is_empty(&self) -> bool {
        self.hero.is_none()
    }
}

/// Category page: a central hero flanked by two columns of two, then the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryPageLayout {
    pub hero: Option<Article>,
    pub left: Vec<Article>,
    pub right: Vec<Article>,
    pub remaining: Vec<Article>,
}

impl CategoryPageLayout {
    pub fn from_articles(articles: Vec<Article>) -> Self {
        let mut iter = articles.into_iter();
        Self {
            hero: iter.next(),
            left: iter.by_ref().take(2).collect(),
            right: iter.by_ref().take(2).collect(),
            remaining: iter.collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hero.is_none()
    }
}
