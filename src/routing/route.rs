//! Hash route parsing

use std::fmt;

use serde::Serialize;

use super::categories::{CategoryInfo, CATEGORIES};

const ARTICLE_PREFIX: &str = "article/";

/// A page of the site, resolved from its hash path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Route {
    Home,
    Category { category: &'static CategoryInfo },
    Article { slug: String },
    Contact,
    Redactie,
    Terms,
    Privacy,
}

impl Route {
    /// Resolves a hash path such as `#/stiri` or `/article/foo`.
    ///
    /// The leading `#` is optional. Empty and unknown paths resolve to the
    /// home page.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = path.trim_start_matches('/').trim_end_matches('/');

        if let Some(slug) = path.strip_prefix(ARTICLE_PREFIX) {
            if !slug.is_empty() && !slug.contains('/') {
                return Route::Article {
                    slug: slug.to_string(),
                };
            }
            return Route::Home;
        }

        match path {
            "contact" => Route::Contact,
            "redactie" => Route::Redactie,
            "terms" => Route::Terms,
            "privacy" => Route::Privacy,
            other => CATEGORIES
                .iter()
                .find(|c| c.slug == other)
                .map(|category| Route::Category { category })
                .unwrap_or(Route::Home),
        }
    }

    /// Canonical hash path.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Category { category } => format!("#/{}", category.slug),
            Route::Article { slug } => format!("#/{}{}", ARTICLE_PREFIX, slug),
            Route::Contact => "#/contact".to_string(),
            Route::Redactie => "#/redactie".to_string(),
            Route::Terms => "#/terms".to_string(),
            Route::Privacy => "#/privacy".to_string(),
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Route::Home)
    }

    /// Every static page except home, warmed after the first render.
    pub fn prefetch_targets() -> Vec<Route> {
        CATEGORIES
            .iter()
            .map(|category| Route::Category { category })
            .chain([Route::Contact, Route::Redactie, Route::Terms, Route::Privacy])
            .collect()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static_pages() {
        assert_eq!(Route::parse("#/contact"), Route::Contact);
        assert_eq!(Route::parse("/redactie"), Route::Redactie);
        assert_eq!(Route::parse("#/terms/"), Route::Terms);
        assert_eq!(Route::parse("privacy"), Route::Privacy);
    }

    #[test]
    fn test_parse_category() {
        match Route::parse("#/stiri") {
            Route::Category { category } => assert_eq!(category.name, "Știri"),
            other => panic!("unexpected route {:?}", other),
        }
    }

    #[test]
    fn test_parse_article() {
        assert_eq!(
            Route::parse("#/article/noutati-2024"),
            Route::Article {
                slug: "noutati-2024".to_string()
            }
        );
        assert_eq!(Route::parse("#/article/"), Route::Home);
        assert_eq!(Route::parse("#/article/a/b"), Route::Home);
    }

    #[test]
    fn test_empty_and_unknown_go_home() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#"), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#/nowhere"), Route::Home);
    }

    #[test]
    fn test_path_round_trips() {
        for route in Route::prefetch_targets() {
            assert_eq!(Route::parse(&route.path()), route);
        }
        let article = Route::Article {
            slug: "x".to_string(),
        };
        assert_eq!(Route::parse(&article.path()), article);
    }

    #[test]
    fn test_prefetch_targets_exclude_home() {
        let targets = Route::prefetch_targets();
        assert_eq!(targets.len(), CATEGORIES.len() + 4);
        assert!(targets.iter().all(|r| !r.is_home()));
    }

    #[test]
    fn test_serializes_with_page_tag() {
        let json = serde_json::to_value(Route::parse("#/tech")).unwrap();
        assert_eq!(json["page"], "category");
        assert_eq!(json["category"]["slug"], "tech");
    }
}
