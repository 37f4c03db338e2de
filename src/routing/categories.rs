//! Category table

use serde::Serialize;

use crate::cache::slugify;

/// A site section backed by one store category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// Path segment, e.g. `stiri`
    pub slug: &'static str,
    /// Category name as stored, e.g. `Știri`
    pub name: &'static str,
    pub description: &'static str,
}

/// Every category, in front-page carousel order.
pub static CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        slug: "stiri",
        name: "Știri",
        description: "Ultimele noutati din Romania si din lume.",
    },
    CategoryInfo {
        slug: "fashion",
        name: "Fashion",
        description: "Tendinte si stil in moda.",
    },
    CategoryInfo {
        slug: "beauty",
        name: "Beauty",
        description: "Sfaturi de frumusete si ingrijire.",
    },
    CategoryInfo {
        slug: "lifestyle",
        name: "Lifestyle",
        description: "Descopera cele mai noi tendinte.",
    },
    CategoryInfo {
        slug: "cultura",
        name: "Cultură",
        description: "Arta, muzica si evenimente culturale.",
    },
    CategoryInfo {
        slug: "tech",
        name: "Tech",
        description: "Gadgeturi, aplicatii si inovatie.",
    },
    CategoryInfo {
        slug: "sanatate",
        name: "Sănătate",
        description: "Sfaturi pentru o viata sanatoasa.",
    },
    CategoryInfo {
        slug: "sport",
        name: "Sport",
        description: "Stiri si evenimente sportive.",
    },
    CategoryInfo {
        slug: "horoscop",
        name: "Horoscop",
        description: "Descopera ce iti rezerva astrele.",
    },
];

impl CategoryInfo {
    /// Carousel heading, e.g. `ȘTIRI`.
    pub fn title(&self) -> String {
        self.name.to_uppercase()
    }
}

/// Looks a category up by path slug or store name, ignoring case and
/// diacritics.
pub fn find_category(name: &str) -> Option<&'static CategoryInfo> {
    let wanted = slugify(name);
    if wanted.is_empty() {
        return None;
    }
    CATEGORIES.iter().find(|c| c.slug == wanted)
}
