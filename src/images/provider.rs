//! Image Provider Module
//!
//! Table of known image hosts, each with its own query-parameter dialect
//! for width, quality, format and blur.

use serde::Serialize;
use url::Url;

use super::{base_url, SRCSET_WIDTHS};

// == Image Provider ==
/// A recognized image host and the URL builders for its query dialect.
///
/// Adding a provider means adding one entry to [`PROVIDERS`].
#[derive(Debug)]
pub struct ImageProvider {
    /// Short provider name
    pub name: &'static str,
    /// Registrable domain matched against the URL host
    pub domain: &'static str,
    /// Builds a resized URL from a base URL, width and quality
    pub resize: fn(&str, u32, u8) -> String,
    /// Builds a blurred placeholder URL from base URL, width, quality and blur radius
    pub blurred: fn(&str, u32, u8, u32) -> String,
}

impl ImageProvider {
    /// Checks whether the URL is served by this provider.
    pub fn matches(&self, url: &Url) -> bool {
        url.host_str().is_some_and(|host| {
            host == self.domain
                || host
                    .strip_suffix(self.domain)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

fn pexels_resize(base: &str, width: u32, quality: u8) -> String {
    format!("{base}?auto=compress&cs=tinysrgb&w={width}&q={quality}&fm=webp")
}

fn pexels_blurred(base: &str, width: u32, quality: u8, blur: u32) -> String {
    format!("{base}?auto=compress&cs=tinysrgb&w={width}&q={quality}&blur={blur}&fm=webp")
}

fn unsplash_resize(base: &str, width: u32, quality: u8) -> String {
    format!("{base}?w={width}&q={quality}&auto=format")
}

fn unsplash_blurred(base: &str, width: u32, quality: u8, blur: u32) -> String {
    format!("{base}?w={width}&q={quality}&auto=format&blur={blur}")
}

/// Known image providers.
pub static PROVIDERS: &[ImageProvider] = &[
    ImageProvider {
        name: "pexels",
        domain: "pexels.com",
        resize: pexels_resize,
        blurred: pexels_blurred,
    },
    ImageProvider {
        name: "unsplash",
        domain: "unsplash.com",
        resize: unsplash_resize,
        blurred: unsplash_blurred,
    },
];

/// Finds the provider serving `url`, if any.
///
/// URLs that do not parse as absolute URLs never match.
pub fn provider_for(url: &str) -> Option<&'static ImageProvider> {
    let parsed = Url::parse(url).ok()?;
    PROVIDERS.iter().find(|provider| provider.matches(&parsed))
}

/// Rewrites `url` to request the given width and quality.
///
/// Unrecognized URLs are returned unchanged.
pub fn optimize_url(url: &str, width: u32, quality: u8) -> String {
    match provider_for(url) {
        Some(provider) => (provider.resize)(base_url(url), width, quality),
        None => url.to_string(),
    }
}

// == Source Set ==
/// One candidate of a responsive source-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SrcSetEntry {
    pub url: String,
    pub width: u32,
}

/// Generates the responsive source-set across [`SRCSET_WIDTHS`].
///
/// Empty for unrecognized providers.
pub fn srcset(url: &str, quality: u8) -> Vec<SrcSetEntry> {
    let Some(provider) = provider_for(url) else {
        return Vec::new();
    };
    let base = base_url(url);

    SRCSET_WIDTHS
        .iter()
        .map(|&width| SrcSetEntry {
            url: (provider.resize)(base, width, quality),
            width,
        })
        .collect()
}

/// Formats a source-set as an HTML `srcset` attribute value.
pub fn srcset_attr(entries: &[SrcSetEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{} {}w", entry.url, entry.width))
        .collect::<Vec<_>>()
        .join(", ")
}
