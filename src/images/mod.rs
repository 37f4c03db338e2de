//! Images Module
//!
//! Provider-aware image URL rewriting, blurred placeholders and the
//! per-image loading state machine.

mod loader;
mod placeholder;
mod profile;
mod provider;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use loader::{Decoding, FetchPriority, ImageLoader, ImageOptions, ImageRender, LoadState, Loading};
pub use placeholder::{placeholder_for, placeholder_url};
pub use profile::ImageSize;
pub use provider::{optimize_url, provider_for, srcset, ImageProvider, SrcSetEntry, PROVIDERS};

// == Public Constants ==
/// Breakpoint widths offered in every generated srcset
pub const SRCSET_WIDTHS: [u32; 6] = [360, 480, 640, 768, 1024, 1200];

/// Pre-load margin in pixels for lazy image visibility
pub const LAZY_MARGIN_PX: f64 = 200.0;

/// Text shown in place of an image that failed to load
pub const IMAGE_UNAVAILABLE: &str = "Imagine indisponibila";

/// Returns the URL without its query string.
pub(crate) fn base_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
