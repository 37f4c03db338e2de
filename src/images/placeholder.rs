//! Blurred placeholder URLs

use super::{base_url, provider_for};

const LOW_RES_WIDTH: u32 = 32;
const LOW_RES_QUALITY: u8 = 12;
const BLUR_AMOUNT: u32 = 40;

/// Derives a tiny blurred variant of `url` for blur-up loading.
///
/// Returns `None` for empty or unrecognized URLs; callers then skip the
/// blur-up effect.
pub fn placeholder_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    let provider = provider_for(url)?;
    Some((provider.blurred)(
        base_url(url),
        LOW_RES_WIDTH,
        LOW_RES_QUALITY,
        BLUR_AMOUNT,
    ))
}

/// Picks the precomputed placeholder when present, else derives one.
pub fn placeholder_for(image_url: &str, precomputed: Option<&str>) -> Option<String> {
    match precomputed {
        Some(url) if !url.is_empty() => Some(url.to_string()),
        _ => placeholder_url(image_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pexels_placeholder() {
        assert_eq!(
            placeholder_url("https://images.pexels.com/photos/2/p.jpeg?w=1260&h=750").as_deref(),
            Some("https://images.pexels.com/photos/2/p.jpeg?auto=compress&cs=tinysrgb&w=32&q=12&blur=40&fm=webp")
        );
    }

    #[test]
    fn test_unsplash_placeholder() {
        assert_eq!(
            placeholder_url("https://images.unsplash.com/photo-9").as_deref(),
            Some("https://images.unsplash.com/photo-9?w=32&q=12&auto=format&blur=40")
        );
    }

    #[test]
    fn test_unrecognized_has_no_placeholder() {
        assert_eq!(placeholder_url(""), None);
        assert_eq!(placeholder_url("https://abc.supabase.co/img.jpg"), None);
    }

    #[test]
    fn test_deterministic() {
        let url = "https://images.unsplash.com/photo-1?fit=crop";
        assert_eq!(placeholder_url(url), placeholder_url(url));
    }

    #[test]
    fn test_precomputed_wins() {
        let derived = placeholder_for("https://images.unsplash.com/photo-1", Some("data:image/webp;base64,AAA"));
        assert_eq!(derived.as_deref(), Some("data:image/webp;base64,AAA"));

        let fallback = placeholder_for("https://images.unsplash.com/photo-1", Some(""));
        assert!(fallback.unwrap().contains("blur=40"));
    }
}
