//! Property-Based Tests for Image URL rewriting

use proptest::prelude::*;

use crate::images::{optimize_url, placeholder_url, srcset, ImageSize, SRCSET_WIDTHS};

// == Strategies ==
fn size_strategy() -> impl Strategy<Value = ImageSize> {
    prop::sample::select(ImageSize::ALL.to_vec())
}

/// Recognized provider URLs with an arbitrary path and optional query
fn provider_url_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("images.pexels.com"), Just("images.unsplash.com")],
        "[a-z0-9-]{1,24}",
        prop::option::of("[a-z]{1,6}=[a-z0-9]{1,6}"),
    )
        .prop_map(|(host, path, query)| match query {
            Some(query) => format!("https://{host}/photos/{path}.jpeg?{query}"),
            None => format!("https://{host}/photos/{path}.jpeg"),
        })
}

/// Hosts that are not image providers
fn foreign_url_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{3,10}", "[a-z0-9/]{0,20}").prop_map(|(host, path)| format!("https://{host}.example.org/{path}"))
}

fn query_params(url: &str) -> Vec<(String, String)> {
    url::Url::parse(url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Recognized URLs carry the profile's width and quality, and drop the old query
    #[test]
    fn prop_recognized_url_carries_profile(url in provider_url_strategy(), size in size_strategy()) {
        let optimized = optimize_url(&url, size.width(), size.quality());
        let params = query_params(&optimized);

        prop_assert!(params.contains(&("w".to_string(), size.width().to_string())));
        prop_assert!(params.contains(&("q".to_string(), size.quality().to_string())));
        prop_assert_eq!(optimized.matches('?').count(), 1);
    }

    // Unrecognized URLs pass through untouched with no srcset or placeholder
    #[test]
    fn prop_foreign_url_unchanged(url in foreign_url_strategy(), size in size_strategy()) {
        prop_assert_eq!(optimize_url(&url, size.width(), size.quality()), url.clone());
        prop_assert!(srcset(&url, size.quality()).is_empty());
        prop_assert!(placeholder_url(&url).is_none());
    }

    // Every srcset candidate requests its own breakpoint at the profile quality
    #[test]
    fn prop_srcset_widths(url in provider_url_strategy(), size in size_strategy()) {
        let entries = srcset(&url, size.quality());
        prop_assert_eq!(entries.len(), SRCSET_WIDTHS.len());
        for entry in entries {
            let params = query_params(&entry.url);
            prop_assert!(params.contains(&("w".to_string(), entry.width.to_string())));
            prop_assert!(params.contains(&("q".to_string(), size.quality().to_string())));
        }
    }
}
