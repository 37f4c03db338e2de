//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the TTL cache and key derivation.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{category_key, slugify, MemoryStorage, Storage, TtlCache};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);
const TTL_MS: i64 = 300_000;

// == Strategies ==
/// Generates cache keys as produced by the fetchers
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,48}".prop_map(|s| s)
}

/// Generates arbitrary list payloads
fn payload_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(".{0,40}", 0..10)
}

/// Category names mixing case, diacritics and punctuation
fn category_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-zăâîșțĂÂÎȘȚ &!-]{0,24}".prop_map(|s| s)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Writing then reading before the TTL elapses returns the same payload
    #[test]
    fn prop_roundtrip_before_ttl(
        key in valid_key_strategy(),
        payload in payload_strategy(),
        age in 0i64..=TTL_MS
    ) {
        let cache: TtlCache<Vec<String>> =
            TtlCache::new(Arc::new(MemoryStorage::new()), "prop_", TEST_TTL);

        cache.set_at(&key, &payload, 1_000_000);
        prop_assert_eq!(cache.get_at(&key, 1_000_000 + age), Some(payload));
    }

    // An entry older than the TTL reads as absent and is removed from storage
    #[test]
    fn prop_expired_entry_is_purged(
        key in valid_key_strategy(),
        payload in payload_strategy(),
        overshoot in 1i64..10_000_000
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let cache: TtlCache<Vec<String>> = TtlCache::new(storage.clone(), "prop_", TEST_TTL);

        cache.set_at(&key, &payload, 0);
        prop_assert_eq!(cache.get_at(&key, TTL_MS + overshoot), None);
        prop_assert!(storage.get_item(&cache.storage_key(&key)).unwrap().is_none());
    }

    // Key derivation is deterministic, ASCII and keeps distinct names apart
    #[test]
    fn prop_category_keys(a in category_name_strategy(), b in category_name_strategy()) {
        let key_a = category_key(&a);
        prop_assert_eq!(&key_a, &category_key(&a));
        prop_assert!(key_a.is_ascii());
        let slug = slugify(&a);
        let prefix = if slug.is_empty() { "category" } else { slug.as_str() };
        let expected = format!("{}-", prefix);
        prop_assert!(key_a.starts_with(&expected));
        if a != b {
            // Digest collisions on short names are not expected in this range
            prop_assert_ne!(key_a, category_key(&b));
        }
    }
}
