//! Storage key derivation for category-scoped caches

use md5::{Digest, Md5};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Hex digits of the name digest kept in a key
const DIGEST_HEX_LEN: usize = 8;

/// ASCII slug of a display name: diacritics stripped, lowercase, runs of
/// other characters collapsed to a single `-`.
///
/// `"Știri"` and `"stiri"` share the slug `stiri`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Cache key for a category name.
///
/// The readable slug is followed by a hash of the exact name, so names
/// that differ only in case or diacritics never share an entry: they may
/// match different rows in the content store.
pub fn category_key(name: &str) -> String {
    let slug = slugify(name);
    let slug = if slug.is_empty() { "category" } else { &slug };
    format!("{}-{}", slug, name_digest(name))
}

fn name_digest(name: &str) -> String {
    let digest = Md5::new().chain_update(name.as_bytes()).finalize();
    let mut hex = hex::encode(digest);
    hex.truncate(DIGEST_HEX_LEN);
    hex
}
