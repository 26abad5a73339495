//! Cache key normalization for image URIs.

use crate::error::{FetchError, Result};

/// Normalizes an image URI into a cache key.
///
/// Surrounding whitespace and any `#fragment` are dropped so the same image
/// referenced slightly differently by two rows shares one entry.
pub fn normalize_uri(uri: &str) -> Result<String> {
    let trimmed = uri.trim();
    let without_fragment = trimmed
        .split_once('#')
        .map_or(trimmed, |(base, _)| base)
        .trim_end();

    if without_fragment.is_empty() {
        return Err(FetchError::InvalidUri(uri.to_string()));
    }
    Ok(without_fragment.to_string())
}
