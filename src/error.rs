//! Error types for the image loading path
//!
//! The cache and the virtualizer never fail: a miss is `None` and bad numeric
//! input is clamped. Only fetching can go wrong.

use thiserror::Error;

// == Fetch Error Enum ==
/// Failure of a single image fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// URI was empty after normalization
    #[error("Invalid image uri: {0:?}")]
    InvalidUri(String),

    /// Fetcher could not produce the image
    #[error("Image unavailable: {uri}: {reason}")]
    Unavailable { uri: String, reason: String },

    /// Fetcher did not complete in time
    #[error("Image fetch timed out after {after_ms}ms: {uri}")]
    Timeout { uri: String, after_ms: u64 },
}

impl FetchError {
    /// Convenience constructor for fetcher implementations.
    pub fn unavailable(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        FetchError::Unavailable {
            uri: uri.into(),
            reason: reason.into(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for image loading.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FetchError::unavailable("https://cdn/a.jpg", "404");
        assert_eq!(err.to_string(), "Image unavailable: https://cdn/a.jpg: 404");

        let err = FetchError::Timeout {
            uri: "https://cdn/b.jpg".to_string(),
            after_ms: 1500,
        };
        assert!(err.to_string().contains("1500ms"));

        let err = FetchError::InvalidUri("  ".to_string());
        assert!(err.to_string().starts_with("Invalid image uri"));
    }
}
