//! Images Module
//!
//! Cache-backed image loading: a cache hit skips the fetch, a successful fetch
//! populates the cache, a failed one leaves it untouched.

mod loader;
mod uri;

pub use loader::{ImageFetcher, ImageLoader, PrefetchReport};
pub use uri::normalize_uri;
