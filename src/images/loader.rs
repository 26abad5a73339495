//! Image Loader
//!
//! Resolves image URIs through the shared cache, fetching only on a miss.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::cache::{duration_ms, Clock, SharedCache, SystemClock};
use crate::error::{FetchError, Result};
use crate::images::normalize_uri;

/// Default upper bound for a single fetch
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// == Image Fetcher ==
/// Produces a locally usable URI (decoded file, data URI, ...) for a remote image.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, uri: &str) -> impl Future<Output = Result<String>> + Send;
}

// == Prefetch Report ==
/// Outcome counts of a [`ImageLoader::prefetch`] batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Already cached, no fetch issued
    pub cached: usize,
    /// Fetched and stored
    pub fetched: usize,
    /// Fetch failed or URI invalid
    pub failed: usize,
}

// == Image Loader ==
/// Cache-first image loader shared by every row of a list.
///
/// Cloning is cheap: clones share the cache handle and the fetcher.
#[derive(Debug)]
pub struct ImageLoader<F, C = SystemClock> {
    /// Shared cache of normalized URI -> resolved URI
    cache: SharedCache<String, C>,
    /// Network side
    fetcher: Arc<F>,
    /// TTL for stored entries, cache default when None
    ttl: Option<Duration>,
    /// Upper bound for a single fetch
    timeout: Duration,
}

impl<F, C> Clone for ImageLoader<F, C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            fetcher: Arc::clone(&self.fetcher),
            ttl: self.ttl,
            timeout: self.timeout,
        }
    }
}

impl<F: ImageFetcher, C: Clock> ImageLoader<F, C> {
    /// Creates a loader over an existing cache handle.
    pub fn new(cache: SharedCache<String, C>, fetcher: F) -> Self {
        Self {
            cache,
            fetcher: Arc::new(fetcher),
            ttl: None,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Stores fetched images with `ttl` instead of the cache default.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Bounds every fetch by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The cache handle this loader reads and fills.
    pub fn cache(&self) -> &SharedCache<String, C> {
        &self.cache
    }

    // == Load ==
    /// Returns the resolved URI for `uri`, fetching it on a cache miss.
    ///
    /// The cache is written only when the fetch succeeds. The cache lock is
    /// not held while fetching, so two concurrent loads of the same URI may
    /// both fetch; the later `set` wins.
    pub async fn load(&self, uri: &str) -> Result<String> {
        self.load_inner(uri).await.map(|(resolved, _)| resolved)
    }

    // == Forget ==
    /// Drops the cached entry for `uri`, e.g. after the resolved file turned out broken.
    ///
    /// Returns whether an entry was present.
    pub async fn forget(&self, uri: &str) -> bool {
        match normalize_uri(uri) {
            Ok(key) => self.cache.write().await.delete(&key),
            Err(_) => false,
        }
    }

    /// Loads and reports whether the value came from the cache.
    async fn load_inner(&self, uri: &str) -> Result<(String, bool)> {
        let key = normalize_uri(uri)?;

        let cached = self.cache.write().await.get(&key);
        if let Some(resolved) = cached {
            debug!(uri = %key, "Image cache hit");
            return Ok((resolved, true));
        }

        let resolved = match tokio::time::timeout(self.timeout, self.fetcher.fetch(&key)).await {
            Ok(Ok(resolved)) => resolved,
            Ok(Err(err)) => {
                warn!(uri = %key, error = %err, "Image fetch failed");
                return Err(err);
            }
            Err(_) => {
                let after_ms = duration_ms(self.timeout);
                warn!(uri = %key, after_ms, "Image fetch timed out");
                return Err(FetchError::Timeout { uri: key, after_ms });
            }
        };

        self.cache
            .write()
            .await
            .set(key.clone(), resolved.clone(), self.ttl);
        debug!(uri = %key, "Image fetched and cached");
        Ok((resolved, false))
    }
}

impl<F, C> ImageLoader<F, C>
where
    F: ImageFetcher + 'static,
    C: Clock + 'static,
{
    // == Prefetch ==
    /// Warms the cache for rows about to be rendered. Fetches run concurrently.
    ///
    /// URIs that normalize to the same key are loaded once and counted once.
    /// Invalid URIs count as failed without spawning a load.
    pub async fn prefetch<I, S>(&self, uris: I) -> PrefetchReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut report = PrefetchReport::default();
        let mut keys = HashSet::new();
        for uri in uris {
            let uri: String = uri.into();
            match normalize_uri(&uri) {
                Ok(key) => {
                    keys.insert(key);
                }
                Err(_) => report.failed += 1,
            }
        }

        let mut tasks = JoinSet::new();
        for key in keys {
            let loader = self.clone();
            tasks.spawn(async move { loader.load_inner(&key).await });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok((_, true))) => report.cached += 1,
                Ok(Ok((_, false))) => report.fetched += 1,
                Ok(Err(_)) => report.failed += 1,
                Err(err) => {
                    warn!(error = %err, "Prefetch task did not complete");
                    report.failed += 1;
                }
            }
        }
        debug!(?report, "Prefetch finished");
        report
    }
}
