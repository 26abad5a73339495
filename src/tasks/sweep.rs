//! Cache Sweep Task
//!
//! Background task that periodically drops stale cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, SharedCache};

/// Spawns a background task that sweeps the cache on a fixed interval.
///
/// Each run removes entries whose TTL has elapsed, then entries older than
/// `max_age` regardless of TTL. The cache never schedules this itself; the
/// application owns the task and aborts it on shutdown.
///
/// # Arguments
/// * `cache` - Shared handle to the cache
/// * `interval` - Time between sweeps
/// * `max_age` - Age after which entries are dropped
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(BoundedCache::<String>::new(100, ttl)));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(60), max_age);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V, C>(
    cache: SharedCache<V, C>,
    interval: Duration,
    max_age: Duration,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            max_age_secs = max_age.as_secs(),
            "Starting cache sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let (expired, aged) = {
                let mut cache_guard = cache.write().await;
                let expired = cache_guard.purge_expired();
                let aged = cache_guard.clear_expired(max_age);
                (expired, aged)
            };

            if expired + aged > 0 {
                info!(expired, aged, "Cache sweep removed entries");
            } else {
                debug!("Cache sweep: nothing to remove");
            }
        }
    })
}
