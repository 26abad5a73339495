//! Cache Module
//!
//! Provides an in-memory bounded cache with TTL expiration and
//! frequency-then-recency batch eviction.

mod clock;
mod entry;
mod eviction;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub(crate) use entry::duration_ms;
pub use eviction::{eviction_batch, select_victims};
pub use stats::CacheStats;
pub use store::BoundedCache;

/// Handle through which several collaborators share one cache instance.
pub type SharedCache<V, C> = Arc<RwLock<BoundedCache<V, C>>>;

// == Public Constants ==
/// Default share of capacity evicted per batch
pub const DEFAULT_EVICTION_PERCENT: u8 = 20;

/// Default TTL in seconds (30 minutes)
pub const DEFAULT_TTL_SECS: u64 = 30 * 60;
