//! Cache Statistics Module
//!
//! Tracks occupancy and hit/miss/eviction counters.

use serde::Serialize;

// == Cache Stats ==
/// Read-only snapshot of cache occupancy and performance counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Live (non-expired) entries at snapshot time
    pub count: usize,
    /// Configured capacity
    pub max_entries: usize,
    /// Sum of live entry weights, `None` when no weigher is configured
    pub total_size_bytes: Option<usize>,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted to make room
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_evictions(&mut self, n: usize) {
        self.evictions += n as u64;
    }
}
