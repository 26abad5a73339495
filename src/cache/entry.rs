//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and access
//! bookkeeping.

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Lifetime in milliseconds measured from `created_at`
    pub ttl_ms: u64,
    /// Number of successful reads since insertion
    pub access_count: u64,
    /// Timestamp of the last successful read, `created_at` until first read
    pub last_accessed_at: u64,
    /// Weight reported by the cache's weigher, if one is configured
    pub size_bytes: Option<usize>,
    /// Position in the cache-wide touch order; breaks timestamp ties
    pub(crate) touch_seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a fresh entry with zero accesses.
    pub fn new(key: String, value: V, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            key,
            value,
            created_at: now_ms,
            ttl_ms,
            access_count: 0,
            last_accessed_at: now_ms,
            size_bytes: None,
            touch_seq: 0,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived its TTL.
    ///
    /// An entry is stale only once `now - created_at` is strictly greater
    /// than the TTL; at exactly `ttl_ms` it is still served.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) > self.ttl_ms
    }

    // == Age ==
    /// Milliseconds since insertion (zero if the clock went backwards).
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.ttl_ms.saturating_sub(self.age_ms(now_ms))
    }

    // == Record Access ==
    /// Bumps the access counter and recency for a successful read.
    pub(crate) fn record_access(&mut self, now_ms: u64, seq: u64) {
        self.access_count += 1;
        self.last_accessed_at = now_ms;
        self.touch_seq = seq;
    }

    /// Eviction rank: lower sorts first and is evicted first.
    pub(crate) fn eviction_rank(&self) -> (u64, u64, u64) {
        (self.access_count, self.last_accessed_at, self.touch_seq)
    }
}

// == Utility Functions ==
/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn duration_ms(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("k".to_string(), "v", 1_000, 500);

        assert_eq!(entry.value, "v");
        assert_eq!(entry.access_count, 0);
        assert_eq!(entry.last_accessed_at, 1_000);
        assert!(entry.size_bytes.is_none());
        assert!(!entry.is_expired(1_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("k".to_string(), (), 1_000, 500);

        // Exactly at the TTL the entry is still live
        assert!(!entry.is_expired(1_500));
        assert!(entry.is_expired(1_501));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("k".to_string(), (), 1_000, 500);

        assert_eq!(entry.ttl_remaining_ms(1_000), 500);
        assert_eq!(entry.ttl_remaining_ms(1_400), 100);
        assert_eq!(entry.ttl_remaining_ms(9_000), 0);
    }

    #[test]
    fn test_clock_going_backwards() {
        let entry = CacheEntry::new("k".to_string(), (), 1_000, 0);

        assert_eq!(entry.age_ms(500), 0);
        assert!(!entry.is_expired(500));
    }

    #[test]
    fn test_record_access() {
        let mut entry = CacheEntry::new("k".to_string(), (), 1_000, 500);

        entry.record_access(1_200, 7);
        entry.record_access(1_300, 9);

        assert_eq!(entry.access_count, 2);
        assert_eq!(entry.last_accessed_at, 1_300);
        assert_eq!(entry.eviction_rank(), (2, 1_300, 9));
    }

    #[test]
    fn test_duration_ms_saturates() {
        assert_eq!(duration_ms(std::time::Duration::from_secs(2)), 2_000);
        assert_eq!(duration_ms(std::time::Duration::MAX), u64::MAX);
    }
}
