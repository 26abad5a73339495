//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration and
//! frequency-then-recency batch eviction.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{
    duration_ms, eviction_batch, select_victims, CacheEntry, CacheStats, Clock, SystemClock,
    DEFAULT_EVICTION_PERCENT,
};
use crate::config::Config;

// == Bounded Cache ==
/// Key-value store that never holds more than `max_entries` entries.
///
/// Reads never fail: a missing or expired key is `None`. A full cache makes
/// room by evicting the least-accessed, then least-recently-accessed entries.
#[derive(Debug)]
pub struct BoundedCache<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Time source for timestamps and expiry
    clock: C,
    /// Hit/miss/eviction counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL for entries inserted without an explicit one
    default_ttl: Duration,
    /// Share of capacity evicted per batch
    eviction_percent: u8,
    /// Optional weight function feeding `total_size_bytes`
    weigher: Option<fn(&V) -> usize>,
    /// Monotonic touch counter
    seq: u64,
}

impl<V> BoundedCache<V, SystemClock> {
    // == Constructor ==
    /// Creates a cache backed by the wall clock.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries (at least 1)
    /// * `default_ttl` - TTL for entries set without an explicit one
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self::with_clock(max_entries, default_ttl, SystemClock)
    }

    /// Creates a cache from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_entries, config.default_ttl())
            .with_eviction_percent(config.eviction_percent)
    }
}

impl<V, C: Clock> BoundedCache<V, C> {
    /// Creates a cache reading time from `clock`.
    pub fn with_clock(max_entries: usize, default_ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            default_ttl,
            eviction_percent: DEFAULT_EVICTION_PERCENT,
            weigher: None,
            seq: 0,
        }
    }

    /// Sets the eviction batch size as a percent of capacity (clamped to 1..=100).
    pub fn with_eviction_percent(mut self, percent: u8) -> Self {
        self.eviction_percent = percent.clamp(1, 100);
        self
    }

    /// Enables size tracking; `stats().total_size_bytes` becomes `Some`.
    ///
    /// Only entries set after this call are weighed.
    pub fn with_weigher(mut self, weigher: fn(&V) -> usize) -> Self {
        self.weigher = Some(weigher);
        self
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry for `key`.
    ///
    /// Overwriting resets the creation time and access history. Inserting a
    /// new key into a full cache first drops expired entries, then evicts a
    /// batch of the least valuable live ones.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let now = self.clock.now_ms();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.make_room(now);
        }

        let ttl_ms = duration_ms(ttl.unwrap_or(self.default_ttl));
        let mut entry = CacheEntry::new(key.clone(), value, now, ttl_ms);
        entry.size_bytes = self.weigher.map(|weigh| weigh(&entry.value));
        entry.touch_seq = self.next_seq();

        self.entries.insert(key, entry);
    }

    // == Has ==
    /// Returns true if `key` holds a live entry. Does not count as an access.
    pub fn has(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Entry ==
    /// Returns the live entry for `key` with its metadata, without touching it.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        let now = self.clock.now_ms();
        self.entries.get(key).filter(|entry| !entry.is_expired(now))
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Clear Expired ==
    /// Removes every entry older than `max_age`, whatever its own TTL.
    ///
    /// Returns the number of entries removed.
    pub fn clear_expired(&mut self, max_age: Duration) -> usize {
        let now = self.clock.now_ms();
        let max_age_ms = duration_ms(max_age);
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.age_ms(now) <= max_age_ms);
        before - self.entries.len()
    }

    // == Purge Expired ==
    /// Physically removes entries whose TTL has elapsed.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.purge_expired_at(now)
    }

    // == Stats ==
    /// Returns current occupancy and counters.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        let live = self.entries.values().filter(|entry| !entry.is_expired(now));

        let mut stats = self.stats.clone();
        stats.max_entries = self.max_entries;
        if self.weigher.is_some() {
            let (count, size) = live.fold((0, 0), |(count, size), entry| {
                (count + 1, size + entry.size_bytes.unwrap_or(0))
            });
            stats.count = count;
            stats.total_size_bytes = Some(size);
        } else {
            stats.count = live.count();
        }
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are stored, expired or not.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Accessors ==
    /// Configured capacity.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// TTL applied when `set` is called without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn purge_expired_at(&mut self, now: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    fn make_room(&mut self, now: u64) {
        let purged = self.purge_expired_at(now);
        if self.entries.len() < self.max_entries {
            debug!(purged, "Made room by dropping expired entries");
            return;
        }

        let batch = eviction_batch(self.max_entries, self.eviction_percent);
        let victims = select_victims(&self.entries, batch);
        for key in &victims {
            self.entries.remove(key);
        }
        self.stats.record_evictions(victims.len());
        debug!(
            purged,
            evicted = victims.len(),
            remaining = self.entries.len(),
            "Cache full, evicted batch"
        );
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

impl<V: Clone, C: Clock> BoundedCache<V, C> {
    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit bumps the entry's access count and recency, which protects it
    /// from later eviction. Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };
        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            return None;
        }

        let seq = self.next_seq();
        let entry = self.entries.get_mut(key)?;
        entry.record_access(now, seq);
        self.stats.record_hit();
        Some(entry.value.clone())
    }
}
