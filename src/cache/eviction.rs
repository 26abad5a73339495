//! Eviction Module
//!
//! Chooses which entries to drop when the cache is full.
//!
//! Entries are ranked by access count first and last access time second, so
//! a burst of distinct cold keys cannot push out a key that is read on every
//! row. Victims are taken in batches to amortize the ranking cost.

use std::collections::HashMap;

use crate::cache::CacheEntry;

// == Batch Size ==
/// Number of entries to evict at once: `ceil(max_entries * percent / 100)`,
/// never less than one and never more than `max_entries`.
pub fn eviction_batch(max_entries: usize, percent: u8) -> usize {
    let percent = usize::from(percent.clamp(1, 100));
    let batch = (max_entries.saturating_mul(percent)).div_ceil(100);
    batch.clamp(1, max_entries.max(1))
}

// == Select Victims ==
/// Returns up to `count` keys in eviction order (least valuable first).
pub fn select_victims<V>(entries: &HashMap<String, CacheEntry<V>>, count: usize) -> Vec<String> {
    if count == 0 || entries.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&CacheEntry<V>> = entries.values().collect();
    if count < ranked.len() {
        ranked.select_nth_unstable_by_key(count - 1, |entry| entry.eviction_rank());
        ranked.truncate(count);
    }
    ranked.sort_unstable_by_key(|entry| entry.eviction_rank());

    ranked.into_iter().map(|entry| entry.key.clone()).collect()
}
