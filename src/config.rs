//! Configuration Module
//!
//! Handles loading cache, sweep and list settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_EVICTION_PERCENT, DEFAULT_TTL_SECS};
use crate::virtual_list::DEFAULT_OVERSCAN;

/// Runtime configuration for the cache core and its maintenance task.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// Share of capacity evicted in one batch when the cache is full (1..=100)
    pub eviction_percent: u8,
    /// Maintenance sweep interval in seconds
    pub sweep_interval: u64,
    /// Age in seconds after which the sweep drops an entry regardless of TTL
    pub sweep_max_age: u64,
    /// Upper bound in seconds for a single image fetch
    pub fetch_timeout: u64,
    /// Rows rendered beyond each edge of the visible window
    pub overscan: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 1800)
    /// - `CACHE_EVICTION_PERCENT` - Eviction batch as percent of capacity (default: 20)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SWEEP_MAX_AGE` - Maximum entry age in seconds (default: 3600)
    /// - `FETCH_TIMEOUT` - Image fetch timeout in seconds (default: 10)
    /// - `LIST_OVERSCAN` - Overscan rows (default: 3)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("CACHE_MAX_ENTRIES", defaults.max_entries).max(1),
            default_ttl: env_or("CACHE_DEFAULT_TTL", defaults.default_ttl),
            eviction_percent: env_or("CACHE_EVICTION_PERCENT", defaults.eviction_percent)
                .clamp(1, 100),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval).max(1),
            sweep_max_age: env_or("SWEEP_MAX_AGE", defaults.sweep_max_age),
            fetch_timeout: env_or("FETCH_TIMEOUT", defaults.fetch_timeout),
            overscan: env_or("LIST_OVERSCAN", defaults.overscan),
        }
    }

    /// Default TTL as a [`Duration`].
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Sweep interval as a [`Duration`].
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    /// Sweep max age as a [`Duration`].
    pub fn sweep_max_age(&self) -> Duration {
        Duration::from_secs(self.sweep_max_age)
    }

    /// Fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 100,
            default_ttl: DEFAULT_TTL_SECS,
            eviction_percent: DEFAULT_EVICTION_PERCENT,
            sweep_interval: 60,
            sweep_max_age: 60 * 60,
            fetch_timeout: 10,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
