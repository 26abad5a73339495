//! Viewport Cache - image cache and list virtualization core
//!
//! Provides a bounded key-value cache with TTL expiry and frequency-aware
//! eviction, windowed rendering math for long lists, and a cache-first image
//! loader built on both.

pub mod cache;
pub mod config;
pub mod error;
pub mod images;
pub mod tasks;
pub mod virtual_list;

pub use cache::{BoundedCache, CacheStats, SharedCache};
pub use config::Config;
pub use error::FetchError;
pub use images::{ImageFetcher, ImageLoader};
pub use tasks::spawn_sweep_task;
pub use virtual_list::{compute_visible_range, ListWindow, VirtualRange};
