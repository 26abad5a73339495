//! Background Tasks Module
//!
//! Maintenance tasks owned by the application, not by the cache.
//!
//! # Tasks
//! - Cache sweep: drops TTL-expired and over-age entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
