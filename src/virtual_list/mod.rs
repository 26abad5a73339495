//! Virtual List Module
//!
//! Windowed rendering math for fixed-extent rows: which slice of a dataset to
//! materialize for a given scroll position.
//!
//! The range computation is a pure function. The list that owns the scroll
//! offset calls it from its scroll handler and renders only the returned
//! slice.

mod range;
mod window;


pub use range::{compute_visible_range, VirtualRange};
pub use window::ListWindow;

/// Default number of rows kept beyond each edge of the viewport
pub const DEFAULT_OVERSCAN: usize = 3;
