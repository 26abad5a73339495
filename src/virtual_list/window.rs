//! Fixed-row list geometry.

use crate::virtual_list::{compute_visible_range, VirtualRange, DEFAULT_OVERSCAN};

// == List Window ==
/// Row geometry of a fixed-extent list: the settings a list collaborator
/// passes to [`compute_visible_range`] on every scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListWindow {
    item_extent: f64,
    overscan: usize,
}

impl ListWindow {
    /// Creates a window for rows of `item_extent` pixels.
    ///
    /// Returns `None` if the extent is not a positive finite number.
    pub fn new(item_extent: f64, overscan: usize) -> Option<Self> {
        (item_extent.is_finite() && item_extent > 0.0).then_some(Self {
            item_extent,
            overscan,
        })
    }

    /// Same as [`ListWindow::new`] with the default overscan.
    pub fn with_default_overscan(item_extent: f64) -> Option<Self> {
        Self::new(item_extent, DEFAULT_OVERSCAN)
    }

    /// Extent of one row in pixels.
    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Rows rendered beyond each edge of the viewport.
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    // == Range ==
    /// Range to render for the given scroll position.
    pub fn range(
        &self,
        scroll_offset: f64,
        container_extent: f64,
        item_count: usize,
    ) -> VirtualRange {
        compute_visible_range(
            scroll_offset,
            self.item_extent,
            container_extent,
            item_count,
            self.overscan,
        )
    }

    // == Geometry ==
    /// Leading edge of row `index`.
    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.item_extent
    }

    /// Total scrollable extent of `item_count` rows.
    pub fn content_extent(&self, item_count: usize) -> f64 {
        self.offset_of(item_count)
    }

    /// Largest scroll offset that still shows content.
    pub fn max_scroll_offset(&self, container_extent: f64, item_count: usize) -> f64 {
        (self.content_extent(item_count) - container_extent).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_extent() {
        assert!(ListWindow::new(0.0, 2).is_none());
        assert!(ListWindow::new(-1.0, 2).is_none());
        assert!(ListWindow::new(f64::INFINITY, 2).is_none());
        assert!(ListWindow::new(f64::NAN, 2).is_none());
    }

    #[test]
    fn test_range_matches_free_function() {
        let window = ListWindow::new(100.0, 2).unwrap();
        assert_eq!(
            window.range(500.0, 300.0, 100),
            compute_visible_range(500.0, 100.0, 300.0, 100, 2)
        );
    }

    #[test]
    fn test_geometry() {
        let window = ListWindow::with_default_overscan(88.0).unwrap();

        assert_eq!(window.overscan(), DEFAULT_OVERSCAN);
        assert_eq!(window.offset_of(0), 0.0);
        assert_eq!(window.offset_of(10), 880.0);
        assert_eq!(window.content_extent(25), 2_200.0);
        assert_eq!(window.max_scroll_offset(600.0, 25), 1_600.0);
        assert_eq!(window.max_scroll_offset(600.0, 2), 0.0);
    }

    #[test]
    fn test_scrolled_to_bottom_renders_last_rows() {
        let window = ListWindow::new(100.0, 1).unwrap();
        let bottom = window.max_scroll_offset(300.0, 20);

        let range = window.range(bottom, 300.0, 20);
        assert_eq!(range, VirtualRange { start: 16, end: 20 });
    }
}
