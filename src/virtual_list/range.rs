//! Visible range computation.

use std::ops::Range;

use serde::Serialize;

// == Virtual Range ==
/// Half-open slice `[start, end)` of a dataset to keep materialized.
///
/// Always satisfies `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct VirtualRange {
    pub start: usize,
    pub end: usize,
}

impl VirtualRange {
    /// The empty range at index zero.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Number of indices in the range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns true if `index` falls inside `[start, end)`.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// Iterates the indices in the range.
    pub fn iter(&self) -> Range<usize> {
        self.start..self.end
    }

    // == Range Diffs ==
    /// Indices in `self` that were not in `previous`: rows that just scrolled
    /// into the rendered window.
    pub fn entering(&self, previous: &VirtualRange) -> impl Iterator<Item = usize> + '_ {
        let previous = *previous;
        self.iter().filter(move |index| !previous.contains(*index))
    }

    /// Indices in `previous` that are no longer in `self`.
    pub fn leaving(&self, previous: &VirtualRange) -> impl Iterator<Item = usize> + '_ {
        previous.iter().filter(move |index| !self.contains(*index))
    }
}

impl From<VirtualRange> for Range<usize> {
    fn from(range: VirtualRange) -> Self {
        range.start..range.end
    }
}

// == Compute Visible Range ==
/// Computes the slice of a fixed-extent list to materialize.
///
/// `first = floor(offset / item_extent)`, `visible = ceil(container / item_extent)`,
/// then `overscan` rows are added on both sides and the result is clamped to
/// `[0, item_count]`.
///
/// Inputs are normalized instead of rejected: a negative or NaN scroll offset
/// (overscroll bounce) counts as `0`, a negative container as empty, and a
/// non-positive or non-finite `item_extent` yields [`VirtualRange::EMPTY`].
/// Scrolling past the end of the content yields an empty range at
/// `item_count`.
pub fn compute_visible_range(
    scroll_offset: f64,
    item_extent: f64,
    container_extent: f64,
    item_count: usize,
    overscan: usize,
) -> VirtualRange {
    if item_count == 0 || !item_extent.is_finite() || item_extent <= 0.0 {
        return VirtualRange::EMPTY;
    }

    let offset = non_negative(scroll_offset);
    let container = non_negative(container_extent);

    // Float-to-int `as` saturates, so huge offsets land at usize::MAX.
    let first_visible = (offset / item_extent).floor() as usize;
    let visible_count = (container / item_extent).ceil() as usize;

    let end = first_visible
        .saturating_add(visible_count)
        .saturating_add(overscan)
        .min(item_count);
    let start = first_visible.saturating_sub(overscan).min(end);

    VirtualRange { start, end }
}

/// Maps negative and NaN to zero.
fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overscan_example() {
        // first visible 5, three rows on screen, two rows of overscan each side
        let range = compute_visible_range(500.0, 100.0, 300.0, 100, 2);
        assert_eq!(range, VirtualRange { start: 3, end: 10 });
        assert_eq!(range.len(), 7);
    }

    #[test]
    fn test_top_of_list() {
        let range = compute_visible_range(0.0, 100.0, 300.0, 100, 2);
        assert_eq!(range, VirtualRange { start: 0, end: 5 });
    }

    #[test]
    fn test_partial_rows_round_outward() {
        // Offset 150 shows the bottom half of row 1; 250px viewport reaches into row 4
        let range = compute_visible_range(150.0, 100.0, 250.0, 100, 0);
        assert_eq!(range, VirtualRange { start: 1, end: 4 });
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(compute_visible_range(0.0, 100.0, 300.0, 0, 2), VirtualRange::EMPTY);
        assert_eq!(compute_visible_range(900.0, 50.0, 0.0, 0, 0), VirtualRange::EMPTY);
        assert_eq!(compute_visible_range(-10.0, 1.0, 1e9, 0, 99), VirtualRange::EMPTY);
    }

    #[test]
    fn test_negative_offset_clamps_to_zero() {
        assert_eq!(
            compute_visible_range(-50.0, 100.0, 300.0, 100, 2),
            compute_visible_range(0.0, 100.0, 300.0, 100, 2)
        );
        assert_eq!(
            compute_visible_range(f64::NAN, 100.0, 300.0, 100, 2),
            compute_visible_range(0.0, 100.0, 300.0, 100, 2)
        );
    }

    #[test]
    fn test_end_clamped_to_item_count() {
        let range = compute_visible_range(900.0, 100.0, 300.0, 10, 2);
        assert_eq!(range, VirtualRange { start: 7, end: 10 });
    }

    #[test]
    fn test_scrolled_past_content() {
        let range = compute_visible_range(5_000.0, 100.0, 300.0, 10, 2);
        assert_eq!(range, VirtualRange { start: 10, end: 10 });
        assert!(range.is_empty());

        let range = compute_visible_range(f64::INFINITY, 100.0, 300.0, 10, 2);
        assert_eq!(range, VirtualRange { start: 10, end: 10 });
    }

    #[test]
    fn test_zero_sized_container() {
        // Transient zero height during layout still renders the overscan rows
        let range = compute_visible_range(500.0, 100.0, 0.0, 100, 2);
        assert_eq!(range, VirtualRange { start: 3, end: 7 });

        let range = compute_visible_range(500.0, 100.0, -20.0, 100, 0);
        assert!(range.is_empty());
    }

    #[test]
    fn test_invalid_item_extent() {
        assert_eq!(compute_visible_range(0.0, 0.0, 300.0, 10, 1), VirtualRange::EMPTY);
        assert_eq!(compute_visible_range(0.0, -5.0, 300.0, 10, 1), VirtualRange::EMPTY);
        assert_eq!(compute_visible_range(0.0, f64::NAN, 300.0, 10, 1), VirtualRange::EMPTY);
    }

    #[test]
    fn test_huge_overscan_does_not_overflow() {
        let range = compute_visible_range(500.0, 100.0, 300.0, 100, usize::MAX);
        assert_eq!(range, VirtualRange { start: 0, end: 100 });
    }

    #[test]
    fn test_entering_and_leaving() {
        let previous = VirtualRange { start: 0, end: 5 };
        let current = VirtualRange { start: 3, end: 8 };

        assert_eq!(current.entering(&previous).collect::<Vec<_>>(), vec![5, 6, 7]);
        assert_eq!(current.leaving(&previous).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(current.entering(&current).count(), 0);
    }

    #[test]
    fn test_range_conversion() {
        let range = VirtualRange { start: 2, end: 4 };
        let std_range: Range<usize> = range.into();
        assert_eq!(std_range, 2..4);
        assert!(range.contains(3));
        assert!(!range.contains(4));
    }

    #[test]
    fn test_range_serialize() {
        let json = serde_json::to_string(&VirtualRange { start: 3, end: 10 }).unwrap();
        assert_eq!(json, r#"{"start":3,"end":10}"#);
    }
}
