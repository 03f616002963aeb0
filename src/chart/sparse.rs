//! src/chart/sparse.rs
//!
//! Sparsification policy: choose a power-of-two stride so a window of raw
//! samples never yields more than the display budget.

use crate::error::{PlotError, Result};

/// Stride and resulting point count for one window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sparsification {
    /// Number of logical indices collapsed into one plotted point (>= 1).
    pub ratio: usize,
    /// `ceil(count / ratio)`, never above the display budget.
    pub plot_count: usize,
}

/// Compute the stride for the inclusive index range `[start, end]`.
///
/// The ratio doubles while `count > max_points * ratio`, which is evaluated as
/// `ceil(count / ratio) > max_points` so large windows cannot overflow.
pub fn compute_sparse_ratio(start: usize, end: usize, max_points: usize) -> Result<Sparsification> {
    if end < start {
        return Err(PlotError::InvalidRange { begin: start, end });
    }
    let max_points = max_points.max(1);
    let count = (end - start).saturating_add(1);

    let mut ratio = 1usize;
    while count.div_ceil(ratio) > max_points {
        ratio *= 2;
    }

    Ok(Sparsification {
        ratio,
        plot_count: count.div_ceil(ratio),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_within_budget_keeps_every_sample() {
        let s = compute_sparse_ratio(0, 999, 1000).unwrap();
        assert_eq!(s, Sparsification { ratio: 1, plot_count: 1000 });
    }

    #[test]
    fn window_just_over_budget_doubles_once() {
        let s = compute_sparse_ratio(0, 1499, 1000).unwrap();
        assert_eq!(s, Sparsification { ratio: 2, plot_count: 750 });

        let s = compute_sparse_ratio(0, 1999, 1000).unwrap();
        assert_eq!(s, Sparsification { ratio: 2, plot_count: 1000 });
    }

    #[test]
    fn odd_count_rounds_plot_count_up() {
        let s = compute_sparse_ratio(10, 2010, 1000).unwrap();
        assert_eq!(s.ratio, 4);
        assert_eq!(s.plot_count, 501);
    }

    #[test]
    fn ratio_is_smallest_power_of_two_meeting_budget() {
        let m = 1000;
        for count in [1usize, 2, 999, 1000, 1001, 4096, 12_345, 1_000_000, 7_654_321] {
            let s = compute_sparse_ratio(5, 5 + count - 1, m).unwrap();
            assert!(s.ratio.is_power_of_two(), "count {count}");
            assert!(count <= m * s.ratio, "count {count}");
            if s.ratio > 1 {
                assert!(count > m * (s.ratio / 2), "count {count} not minimal");
            }
            assert_eq!(s.plot_count, count.div_ceil(s.ratio));
            assert!(s.plot_count <= m);
        }
    }

    #[test]
    fn single_sample_window() {
        let s = compute_sparse_ratio(42, 42, 1000).unwrap();
        assert_eq!(s, Sparsification { ratio: 1, plot_count: 1 });
    }

    #[test]
    fn reversed_range_fails_fast() {
        assert_eq!(
            compute_sparse_ratio(10, 9, 1000),
            Err(PlotError::InvalidRange { begin: 10, end: 9 })
        );
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let s = compute_sparse_ratio(0, usize::MAX - 1, 1000).unwrap();
        assert!(s.plot_count <= 1000);
        assert!(s.ratio.is_power_of_two());
    }
}
