//! src/storage/plot.rs
//!
//! Y plot buffers. Same reversed layout as the X buffer: the active region is
//! the last `plot_count` slots and the newest plotted point sits in the last
//! slot.

use tracing::trace;

use super::FillRequest;
use super::history::LineHistory;
use crate::chart::SeriesWindow;

#[derive(Debug, Clone)]
pub struct YPlotBuffers {
    buffers: Vec<Vec<f64>>,
}

impl YPlotBuffers {
    pub fn new(line_count: usize, capacity: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; capacity]; line_count],
        }
    }

    pub fn buffer(&self, series: usize) -> Option<&[f64]> {
        self.buffers.get(series).map(Vec::as_slice)
    }

    /// Rewrite the active region of `series` from `history` unless the
    /// recorded window is already current and no refresh is forced.
    ///
    /// Plotted point `k` takes the sample at logical index
    /// `begin + k * ratio`, matching the X coordinate written for slot `k`.
    pub fn fill(
        &mut self,
        history: &LineHistory,
        request: &FillRequest,
        series: usize,
        window: &mut SeriesWindow,
    ) -> bool {
        let revision = history.revision();
        if !request.force_refresh
            && window.is_current(request.begin, request.end, request.ratio, revision)
        {
            trace!(series, "y plot buffer current");
            return false;
        }
        let (Some(buf), Some(line)) = (self.buffers.get_mut(series), history.line(series)) else {
            return false;
        };

        let first = buf.len().saturating_sub(request.plot_count);
        for (k, slot) in buf[first..].iter_mut().enumerate() {
            *slot = line
                .get(request.begin + k * request.ratio)
                .copied()
                .unwrap_or(f64::NAN);
        }
        window.record(request.begin, request.end, request.ratio, revision);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(begin: usize, end: usize, ratio: usize, force_refresh: bool) -> FillRequest {
        FillRequest {
            begin,
            end,
            force_refresh,
            ratio,
            plot_count: (end - begin + 1).div_ceil(ratio),
        }
    }

    fn history(values: &[f64]) -> LineHistory {
        let mut h = LineHistory::new(1, 1000);
        h.push_batch(values, values.len());
        h
    }

    #[test]
    fn fill_writes_tail_at_stride() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let h = history(&values);
        let mut y = YPlotBuffers::new(1, 8);
        let mut w = SeriesWindow::default();

        assert!(y.fill(&h, &request(1, 9, 2, false), 0, &mut w));
        let buf = y.buffer(0).unwrap();
        assert_eq!(&buf[3..], &[1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn current_window_is_skipped_unless_forced() {
        let values: Vec<f64> = (0..4).map(f64::from).collect();
        let h = history(&values);
        let mut y = YPlotBuffers::new(1, 4);
        let mut w = SeriesWindow::default();

        assert!(y.fill(&h, &request(0, 3, 1, false), 0, &mut w));
        assert!(!y.fill(&h, &request(0, 3, 1, false), 0, &mut w));
        assert!(y.fill(&h, &request(0, 3, 1, true), 0, &mut w));
    }

    #[test]
    fn new_data_invalidates_window() {
        let mut h = LineHistory::new(1, 4);
        h.push_batch(&[1.0, 2.0, 3.0, 4.0], 4);
        let mut y = YPlotBuffers::new(1, 4);
        let mut w = SeriesWindow::default();
        assert!(y.fill(&h, &request(0, 3, 1, false), 0, &mut w));

        h.push_batch(&[5.0], 1);
        assert!(y.fill(&h, &request(0, 3, 1, false), 0, &mut w));
        assert_eq!(y.buffer(0).unwrap(), &[2.0, 3.0, 4.0, 5.0]);
    }
}
