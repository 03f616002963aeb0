//! src/chart/window.rs
//!
//! Cached plot windows: what a plot buffer currently represents.

/// Inclusive index range plus the stride it was filled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowState {
    pub start: usize,
    pub end: usize,
    pub ratio: usize,
}

impl WindowState {
    pub fn new(start: usize, end: usize, ratio: usize) -> Self {
        debug_assert!(end >= start && ratio >= 1);
        Self { start, end, ratio }
    }

    /// Number of plotted points this window occupies.
    pub fn plot_count(&self) -> usize {
        (self.end - self.start + 1).div_ceil(self.ratio)
    }
}

/// Last window served for one buffer. `None` means no history, so the next
/// fill must rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlotWindow {
    state: Option<WindowState>,
}

impl PlotWindow {
    pub fn state(&self) -> Option<WindowState> {
        self.state
    }

    pub fn is_unset(&self) -> bool {
        self.state.is_none()
    }

    /// Exactly this range at this stride.
    pub fn matches(&self, start: usize, end: usize, ratio: usize) -> bool {
        matches!(self.state, Some(w) if w.start == start && w.end == end && w.ratio == ratio)
    }

    /// Same start and stride; the request may extend the recent edge.
    pub fn shares_origin(&self, start: usize, ratio: usize) -> bool {
        matches!(self.state, Some(w) if w.start == start && w.ratio == ratio)
    }

    pub fn record(&mut self, start: usize, end: usize, ratio: usize) {
        self.state = Some(WindowState::new(start, end, ratio));
    }

    pub fn reset(&mut self) {
        self.state = None;
    }
}

/// Per-series record: the window last written into the series' Y buffer and
/// the storage revision it was read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeriesWindow {
    pub window: PlotWindow,
    pub revision: Option<u64>,
}

impl SeriesWindow {
    /// True when the Y buffer already holds exactly this request at this
    /// revision.
    pub fn is_current(&self, start: usize, end: usize, ratio: usize, revision: u64) -> bool {
        self.revision == Some(revision)
            && self.window.state() == Some(WindowState::new(start, end, ratio))
    }

    pub fn record(&mut self, start: usize, end: usize, ratio: usize, revision: u64) {
        self.window.record(start, end, ratio);
        self.revision = Some(revision);
    }

    pub fn reset(&mut self) {
        self.window.reset();
        self.revision = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_window_matches_nothing() {
        let w = PlotWindow::default();
        assert!(w.is_unset());
        assert!(!w.matches(0, 0, 1));
        assert!(!w.shares_origin(0, 1));
    }

    #[test]
    fn matches_requires_identical_window() {
        let mut w = PlotWindow::default();
        w.record(100, 200, 2);
        assert!(w.matches(100, 200, 2));
        assert!(!w.matches(100, 150, 2));
        assert!(!w.matches(100, 201, 2));
        assert!(!w.matches(100, 200, 1));
        assert!(!w.matches(101, 200, 2));
        assert!(w.shares_origin(100, 2));
    }

    #[test]
    fn plot_count_rounds_up() {
        assert_eq!(WindowState::new(100, 200, 1).plot_count(), 101);
        assert_eq!(WindowState::new(100, 200, 2).plot_count(), 51);
        assert_eq!(WindowState::new(0, 0, 8).plot_count(), 1);
    }

    #[test]
    fn series_window_tracks_revision() {
        let mut s = SeriesWindow::default();
        assert!(!s.is_current(0, 9, 1, 0));
        s.record(0, 9, 1, 3);
        assert!(s.is_current(0, 9, 1, 3));
        assert!(!s.is_current(0, 9, 1, 4));
        assert!(!s.is_current(0, 8, 1, 3));
        s.reset();
        assert!(!s.is_current(0, 9, 1, 3));
        assert_eq!(s, SeriesWindow::default());
    }
}
