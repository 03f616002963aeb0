//! src/storage.rs
//!
//! Raw sample storage behind the plot buffer manager.
//!
//! The manager only talks to [`PlotStorage`]. [`SeriesStorage`] is the
//! production implementation; it covers numeric, timestamped and labeled X
//! axes through a closed set of X column variants.

pub mod history;
pub mod plot;
pub mod series;

use std::fmt;

use chrono::{DateTime, Local};

use crate::chart::{DataEntityInfo, SeriesWindow};
use crate::error::Result;

/// Re-exports
pub use history::LineHistory;
pub use plot::YPlotBuffers;
pub use series::SeriesStorage;

/// One incoming batch. `data` is line-major: line `i` occupies
/// `data[i * n..(i + 1) * n]` where `n` is the number of samples per line.
#[derive(Clone, Copy, Debug)]
pub enum SampleBatch<'a> {
    /// One label per sample.
    Labeled { labels: &'a [String], data: &'a [f64] },
    /// One timestamp per sample.
    Timestamped {
        timestamps: &'a [DateTime<Local>],
        data: &'a [f64],
    },
    /// Bare values; X is the running sample number.
    Raw { data: &'a [f64], sample_count: usize },
}

impl SampleBatch<'_> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SampleBatch::Labeled { .. } => "labeled",
            SampleBatch::Timestamped { .. } => "timestamped",
            SampleBatch::Raw { .. } => "raw",
        }
    }
}

/// X value of one retained sample, for tooltips, cursors and export.
#[derive(Clone, Debug, PartialEq)]
pub enum XValue {
    Index(u64),
    Time(DateTime<Local>),
    Label(String),
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XValue::Index(n) => write!(f, "{n}"),
            XValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.3f")),
            XValue::Label(s) => f.write_str(s),
        }
    }
}

/// Parameters of one Y refill, computed once by the manager and shared by
/// every selected series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillRequest {
    pub begin: usize,
    pub end: usize,
    pub force_refresh: bool,
    pub ratio: usize,
    pub plot_count: usize,
}

/// Capabilities the plot buffer manager needs from a storage backend.
///
/// Indices are logical: `0` is the oldest retained sample and
/// `samples_in_chart() - 1` the newest.
pub trait PlotStorage {
    fn info(&self) -> &DataEntityInfo;

    /// Number of retained samples per line.
    fn samples_in_chart(&self) -> usize;

    /// Bumped whenever retained data changes.
    fn revision(&self) -> u64;

    /// Resize the retained history to `sample_count` samples per line and
    /// drop everything stored so far.
    fn initialize(&mut self, sample_count: usize);

    fn add_plot_data(&mut self, batch: SampleBatch<'_>) -> Result<()>;

    /// Refresh the Y plot buffer of `series` for `request`. `window` is the
    /// manager's record for that series and is updated on write. Returns
    /// whether the plotted values were rewritten.
    fn fill_y_plot_data(
        &mut self,
        request: &FillRequest,
        series: usize,
        window: &mut SeriesWindow,
    ) -> bool;

    /// Whole Y plot buffer of a series; the active region is its tail.
    fn y_plot_buffer(&self, series: usize) -> Option<&[f64]>;

    fn x_value(&self, index: usize) -> Option<XValue>;

    fn y_value(&self, index: usize, series: usize) -> Option<f64>;

    /// `(max, min)` over every retained finite sample of every line.
    fn max_and_min_y(&self) -> Option<(f64, f64)>;

    /// `(max, min)` over the retained finite samples of one line.
    fn series_max_and_min_y(&self, series: usize) -> Option<(f64, f64)>;

    /// Raw retained values per line in `[start, end]`, clamped to what is
    /// retained.
    fn plot_datas(&self, start: usize, end: usize) -> Vec<Vec<f64>>;

    fn x_data(&self) -> Vec<XValue>;

    fn y_data(&self) -> Vec<Vec<f64>>;

    fn clear(&mut self);
}
