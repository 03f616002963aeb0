//! src/chart/entity.rs
//!
//! Windowed plot buffer manager.
//!
//! The X plot buffer is shared by every series and laid out in reverse: the
//! newest plotted point sits in the last slot and older points extend toward
//! the front. The active region is `[capacity - plot_count, capacity)`.
//! X slots hold plot coordinates `logical index - samples_in_chart`. When the
//! history grows by exactly the samples a wider window adds (live following),
//! the slots already written keep their values and only the newly exposed
//! slots at the front of the region are written. Any other change rebuilds.

use tracing::{debug, trace};

use super::config::{ChartConfig, FitType};
use super::info::DataEntityInfo;
use super::sparse::{Sparsification, compute_sparse_ratio};
use super::window::{PlotWindow, SeriesWindow, WindowState};
use crate::error::{PlotError, Result};
use crate::storage::{FillRequest, PlotStorage, SampleBatch, SeriesStorage, XValue};

/// Which series a refill touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeriesSelector {
    #[default]
    All,
    Index(usize),
}

/// Path taken by the last X buffer update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum XUpdate {
    /// Nothing has been filled since construction or the last clear.
    #[default]
    Pending,
    /// Cached window already matched the request.
    Unchanged,
    /// Only the given number of newly exposed slots were written.
    Appended(usize),
    /// Whole active region recomputed.
    Rebuilt,
}

#[derive(Debug)]
pub struct DataEntity<S: PlotStorage = SeriesStorage> {
    storage: S,
    max_points: usize,
    fit_type: FitType,

    x_plot_buffer: Vec<i64>,
    x_window: PlotWindow,
    /// Samples in chart when the X buffer was last written.
    x_samples: usize,
    series_windows: Vec<SeriesWindow>,

    plot_count: usize,
    last_x_update: XUpdate,
}

impl DataEntity<SeriesStorage> {
    /// Entity backed by the bundled [`SeriesStorage`].
    pub fn with_series_storage(info: DataEntityInfo, config: ChartConfig) -> Result<Self> {
        let storage = SeriesStorage::new(info, &config)?;
        Self::new(storage, &config)
    }
}

impl<S: PlotStorage> DataEntity<S> {
    pub fn new(storage: S, config: &ChartConfig) -> Result<Self> {
        config.validate()?;
        let line_count = storage.info().line_count;
        Ok(Self {
            storage,
            max_points: config.max_points_in_single_series,
            fit_type: config.fit_type,
            x_plot_buffer: vec![0; config.max_points_in_single_series],
            x_window: PlotWindow::default(),
            x_samples: 0,
            series_windows: vec![SeriesWindow::default(); line_count],
            plot_count: 0,
            last_x_update: XUpdate::Pending,
        })
    }

    /// Size the retained history to `sample_count` samples per line. Drops
    /// all data and cached windows.
    pub fn initialize(&mut self, sample_count: usize) {
        self.storage.initialize(sample_count);
        self.reset_windows();
    }

    pub fn add_plot_data(&mut self, batch: SampleBatch<'_>) -> Result<()> {
        self.storage.add_plot_data(batch)
    }

    /// Refresh the plot buffers for the inclusive logical range
    /// `[begin, end]`.
    ///
    /// X is updated once for all series; Y is refreshed for every selected
    /// series. Returns whether any selected series had its plotted values
    /// rewritten. Nothing is modified when an error is returned.
    pub fn fill_plot_data_in_range(
        &mut self,
        begin: usize,
        end: usize,
        force_refresh: bool,
        selector: SeriesSelector,
    ) -> Result<bool> {
        let sparse = compute_sparse_ratio(begin, end, self.max_points)?;
        let available = self.storage.samples_in_chart();
        if end >= available {
            return Err(PlotError::RangeExceedsData { end, available });
        }
        let line_count = self.line_count();
        let series = match selector {
            SeriesSelector::All => 0..line_count,
            SeriesSelector::Index(i) if i < line_count => i..i + 1,
            SeriesSelector::Index(index) => {
                return Err(PlotError::SeriesOutOfRange { index, line_count });
            }
        };

        self.fill_x_plot_data(begin, end, sparse);

        let request = FillRequest {
            begin,
            end,
            force_refresh,
            ratio: sparse.ratio,
            plot_count: sparse.plot_count,
        };
        let mut changed = false;
        for i in series {
            changed |= self
                .storage
                .fill_y_plot_data(&request, i, &mut self.series_windows[i]);
        }

        self.plot_count = sparse.plot_count;
        Ok(changed)
    }

    fn fill_x_plot_data(&mut self, begin: usize, end: usize, sparse: Sparsification) {
        let Sparsification { ratio, plot_count } = sparse;
        let samples = self.storage.samples_in_chart();

        // slot values are offsets from the newest sample, so any growth of the
        // history moves them
        if self.x_samples == samples && self.x_window.matches(begin, end, ratio) {
            trace!(begin, end, ratio, "x plot buffer matches request");
            self.last_x_update = XUpdate::Unchanged;
            return;
        }

        let capacity = self.x_plot_buffer.len();
        let first = capacity - plot_count;
        let origin = begin as i64 - samples as i64;
        let step = ratio as i64;

        // Written slots stay valid only if the history grew by exactly the
        // samples the new slots stand for.
        let appended = match self.x_window.state() {
            Some(last) if self.x_window.shares_origin(begin, ratio) && end > last.end => {
                let added = plot_count - last.plot_count();
                (samples.checked_sub(self.x_samples) == Some(added * ratio)).then_some(added)
            }
            _ => None,
        };
        let written = appended.unwrap_or(plot_count);
        for (k, slot) in self.x_plot_buffer[first..first + written].iter_mut().enumerate() {
            *slot = origin + k as i64 * step;
        }

        self.last_x_update = match appended {
            Some(n) => {
                debug!(begin, end, ratio, added = n, "appended to x plot buffer");
                XUpdate::Appended(n)
            }
            None => {
                debug!(begin, end, ratio, plot_count, "rebuilt x plot buffer");
                XUpdate::Rebuilt
            }
        };
        self.x_window.record(begin, end, ratio);
        self.x_samples = samples;
    }

    /// Drop all retained samples and reset every cached window, so the next
    /// fill rebuilds from scratch.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.reset_windows();
    }

    fn reset_windows(&mut self) {
        self.x_window.reset();
        self.x_samples = 0;
        let line_count = self.line_count();
        if self.series_windows.len() != line_count {
            self.series_windows.resize(line_count, SeriesWindow::default());
        }
        for w in &mut self.series_windows {
            w.reset();
        }
        self.plot_count = 0;
        self.last_x_update = XUpdate::Pending;
    }

    pub fn info(&self) -> &DataEntityInfo {
        self.storage.info()
    }

    pub fn line_count(&self) -> usize {
        self.storage.info().line_count
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Points in the active region after the last successful fill.
    pub fn plot_count(&self) -> usize {
        self.plot_count
    }

    pub fn samples_in_chart(&self) -> usize {
        self.storage.samples_in_chart()
    }

    pub fn fit_type(&self) -> FitType {
        self.fit_type
    }

    pub fn set_fit_type(&mut self, fit_type: FitType) {
        self.fit_type = fit_type;
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn x_window(&self) -> Option<WindowState> {
        self.x_window.state()
    }

    pub fn series_window(&self, series: usize) -> Option<WindowState> {
        self.series_windows.get(series)?.window.state()
    }

    pub fn last_x_update(&self) -> XUpdate {
        self.last_x_update
    }

    /// The whole X buffer, including slots outside the active region.
    pub fn x_plot_buffer(&self) -> &[i64] {
        &self.x_plot_buffer
    }

    /// Active X region; empty before the first fill.
    pub fn plot_x(&self) -> &[i64] {
        &self.x_plot_buffer[self.x_plot_buffer.len() - self.plot_count..]
    }

    /// Active Y region of one series, aligned slot-for-slot with
    /// [`plot_x`](Self::plot_x).
    pub fn plot_y(&self, series: usize) -> Result<&[f64]> {
        let line_count = self.line_count();
        let buf = self
            .storage
            .y_plot_buffer(series)
            .ok_or(PlotError::SeriesOutOfRange { index: series, line_count })?;
        Ok(&buf[buf.len().saturating_sub(self.plot_count)..])
    }

    pub fn x_value(&self, index: usize) -> Option<XValue> {
        self.storage.x_value(index)
    }

    pub fn y_value(&self, index: usize, series: usize) -> Option<f64> {
        self.storage.y_value(index, series)
    }

    /// `(max, min)` over every retained sample of every line.
    pub fn max_and_min_y(&self) -> Option<(f64, f64)> {
        self.storage.max_and_min_y()
    }

    pub fn series_max_and_min_y(&self, series: usize) -> Option<(f64, f64)> {
        self.storage.series_max_and_min_y(series)
    }

    pub fn plot_datas(&self, start: usize, end: usize) -> Vec<Vec<f64>> {
        self.storage.plot_datas(start, end)
    }

    pub fn x_data(&self) -> Vec<XValue> {
        self.storage.x_data()
    }

    pub fn y_data(&self) -> Vec<Vec<f64>> {
        self.storage.y_data()
    }
}
