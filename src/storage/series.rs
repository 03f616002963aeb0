//! src/storage/series.rs
//!
//! `SeriesStorage`: retained samples for every line plus the X column that
//! identifies them.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use super::history::{LineHistory, extend_capped};
use super::plot::YPlotBuffers;
use super::{FillRequest, PlotStorage, SampleBatch, XValue};
use crate::chart::{ChartConfig, DataEntityInfo, SeriesWindow, XKind};
use crate::error::{PlotError, Result};
use crate::validate::ParallelHandler;

/// X values of the retained samples, one variant per supported axis kind.
#[derive(Debug, Clone)]
enum XColumn {
    /// Running sample number; nothing stored per sample.
    Index,
    Timestamps(VecDeque<DateTime<Local>>),
    Labels(VecDeque<String>),
}

impl XColumn {
    fn for_kind(kind: XKind) -> Self {
        match kind {
            XKind::Index => XColumn::Index,
            XKind::Timestamp => XColumn::Timestamps(VecDeque::new()),
            XKind::Label => XColumn::Labels(VecDeque::new()),
        }
    }

    fn clear(&mut self) {
        match self {
            XColumn::Index => {}
            XColumn::Timestamps(ts) => ts.clear(),
            XColumn::Labels(ls) => ls.clear(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeriesStorage {
    info: DataEntityInfo,
    history: LineHistory,
    x: XColumn,
    plot: YPlotBuffers,
    handler: ParallelHandler,
}

impl SeriesStorage {
    pub fn new(info: DataEntityInfo, config: &ChartConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: LineHistory::new(info.line_count, config.display_points),
            x: XColumn::for_kind(info.x_kind),
            plot: YPlotBuffers::new(info.line_count, config.max_points_in_single_series),
            handler: ParallelHandler::new(config.data_check),
            info,
        })
    }

    pub fn history(&self) -> &LineHistory {
        &self.history
    }

    fn unsupported(&self, batch: &SampleBatch<'_>) -> PlotError {
        PlotError::UnsupportedInput {
            storage: self.info.x_kind.name(),
            input: batch.kind_name(),
        }
    }

    /// `data` must hold exactly `x_len` samples for every line.
    fn check_shape(&self, data: &[f64], x_len: usize) -> Result<()> {
        let line_count = self.info.line_count;
        if line_count.checked_mul(x_len) == Some(data.len()) {
            return Ok(());
        }
        if line_count > 0 && data.len() % line_count == 0 {
            return Err(PlotError::SampleCountMismatch {
                x_len,
                sample_count: data.len() / line_count,
            });
        }
        Err(PlotError::LineCountMismatch {
            line_count,
            expected: line_count.saturating_mul(x_len),
            actual: data.len(),
        })
    }

    fn ingest(&mut self, data: &[f64], sample_count: usize) -> usize {
        let mut values = data.to_vec();
        let replaced = self.handler.sanitize(&mut values);
        if replaced > 0 {
            warn!(replaced, "replaced invalid samples in incoming batch");
        }
        self.history.push_batch(&values, sample_count)
    }

    fn line_extremes<'a>(lines: impl Iterator<Item = &'a VecDeque<f64>>) -> Option<(f64, f64)> {
        lines
            .flat_map(|l| l.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((mx, mn)) => Some((mx.max(v), mn.min(v))),
            })
    }
}

impl PlotStorage for SeriesStorage {
    fn info(&self) -> &DataEntityInfo {
        &self.info
    }

    fn samples_in_chart(&self) -> usize {
        self.history.len()
    }

    fn revision(&self) -> u64 {
        self.history.revision()
    }

    fn initialize(&mut self, sample_count: usize) {
        self.history.set_capacity(sample_count);
        self.x.clear();
    }

    fn add_plot_data(&mut self, batch: SampleBatch<'_>) -> Result<()> {
        let cap = self.history.capacity();
        let sample_count = match (self.info.x_kind, batch) {
            (XKind::Index, SampleBatch::Raw { data, sample_count }) => {
                let line_count = self.info.line_count;
                if line_count.checked_mul(sample_count) != Some(data.len()) {
                    return Err(PlotError::LineCountMismatch {
                        line_count,
                        expected: line_count.saturating_mul(sample_count),
                        actual: data.len(),
                    });
                }
                self.ingest(data, sample_count);
                sample_count
            }
            (XKind::Timestamp, SampleBatch::Timestamped { timestamps, data }) => {
                self.check_shape(data, timestamps.len())?;
                self.ingest(data, timestamps.len());
                if let XColumn::Timestamps(ts) = &mut self.x {
                    extend_capped(ts, timestamps.iter().copied(), cap);
                }
                timestamps.len()
            }
            (XKind::Label, SampleBatch::Labeled { labels, data }) => {
                self.check_shape(data, labels.len())?;
                self.ingest(data, labels.len());
                if let XColumn::Labels(ls) = &mut self.x {
                    extend_capped(ls, labels.iter().cloned(), cap);
                }
                labels.len()
            }
            _ => return Err(self.unsupported(&batch)),
        };
        debug!(
            sample_count,
            retained = self.history.len(),
            revision = self.history.revision(),
            "ingested batch"
        );
        Ok(())
    }

    fn fill_y_plot_data(
        &mut self,
        request: &FillRequest,
        series: usize,
        window: &mut SeriesWindow,
    ) -> bool {
        self.plot.fill(&self.history, request, series, window)
    }

    fn y_plot_buffer(&self, series: usize) -> Option<&[f64]> {
        self.plot.buffer(series)
    }

    fn x_value(&self, index: usize) -> Option<XValue> {
        if index >= self.history.len() {
            return None;
        }
        match &self.x {
            XColumn::Index => Some(XValue::Index(self.history.evicted() + index as u64)),
            XColumn::Timestamps(ts) => ts.get(index).copied().map(XValue::Time),
            XColumn::Labels(ls) => ls.get(index).cloned().map(XValue::Label),
        }
    }

    fn y_value(&self, index: usize, series: usize) -> Option<f64> {
        self.history.line(series)?.get(index).copied()
    }

    fn max_and_min_y(&self) -> Option<(f64, f64)> {
        Self::line_extremes(self.history.lines().iter())
    }

    fn series_max_and_min_y(&self, series: usize) -> Option<(f64, f64)> {
        Self::line_extremes(self.history.line(series).into_iter())
    }

    fn plot_datas(&self, start: usize, end: usize) -> Vec<Vec<f64>> {
        let len = self.history.len();
        self.history
            .lines()
            .iter()
            .map(|line| {
                if start >= len || end < start {
                    Vec::new()
                } else {
                    line.range(start..=end.min(len - 1)).copied().collect()
                }
            })
            .collect()
    }

    fn x_data(&self) -> Vec<XValue> {
        (0..self.history.len())
            .filter_map(|i| self.x_value(i))
            .collect()
    }

    fn y_data(&self) -> Vec<Vec<f64>> {
        self.history
            .lines()
            .iter()
            .map(|line| line.iter().copied().collect())
            .collect()
    }

    fn clear(&mut self) {
        self.history.clear();
        self.x.clear();
    }
}
