//! src/graph/shared.rs
//!
//! Shared per-graph state: the plot buffer entity, view-state
//! (autoscale/hysteresis, zoom span), locking, and metadata.

use std::sync::{Arc, RwLock};

use ratatui::style::Color;
use stripchart::{DataEntity, DataEntityInfo, FitType, SeriesSelector, XKind};

use super::config::GraphConfig;

/// Smallest zoom span, in samples.
const MIN_SPAN: usize = 16;

/// Stabilization state for view hysteresis.
#[derive(Clone, Copy, Debug)]
pub enum StabilizationState {
    Stable,
    Expanding,
    Shrinking,
}

/// View-related state mutated by the UI to implement autoscale/hysteresis.
#[derive(Debug)]
pub struct GraphViewState {
    /// Currently shown y-bounds (min, max). `None` means uninitialized.
    pub current_bounds: Option<(f64, f64)>,

    /// Consecutive frames considered 'comfortable' (used to confirm shrinking).
    pub stable_count: usize,

    pub state: StabilizationState,
}

impl GraphViewState {
    pub fn new() -> Self {
        Self {
            current_bounds: None,
            stable_count: 0,
            state: StabilizationState::Stable,
        }
    }
}

/// The authoritative shared graph object used across threads.
pub struct GraphShared {
    pub entity: DataEntity,
    pub view: GraphViewState,
    pub name: String,
    pub colors: Vec<Color>,
    pub y_range: (f64, f64),
    pub autoscale: bool,
    pub smoothing: f64,
    pub locked_bounds: Option<(f64, f64)>,
    pub shrink_confirm_frames: usize,
    pub shrink_margin_frac: f64,
    /// Visible samples; `0` follows the whole retained history.
    pub span: usize,
    /// Result of the last refill: did the plotted data change.
    pub changed: bool,
}

impl GraphShared {
    pub fn new(
        cfg: GraphConfig,
        colors: &[Color],
        autoscale: bool,
        smoothing: f64,
    ) -> stripchart::Result<Self> {
        let info = DataEntityInfo::with_names(XKind::Timestamp, cfg.series_names.iter().cloned());
        let colors = (0..info.line_count)
            .map(|i| colors.get(i % colors.len().max(1)).copied().unwrap_or(Color::White))
            .collect();
        Ok(Self {
            entity: DataEntity::with_series_storage(info, cfg.chart)?,
            view: GraphViewState::new(),
            name: cfg.name,
            colors,
            y_range: cfg.y_range,
            autoscale,
            smoothing: smoothing.clamp(0.0, 1.0),
            locked_bounds: None,
            shrink_confirm_frames: 8,
            shrink_margin_frac: 0.20,
            span: cfg.initial_span,
            changed: false,
        })
    }

    /// Inclusive logical window the chart should show: the newest `span`
    /// samples.
    pub fn visible_window(&self) -> Option<(usize, usize)> {
        let samples = self.entity.samples_in_chart();
        if samples == 0 {
            return None;
        }
        let span = if self.span == 0 {
            samples
        } else {
            self.span.min(samples)
        };
        Some((samples - span, samples - 1))
    }

    /// Bring the plot buffers up to date with the visible window.
    pub fn refresh(&mut self) -> stripchart::Result<bool> {
        let Some((begin, end)) = self.visible_window() else {
            return Ok(false);
        };
        self.changed = self
            .entity
            .fill_plot_data_in_range(begin, end, false, SeriesSelector::All)?;
        Ok(self.changed)
    }

    /// Plotted points of one line as `(x, y)` pairs for chart widgets.
    pub fn series_points(&self, series: usize) -> Vec<(f64, f64)> {
        let Ok(ys) = self.entity.plot_y(series) else {
            return Vec::new();
        };
        self.entity
            .plot_x()
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (x as f64, y))
            .collect()
    }

    /// Halve the visible span.
    pub fn zoom_in(&mut self) {
        let current = if self.span == 0 {
            self.entity.samples_in_chart()
        } else {
            self.span
        };
        self.span = (current / 2).max(MIN_SPAN);
    }

    /// Double the visible span; past the retained history it follows
    /// everything.
    pub fn zoom_out(&mut self) {
        if self.span == 0 {
            return;
        }
        let doubled = self.span.saturating_mul(2);
        self.span = if doubled >= self.entity.samples_in_chart() {
            0
        } else {
            doubled
        };
    }

    pub fn toggle_fit(&mut self) {
        let next = match self.entity.fit_type() {
            FitType::Range => FitType::Fixed,
            FitType::Fixed => FitType::Range,
        };
        self.entity.set_fit_type(next);
    }

    pub fn clear(&mut self) {
        self.entity.clear();
        self.view = GraphViewState::new();
        self.changed = true;
    }
}

/// Alias: Arc<RwLock<GraphShared>>
pub type SharedGraph = Arc<RwLock<GraphShared>>;

/// Alias for a write guard.
pub type GraphGuard<'a> = std::sync::RwLockWriteGuard<'a, GraphShared>;
