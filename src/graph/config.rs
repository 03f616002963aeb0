//! src/graph/config.rs
//!
//! Per-graph settings for the terminal demo.
//!
//! Buffer sizing lives in the embedded `ChartConfig`; everything else here is
//! view behaviour.

use stripchart::{ChartConfig, FitType, MAX_POINTS_IN_SINGLE_SERIES};

#[derive(Clone, Debug)]
pub struct GraphConfig {
    /// Title shown above the chart.
    pub name: String,

    /// One entry per plotted line.
    pub series_names: Vec<String>,

    /// Plot buffer budget and retained history.
    pub chart: ChartConfig,

    /// Samples visible before any zoom; `0` shows everything retained.
    pub initial_span: usize,

    /// Default y-range to use when autoscale is disabled or as a fallback.
    pub y_range: (f64, f64),
}

impl GraphConfig {
    /// Create a new `GraphConfig`.
    pub fn new(
        name: &str,
        series_names: &[&str],
        display_points: usize,
        y_range: (f64, f64),
    ) -> Self {
        Self {
            name: name.to_string(),
            series_names: series_names.iter().map(|s| s.to_string()).collect(),
            chart: ChartConfig::new(MAX_POINTS_IN_SINGLE_SERIES, display_points, FitType::Range),
            initial_span: 0,
            y_range,
        }
    }

    pub fn with_span(mut self, span: usize) -> Self {
        self.initial_span = span;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new("Signal", &["line 0"], 20_000, (-1.0, 1.0))
    }
}
