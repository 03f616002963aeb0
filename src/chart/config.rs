//! src/chart/config.rs
//!
//! Configuration values for plot buffer sizing and ingestion checks.
//!
//! One `ChartConfig` is shared by every series of a chart: the X buffer is
//! common to all of them, so the display budget must be too.

use crate::error::{PlotError, Result};
use crate::validate::DataCheckParams;

/// Default display budget: most points a single series hands to the renderer.
pub const MAX_POINTS_IN_SINGLE_SERIES: usize = 4000;

/// Default number of samples retained per line.
pub const DEFAULT_DISPLAY_POINTS: usize = 100_000;

/// How the owning chart fits its axes. Carried through for renderers, not
/// interpreted by the buffer manager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitType {
    /// Axis follows the plotted range.
    #[default]
    Range,
    /// Axis keeps the full display width even while history is filling.
    Fixed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Display budget per series; also the capacity of every plot buffer.
    pub max_points_in_single_series: usize,

    /// Number of raw samples retained per line (oldest evicted first).
    pub display_points: usize,

    pub fit_type: FitType,

    /// Checks applied to incoming batches before they are stored.
    pub data_check: DataCheckParams,
}

impl ChartConfig {
    /// Create a new `ChartConfig` with default data checks.
    pub fn new(max_points_in_single_series: usize, display_points: usize, fit_type: FitType) -> Self {
        Self {
            max_points_in_single_series,
            display_points,
            fit_type,
            data_check: DataCheckParams::default(),
        }
    }

    /// Reject configurations the buffer manager cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_points_in_single_series == 0 {
            return Err(PlotError::InvalidConfig(
                "max_points_in_single_series must be at least 1".into(),
            ));
        }
        if self.display_points == 0 {
            return Err(PlotError::InvalidConfig(
                "display_points must be at least 1".into(),
            ));
        }
        if self.data_check.workers == 0 {
            return Err(PlotError::InvalidConfig(
                "data_check.workers must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_points_in_single_series: MAX_POINTS_IN_SINGLE_SERIES,
            display_points: DEFAULT_DISPLAY_POINTS,
            fit_type: FitType::default(),
            data_check: DataCheckParams::default(),
        }
    }
}
