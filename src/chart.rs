//! src/chart.rs
//!
//! Top-level `chart` module: configuration, sparsification, cached windows and
//! the plot buffer manager.

pub mod config;
pub mod entity;
pub mod info;
pub mod sparse;
pub mod window;

/// Re-exports
pub use config::{ChartConfig, FitType, MAX_POINTS_IN_SINGLE_SERIES};
pub use entity::{DataEntity, SeriesSelector, XUpdate};
pub use info::{DataEntityInfo, XKind};
pub use sparse::{Sparsification, compute_sparse_ratio};
pub use window::{PlotWindow, SeriesWindow, WindowState};
