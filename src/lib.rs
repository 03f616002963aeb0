//! src/lib.rs
//!
//! Incremental plot buffers for real-time strip charts.
//!
//! A [`DataEntity`] keeps a bounded, render-ready view over a growing set of
//! parallel series. Each refill request names a window of logical sample
//! indices; the entity picks a power-of-two stride so that no series ever hands
//! more than `max_points_in_single_series` points to the renderer, then extends
//! or rebuilds its cached X coordinates and asks the storage backend to refresh
//! the Y values.
//!
//! ```
//! use stripchart::{ChartConfig, DataEntity, DataEntityInfo, SampleBatch, SeriesSelector, XKind};
//!
//! let info = DataEntityInfo::new(2, XKind::Index);
//! let mut entity = DataEntity::with_series_storage(info, ChartConfig::default()).unwrap();
//!
//! // two lines, three samples each, line-major
//! let data = [1.0, 2.0, 3.0, 10.0, 20.0, 30.0];
//! entity
//!     .add_plot_data(SampleBatch::Raw { data: &data, sample_count: 3 })
//!     .unwrap();
//!
//! let changed = entity.fill_plot_data_in_range(0, 2, false, SeriesSelector::All).unwrap();
//! assert!(changed);
//! assert_eq!(entity.plot_x(), &[-3, -2, -1]);
//! assert_eq!(entity.plot_y(1).unwrap(), &[10.0, 20.0, 30.0]);
//! ```

pub mod chart;
pub mod error;
pub mod storage;
pub mod validate;

/// Re-exports
pub use chart::{
    ChartConfig, DataEntity, DataEntityInfo, FitType, MAX_POINTS_IN_SINGLE_SERIES,
    SeriesSelector, Sparsification, XKind, XUpdate,
};
pub use error::{PlotError, Result};
pub use storage::{PlotStorage, SampleBatch, SeriesStorage, XValue};
pub use validate::{DataCheckParams, ParallelHandler};
