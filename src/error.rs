//! src/error.rs
//!
//! Error type shared by the plot buffer manager and its storage backends.

/// Precondition violations surfaced by the library. Nothing here is retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlotError {
    #[error("invalid range: end index {end} precedes begin index {begin}")]
    InvalidRange { begin: usize, end: usize },

    #[error("range end {end} exceeds the {available} samples in chart")]
    RangeExceedsData { end: usize, available: usize },

    #[error("series index {index} out of range for {line_count} lines")]
    SeriesOutOfRange { index: usize, line_count: usize },

    #[error("expected {expected} values for {line_count} lines, got {actual}")]
    LineCountMismatch {
        line_count: usize,
        expected: usize,
        actual: usize,
    },

    #[error("x data has {x_len} entries but the batch carries {sample_count} samples per line")]
    SampleCountMismatch { x_len: usize, sample_count: usize },

    #[error("{storage} storage does not accept {input} input")]
    UnsupportedInput {
        storage: &'static str,
        input: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;
