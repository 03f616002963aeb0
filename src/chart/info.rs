//! src/chart/info.rs
//!
//! Static description of a data entity: how many lines it carries and what
//! kind of X axis it uses.

/// Kind of X value attached to each sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XKind {
    /// Samples are identified by their running sample number.
    Index,
    /// Each sample carries a wall-clock timestamp.
    Timestamp,
    /// Each sample carries a free-form string label.
    Label,
}

impl XKind {
    pub fn name(&self) -> &'static str {
        match self {
            XKind::Index => "numeric",
            XKind::Timestamp => "timestamped",
            XKind::Label => "labeled",
        }
    }
}

/// Immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataEntityInfo {
    pub line_count: usize,
    pub x_kind: XKind,
    pub series_names: Vec<String>,
}

impl DataEntityInfo {
    /// Info with generated names `line 0`, `line 1`, ...
    pub fn new(line_count: usize, x_kind: XKind) -> Self {
        Self {
            line_count,
            x_kind,
            series_names: (0..line_count).map(|i| format!("line {i}")).collect(),
        }
    }

    /// Info whose line count is taken from the provided names.
    pub fn with_names<S: Into<String>>(x_kind: XKind, names: impl IntoIterator<Item = S>) -> Self {
        let series_names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self {
            line_count: series_names.len(),
            x_kind,
            series_names,
        }
    }

    pub fn series_name(&self, index: usize) -> Option<&str> {
        self.series_names.get(index).map(String::as_str)
    }
}
