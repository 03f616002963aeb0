//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod graph;
pub mod help;
pub mod history;
pub mod info;
pub mod title;

pub use graph::GraphPanel;
pub use help::HelpPanel;
pub use history::HistoryPanel;
pub use info::InfoPanel;
pub use title::TitlePanel;
