//! src/ui.rs
//!
//! Top-level UI module re-exporting the layout tree.

pub mod node;

pub use node::{Node, Panel};
