//! src/main.rs
//!
//! Entrypoint: installs error reporting and logging, then delegates to
//! `app::run()`.

mod app;
mod feed;
mod graph;
mod panels;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Log to the file named by `STRIPCHART_LOG`; the terminal belongs to the UI,
/// so without it nothing is logged.
fn init_tracing() -> color_eyre::Result<()> {
    let Ok(path) = std::env::var("STRIPCHART_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing()?;
    app::run()
}
