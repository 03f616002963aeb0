//! src/app.rs
//!
//! Terminal strip chart driving the plot buffer manager.
//!
//! # Overview
//!
//! `run()` builds the shared graphs, starts one feed thread per graph, and
//! runs the draw loop. Each frame every graph panel asks its `DataEntity` to
//! refill the visible window; the entity reuses, extends or rebuilds its
//! cached X coordinates and the chart receives at most
//! `max_points_in_single_series` points per line no matter how much history
//! is retained.
//!
//! # Environment
//!
//! - `STRIPCHART_SERIAL`: serial port to read (e.g. `/dev/ttyACM0`). Each
//!   line carries one value per series, separated by commas or whitespace.
//!   Without it a synthetic generator feeds both graphs.
//! - `STRIPCHART_BAUD`: baud rate for the serial port (default `115200`).
//! - `STRIPCHART_LOG`: file receiving `tracing` output; filter with
//!   `RUST_LOG` (default `info`).
//!
//! # Keyboard Controls
//!
//! - **Tab**: Cycle focus among graphs. The focused graph's Info panel is
//!   highlighted.
//! - **+ / -**: Zoom the focused graph in (halve span) or out (double span,
//!   eventually following the whole history).
//! - **a**: Toggle autoscale. Autoscale clears any locked bounds.
//! - **s**: Cycle smoothing presets `0.0, 0.25, 0.5, 0.75, 1.0`.
//! - **l**: Lock/unlock the current Y-axis bounds.
//! - **f**: Toggle fit mode (plotted range vs. full history width).
//! - **c**: Clear the focused graph.
//! - **q**: Quit and restore terminal state.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::eyre;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Direction};
use ratatui::style::Color;
use tracing::info;

use crate::feed::{self, FeedConfig};
use crate::graph::shared::{GraphGuard, GraphShared, SharedGraph};
use crate::graph::GraphConfig;
use crate::panels::{GraphPanel, HelpPanel, HistoryPanel, InfoPanel, TitlePanel};
use crate::ui::Node;

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Tab", "focus next graph"),
    ("+/-", "zoom in / out"),
    ("a", "autoscale"),
    ("s", "smoothing"),
    ("l", "lock bounds"),
    ("f", "fit mode"),
    ("c", "clear"),
    ("q", "quit"),
];

const SMOOTHING_PRESETS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

fn shared(cfg: GraphConfig, colors: &[Color], smoothing: f64) -> color_eyre::Result<SharedGraph> {
    Ok(Arc::new(RwLock::new(GraphShared::new(
        cfg, colors, true, smoothing,
    )?)))
}

/// Graphs for the configured source: serial input gets one graph with three
/// lines; the synthetic source gets a wide multi-line view and a zoomed one.
fn build_graphs(feed: &FeedConfig) -> color_eyre::Result<Vec<SharedGraph>> {
    let palette = [Color::Cyan, Color::Magenta, Color::Yellow, Color::Green];
    let graphs = match feed {
        FeedConfig::Serial { .. } => vec![shared(
            GraphConfig::new("Serial", &["ch 0", "ch 1", "ch 2"], 200_000, (-1.0, 1.0)),
            &palette,
            0.35,
        )?],
        FeedConfig::Synthetic { .. } => vec![
            shared(
                GraphConfig::new("Sines", &["slow", "mid", "fast"], 200_000, (-1.5, 1.5)),
                &palette,
                0.35,
            )?,
            shared(
                GraphConfig::new("Detail", &["probe"], 20_000, (-1.5, 1.5)).with_span(512),
                &palette[3..],
                1.0,
            )?,
        ],
    };
    Ok(graphs)
}

fn layout(graphs: &[SharedGraph], focused: usize, source: &str) -> Node {
    let regions: Vec<Node> = graphs
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Node::rows(
                vec![Constraint::Percentage(70), Constraint::Percentage(30)],
                vec![
                    Node::panel(GraphPanel::new(g.clone())),
                    Node::cols(
                        vec![Constraint::Percentage(55), Constraint::Percentage(45)],
                        vec![
                            Node::panel(HistoryPanel::new(g.clone())),
                            Node::panel(InfoPanel::new(g.clone(), i == focused)),
                        ],
                    ),
                ],
            )
        })
        .collect();

    Node::rows(
        vec![Constraint::Length(3), Constraint::Min(3)],
        vec![
            Node::panel(TitlePanel::new("Live Strip Chart", source)),
            Node::cols(
                vec![Constraint::Percentage(80), Constraint::Percentage(20)],
                vec![
                    Node::even(Direction::Vertical, regions),
                    Node::panel(HelpPanel::new(KEY_BINDINGS)),
                ],
            ),
        ],
    )
}

fn write(graph: &SharedGraph) -> color_eyre::Result<GraphGuard<'_>> {
    graph.write().map_err(|_| eyre!("graph lock poisoned"))
}

/// Apply one key press. Returns `false` when the app should exit.
fn handle_key(code: KeyCode, graphs: &[SharedGraph], focused: &mut usize) -> color_eyre::Result<bool> {
    let current = &graphs[*focused];
    match code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Tab => *focused = (*focused + 1) % graphs.len(),
        KeyCode::Char('+') | KeyCode::Char('=') => write(current)?.zoom_in(),
        KeyCode::Char('-') => write(current)?.zoom_out(),
        KeyCode::Char('a') => {
            let mut g = write(current)?;
            g.autoscale = !g.autoscale;
            if g.autoscale {
                g.locked_bounds = None;
            }
        }
        KeyCode::Char('s') => {
            let mut g = write(current)?;
            let idx = SMOOTHING_PRESETS
                .iter()
                .position(|&v| (v - g.smoothing).abs() < 1e-9)
                .unwrap_or(0);
            g.smoothing = SMOOTHING_PRESETS[(idx + 1) % SMOOTHING_PRESETS.len()];
        }
        KeyCode::Char('l') => {
            let mut g = write(current)?;
            g.locked_bounds = match g.locked_bounds {
                Some(_) => None,
                None => g.view.current_bounds,
            };
        }
        KeyCode::Char('f') => write(current)?.toggle_fit(),
        KeyCode::Char('c') => write(current)?.clear(),
        _ => {}
    }
    Ok(true)
}

pub fn run() -> color_eyre::Result<()> {
    let feed_config = FeedConfig::from_env();
    let source = feed_config.describe();
    let graphs = build_graphs(&feed_config)?;
    info!(source = %source, graphs = graphs.len(), "starting strip chart");

    for g in &graphs {
        feed::spawn(&feed_config, g.clone());
    }

    let mut terminal = ratatui::init();
    let mut focused = 0usize;
    let frame_time = Duration::from_millis(50);
    let mut running = true;

    let result = (|| -> color_eyre::Result<()> {
        while running {
            let frame_start = Instant::now();

            let root = layout(&graphs, focused, &source);
            terminal.draw(|f| root.draw(f, f.area()))?;

            while event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        running = handle_key(key.code, &graphs, &mut focused)?;
                    }
                }
                if !running {
                    break;
                }
            }

            let elapsed = frame_start.elapsed();
            if running && elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
        Ok(())
    })();

    ratatui::restore();
    info!("strip chart stopped");
    result
}
