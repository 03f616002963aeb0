//! src/feed.rs
//!
//! Sample sources feeding the shared graphs.
//!
//! A serial reader parses one line per sample (values separated by commas or
//! whitespace, one value per series). Without a serial port a synthetic
//! generator emits noisy sine batches so the chart can be exercised offline.

use std::io::{BufRead, BufReader};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};
use rand::Rng;
use stripchart::SampleBatch;
use tracing::{debug, error, info, warn};

use crate::graph::SharedGraph;

const DEFAULT_BAUD: u32 = 115_200;

/// Where samples come from; read from the environment.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedConfig {
    Serial { port: String, baud_rate: u32 },
    Synthetic { batch: usize, period: Duration },
}

impl FeedConfig {
    /// `STRIPCHART_SERIAL` selects a port (`STRIPCHART_BAUD` overrides the
    /// baud rate); otherwise the synthetic generator is used.
    pub fn from_env() -> Self {
        match std::env::var("STRIPCHART_SERIAL") {
            Ok(port) if !port.trim().is_empty() => {
                let baud_rate = std::env::var("STRIPCHART_BAUD")
                    .ok()
                    .and_then(|b| b.trim().parse().ok())
                    .unwrap_or(DEFAULT_BAUD);
                FeedConfig::Serial {
                    port: port.trim().to_string(),
                    baud_rate,
                }
            }
            _ => FeedConfig::default(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FeedConfig::Serial { port, baud_rate } => format!("serial {port} @ {baud_rate}"),
            FeedConfig::Synthetic { batch, period } => {
                format!("synthetic, {batch} samples / {} ms", period.as_millis())
            }
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig::Synthetic {
            batch: 20,
            period: Duration::from_millis(20),
        }
    }
}

/// Start the configured feed for `graph` on its own thread.
pub fn spawn(config: &FeedConfig, graph: SharedGraph) -> JoinHandle<()> {
    match config.clone() {
        FeedConfig::Serial { port, baud_rate } => {
            thread::spawn(move || serial_reader(&port, baud_rate, graph))
        }
        FeedConfig::Synthetic { batch, period } => {
            thread::spawn(move || synthetic_source(batch, period, graph))
        }
    }
}

fn push_batch(graph: &SharedGraph, timestamps: &[DateTime<Local>], data: &[f64]) -> bool {
    let Ok(mut g) = graph.write() else {
        error!("graph lock poisoned, stopping feed");
        return false;
    };
    if let Err(e) = g
        .entity
        .add_plot_data(SampleBatch::Timestamped { timestamps, data })
    {
        warn!("dropped batch: {e}");
    }
    true
}

fn serial_reader(port_name: &str, baud_rate: u32, graph: SharedGraph) {
    let line_count = match graph.read() {
        Ok(g) => g.entity.line_count(),
        Err(_) => return,
    };
    info!(port = port_name, baud_rate, "opening serial port");
    let port = match serialport::new(port_name, baud_rate)
        .timeout(Duration::from_secs(10))
        .open()
    {
        Ok(p) => p,
        Err(e) => {
            error!(port = port_name, "failed to open serial port: {e}");
            return;
        }
    };

    for line_res in BufReader::new(port).lines() {
        match line_res {
            Ok(line) => {
                let Some(values) = parse_sample_line(&line, line_count) else {
                    debug!(line = line.trim(), "skipping unparsable line");
                    continue;
                };
                if !push_batch(&graph, &[Local::now()], &values) {
                    break;
                }
            }
            Err(e) => {
                error!("error reading serial data: {e}");
                break;
            }
        }
    }
    info!(port = port_name, "serial reader exiting");
}

/// Parse one sample line into exactly `line_count` values.
///
/// Accepted: `1.5, -2 3e2` (commas and/or whitespace). Blank lines, lines
/// with unparsable fields, or with the wrong number of values yield `None`.
pub fn parse_sample_line(line: &str, line_count: usize) -> Option<Vec<f64>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let values: Vec<f64> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok())
        .collect::<Option<_>>()?;
    (values.len() == line_count).then_some(values)
}

fn synthetic_source(batch: usize, period: Duration, graph: SharedGraph) {
    let line_count = match graph.read() {
        Ok(g) => g.entity.line_count(),
        Err(_) => return,
    };
    let mut rng = rand::rng();
    let mut n: u64 = 0;
    let step = period / batch.max(1) as u32;
    let step = TimeDelta::from_std(step).unwrap_or(TimeDelta::zero());
    info!(line_count, batch, "synthetic feed started");

    loop {
        let now = Local::now();
        let timestamps: Vec<DateTime<Local>> = (0..batch)
            .map(|j| now - step * (batch - 1 - j) as i32)
            .collect();
        let mut data = Vec::with_capacity(batch * line_count);
        for line in 0..line_count {
            let freq = 0.002 * (line as f64 + 1.0);
            let phase = line as f64 * std::f64::consts::FRAC_PI_3;
            for j in 0..batch {
                let t = (n + j as u64) as f64;
                let noise: f64 = rng.random_range(-0.1..0.1);
                data.push((t * freq * std::f64::consts::TAU + phase).sin() + noise);
            }
        }
        n += batch as u64;

        if !push_batch(&graph, &timestamps, &data) {
            break;
        }
        thread::sleep(period);
    }
}
