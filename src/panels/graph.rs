//! src/panels/graph.rs
//!
//! Graph panel: refreshes the plot buffers for the visible window, then
//! renders every line, a stats row, and optional locked-bounds lines.
//!
//! Bounds logic (target, smoothing, hysteresis) stays here; the chart only
//! ever receives the bounded plot buffers, never raw history.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use stripchart::FitType;
use tracing::warn;

use crate::graph::shared::{GraphShared, SharedGraph, StabilizationState};

pub struct GraphPanel {
    pub shared: SharedGraph,
}

impl GraphPanel {
    pub fn new(shared: SharedGraph) -> Self {
        Self { shared }
    }

    /// Target (ymin, ymax) from the retained data, padded.
    ///
    /// Falls back to the configured y range when nothing finite is retained.
    fn compute_target_bounds(g: &GraphShared) -> (f64, f64) {
        let Some((mx, mn)) = g.entity.max_and_min_y() else {
            return g.y_range;
        };
        if (mx - mn).abs() < f64::EPSILON {
            // flat data: absolute padding keeps the line visible
            let pad = (mn.abs().max(1.0)) * 0.1;
            (mn - pad, mx + pad)
        } else {
            let pad = (mx - mn) * 0.1;
            (mn - pad, mx + pad)
        }
    }

    /// Interpolate from current bounds toward target by alpha in [0,1].
    fn interp_bounds(current: (f64, f64), target: (f64, f64), alpha: f64) -> (f64, f64) {
        let a = alpha.clamp(0.0, 1.0);
        let (cmin, cmax) = current;
        let (tmin, tmax) = target;
        (cmin * (1.0 - a) + tmin * a, cmax * (1.0 - a) + tmax * a)
    }

    /// Move `g.view` one frame toward the target bounds with hysteresis.
    fn update_view(g: &mut GraphShared, target: (f64, f64), extremes: Option<(f64, f64)>) {
        if g.view.current_bounds.is_none() {
            g.view.current_bounds = Some(target);
            g.view.stable_count = 0;
            g.view.state = StabilizationState::Stable;
        }
        let current = g.view.current_bounds.unwrap_or(target);

        if g.locked_bounds.is_some() {
            g.view.state = StabilizationState::Stable;
            return;
        }
        let out_of_bounds = extremes
            .map(|(mx, mn)| mn < current.0 || mx > current.1)
            .unwrap_or(false);
        if out_of_bounds {
            g.view.state = StabilizationState::Expanding;
            g.view.stable_count = 0;
            let alpha = g.smoothing.max(0.5);
            g.view.current_bounds = Some(Self::interp_bounds(current, target, alpha));
            return;
        }

        let (cmin, cmax) = current;
        let margin = g.shrink_margin_frac * (cmax - cmin).abs().max(1e-9);
        let comfortable = target.0 >= cmin + margin && target.1 <= cmax - margin;
        if comfortable {
            g.view.stable_count += 1;
            if g.view.stable_count >= g.shrink_confirm_frames {
                g.view.state = StabilizationState::Shrinking;
                g.view.current_bounds = Some(Self::interp_bounds(current, target, g.smoothing));
            } else {
                g.view.state = StabilizationState::Stable;
            }
        } else {
            g.view.stable_count = 0;
            g.view.state = StabilizationState::Stable;
            if (g.smoothing - 1.0).abs() < f64::EPSILON {
                g.view.current_bounds = Some(target);
            }
        }
    }

    /// X axis bounds: the plotted range, or the full history width when the
    /// chart is in fixed-fit mode.
    fn x_bounds(g: &GraphShared) -> (f64, f64) {
        let xs = g.entity.plot_x();
        match (g.entity.fit_type(), xs.first(), xs.last()) {
            (FitType::Fixed, _, _) => (-(g.entity.storage().history().capacity() as f64), 0.0),
            (FitType::Range, Some(&a), Some(&b)) if b > a => (a as f64, b as f64),
            (FitType::Range, Some(&a), _) => (a as f64 - 1.0, a as f64 + 1.0),
            _ => (-1.0, 0.0),
        }
    }
}

impl crate::ui::Panel for GraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let Ok(mut g) = self.shared.write() else {
            return;
        };
        if let Err(e) = g.refresh() {
            warn!(graph = %g.name, "plot refresh failed: {e}");
        }

        let extremes = g.entity.max_and_min_y();
        let stats_text = match extremes {
            Some((mx, mn)) => {
                let newest = g.entity.samples_in_chart().saturating_sub(1);
                let last: Vec<String> = (0..g.entity.line_count())
                    .filter_map(|i| g.entity.y_value(newest, i))
                    .map(|v| format!("{v:.3}"))
                    .collect();
                format!("Min: {mn:.3}  Max: {mx:.3}  Last: [{}]", last.join(", "))
            }
            None => "no data".to_string(),
        };
        f.render_widget(
            Paragraph::new(stats_text).block(Block::default().title("Stats").borders(Borders::ALL)),
            chunks[0],
        );

        let target = if let Some(bounds) = g.locked_bounds {
            bounds
        } else if g.autoscale {
            Self::compute_target_bounds(&g)
        } else {
            g.y_range
        };
        Self::update_view(&mut g, target, extremes);

        let (ymin, ymax) = g.view.current_bounds.unwrap_or(g.y_range);
        let (xmin, xmax) = Self::x_bounds(&g);

        // keep point vectors alive until the chart is rendered
        let series: Vec<Vec<(f64, f64)>> = (0..g.entity.line_count())
            .map(|i| g.series_points(i))
            .collect();
        let top_line = [(xmin, ymax), (xmax, ymax)];
        let bot_line = [(xmin, ymin), (xmax, ymin)];

        let mut datasets: Vec<Dataset> = series
            .iter()
            .enumerate()
            .map(|(i, pts)| {
                Dataset::default()
                    .name(g.entity.info().series_name(i).unwrap_or_default().to_string())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(g.colors[i]))
                    .data(pts.as_slice())
            })
            .collect();
        if g.locked_bounds.is_some() {
            let locked = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
            for (name, line) in [("top", &top_line), ("bot", &bot_line)] {
                datasets.push(
                    Dataset::default()
                        .name(name)
                        .marker(symbols::Marker::Dot)
                        .graph_type(GraphType::Line)
                        .style(locked)
                        .data(line),
                );
            }
        }

        let span = (ymax - ymin).max(1e-9);
        let y_labels: Vec<String> = (0..5)
            .map(|i| format!("{:.3}", ymin + span * (i as f64) / 4.0))
            .collect();
        let x_labels = vec![format!("{xmin:.0}"), format!("{xmax:.0}")];

        let chart = Chart::new(datasets)
            .block(Block::default().title(g.name.clone()).borders(Borders::ALL))
            .x_axis(Axis::default().bounds([xmin, xmax]).labels(x_labels))
            .y_axis(Axis::default().bounds([ymin, ymax]).labels(y_labels));

        f.render_widget(chart, chunks[1]);
    }
}
