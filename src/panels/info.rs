//! src/panels/info.rs
//!
//! Graph info panel: plot buffer bookkeeping, view state and toggles.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use stripchart::XUpdate;

use crate::graph::shared::{SharedGraph, StabilizationState};

/// Read-only info panel; `highlighted` affects border style.
pub struct InfoPanel {
    pub shared: SharedGraph,
    pub highlighted: bool,
}

impl InfoPanel {
    pub fn new(shared: SharedGraph, highlighted: bool) -> Self {
        Self {
            shared,
            highlighted,
        }
    }
}

fn describe_update(update: XUpdate) -> String {
    match update {
        XUpdate::Pending => "pending".into(),
        XUpdate::Unchanged => "reused".into(),
        XUpdate::Appended(n) => format!("appended {n}"),
        XUpdate::Rebuilt => "rebuilt".into(),
    }
}

impl crate::ui::Panel for InfoPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(g) = self.shared.read() else {
            return;
        };

        let state = match g.view.state {
            StabilizationState::Stable => "Stable",
            StabilizationState::Expanding => "Expanding",
            StabilizationState::Shrinking => "Shrinking",
        };
        let bounds = g.view.current_bounds.unwrap_or(g.y_range);
        let lock_text = if g.locked_bounds.is_some() {
            " (locked)"
        } else {
            ""
        };
        let span = if g.span == 0 {
            "all".to_string()
        } else {
            g.span.to_string()
        };
        let (window, ratio) = match g.entity.x_window() {
            Some(w) => (format!("[{}, {}]", w.start, w.end), w.ratio),
            None => ("-".to_string(), 0),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(&g.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(
                    "{}  autoscale={}  smoothing={:.2}  fit={:?}",
                    lock_text,
                    g.autoscale,
                    g.smoothing,
                    g.entity.fit_type()
                )),
            ]),
            Line::from(format!(
                "samples={}  span={}  window={}",
                g.entity.samples_in_chart(),
                span,
                window
            )),
            Line::from(format!(
                "points={}/{}  ratio={}  x={}  changed={}",
                g.entity.plot_count(),
                g.entity.max_points(),
                ratio,
                describe_update(g.entity.last_x_update()),
                g.changed
            )),
            Line::from(format!(
                "state={}  bounds=[{:.3},{:.3}]",
                state, bounds.0, bounds.1
            )),
        ];

        let mut block = Block::default().title("Info").borders(Borders::ALL);
        if self.highlighted {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
