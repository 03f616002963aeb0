//! src/panels/history.rs
//!
//! History panel: the newest retained raw samples, read through the point
//! accessors rather than the plot buffers.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::graph::shared::SharedGraph;

pub struct HistoryPanel {
    pub shared: SharedGraph,
}

impl HistoryPanel {
    pub fn new(shared: SharedGraph) -> Self {
        Self { shared }
    }
}

impl crate::ui::Panel for HistoryPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(g) = self.shared.read() else {
            return;
        };
        let rows = area.height.saturating_sub(2) as usize;
        let samples = g.entity.samples_in_chart();
        let start = samples.saturating_sub(rows);
        let newest = samples.saturating_sub(1);

        let lines: Vec<Line> = (start..samples)
            .map(|i| {
                let hot = (i == newest)
                    .then(|| Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
                let xs = hot.unwrap_or(Style::default().fg(Color::Green));
                let x = g
                    .entity
                    .x_value(i)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "?".into());
                let mut spans = vec![
                    Span::styled("x: ", Style::default().fg(Color::Yellow)),
                    Span::styled(x, xs),
                ];
                for s in 0..g.entity.line_count() {
                    let y = g.entity.y_value(i, s).unwrap_or(f64::NAN);
                    spans.push(Span::raw("  "));
                    let ys = hot.unwrap_or(Style::default().fg(g.colors[s]));
                    spans.push(Span::styled(format!("{y:.3}"), ys));
                }
                Line::from(spans)
            })
            .collect();

        let block = Block::default().title("History").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
