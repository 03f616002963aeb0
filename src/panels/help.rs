//! src/panels/help.rs
//!
//! Key binding reference.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct HelpPanel {
    pub bindings: &'static [(&'static str, &'static str)],
}

impl HelpPanel {
    pub fn new(bindings: &'static [(&'static str, &'static str)]) -> Self {
        Self { bindings }
    }
}

impl crate::ui::Panel for HelpPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = self
            .bindings
            .iter()
            .map(|(key, action)| {
                Line::from(vec![
                    Span::styled(format!("{key:>5} "), Style::default().fg(Color::Yellow)),
                    Span::raw(*action),
                ])
            })
            .collect();
        let p = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Controls").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
