//! src/ui/node.rs
//!
//! Layout tree rebuilt every frame, plus the `Panel` trait its leaves draw.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

pub enum Node {
    Split {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node>,
    },
    Leaf(Box<dyn Panel>),
}

impl Node {
    /// Children stacked top to bottom.
    pub fn rows(constraints: Vec<Constraint>, children: Vec<Node>) -> Self {
        Node::Split {
            direction: Direction::Vertical,
            constraints,
            children,
        }
    }

    /// Children laid out left to right.
    pub fn cols(constraints: Vec<Constraint>, children: Vec<Node>) -> Self {
        Node::Split {
            direction: Direction::Horizontal,
            constraints,
            children,
        }
    }

    pub fn panel<P: Panel + 'static>(panel: P) -> Self {
        Node::Leaf(Box::new(panel))
    }

    /// Children split evenly along `direction`.
    pub fn even(direction: Direction, children: Vec<Node>) -> Self {
        let n = children.len().max(1) as u32;
        Node::Split {
            direction,
            constraints: (0..children.len()).map(|_| Constraint::Ratio(1, n)).collect(),
            children,
        }
    }

    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        match self {
            Node::Split {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk);
                }
            }
            Node::Leaf(panel) => panel.draw(f, area),
        }
    }
}
