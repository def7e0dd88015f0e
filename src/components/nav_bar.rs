//! One-line navigation bar listing the main keys of the current screen

use super::keybindings::NavBarItem;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Navigation bar component
pub struct NavBar {
    items: Vec<NavBarItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavBarItem>) -> Self {
        Self { items }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.items.len() * 3);
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Styles::nav_hint()));
            }
            spans.push(Span::styled(
                format!("[{}]", item.key_display),
                Style::default()
                    .fg(Colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
        }
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Paragraph::new(self.line()).centered(), area);
    }
}
