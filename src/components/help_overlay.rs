//! Help overlay component
//!
//! Displays context-sensitive help in a centered popup.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::{Colors, Styles, UiConstants};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            content: Self::build_content(&sections, mode),
        }
    }

    /// Build the help content from sections
    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  Style Quiz Help  ",
            Styles::title(),
        )]));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
            Span::styled(mode.title().to_string(), Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<10}", key),
                        Style::default()
                            .fg(Colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        if *mode == AppMode::Results {
            lines.push(Line::from(Span::styled(
                "  Drag a card with the mouse to swipe between products.",
                Styles::text_secondary(),
            )));
        }

        lines
    }

    /// Render the help overlay centered in `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = popup_area(
            parent,
            u16::try_from(self.content.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2),
        );
        f.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help ")
            .title_bottom(Line::from(" Press ? to close ").centered())
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Styles::panel_bg());

        let paragraph = Paragraph::new(self.content.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}

/// Centered popup rectangle sized by the dialog constants
fn popup_area(parent: Rect, content_height: u16) -> Rect {
    let width = (u32::from(parent.width) * u32::from(UiConstants::DIALOG_WIDTH_PCT) / 100) as u16;
    let width = width
        .clamp(UiConstants::DIALOG_MIN_WIDTH, UiConstants::DIALOG_MAX_WIDTH)
        .min(parent.width);
    let max_height =
        (u32::from(parent.height) * u32::from(UiConstants::DIALOG_HEIGHT_PCT) / 100) as u16;
    let height = content_height.min(max_height.max(3)).min(parent.height);

    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_fits_inside_parent() {
        let parent = Rect::new(0, 0, 30, 10);
        let area = popup_area(parent, 40);
        assert!(area.width <= parent.width);
        assert!(area.height <= parent.height);
        assert!(area.right() <= parent.right());
    }

    #[test]
    fn test_results_help_mentions_dragging() {
        let ctx = KeybindingContext::new();
        let overlay = HelpOverlay::new(&AppMode::Results, &ctx);
        let text: String = overlay
            .content
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Drag"));
        assert!(text.contains("Jump to product"));
    }
}
