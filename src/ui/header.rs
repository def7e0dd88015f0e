//! Header and common widget rendering
//!
//! Title block, status line, navigation bar, help overlay and the full-screen
//! loading and error messages.

use crate::app::{AppMode, ViewState};
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::theme::{Styles, UiText};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Header renderer for the title block
pub struct HeaderRenderer {
    title: Line<'static>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            title: Line::from(Span::styled(UiText::APP_TITLE, Styles::title())),
        }
    }

    /// Render the bordered title with the screen name on the right
    pub fn render_title(&self, f: &mut Frame, area: Rect, mode: AppMode) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .title_top(Line::from(format!(" {} ", mode.title())).right_aligned());
        let header = Paragraph::new(self.title.clone())
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }
}

/// Vertically centered block of lines inside `area`
fn render_centered(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

/// Loading screen
pub fn render_loading(f: &mut Frame, area: Rect) {
    render_centered(
        f,
        area,
        vec![Line::from(Span::styled(UiText::LOADING, Styles::text_secondary()))],
    );
}

/// Terminal load failure screen; there is no retry
pub fn render_load_failed(f: &mut Frame, area: Rect, detail: Option<&str>) {
    let mut lines = vec![
        Line::from(Span::styled(UiText::LOAD_FAILED, Styles::error())),
        Line::from(""),
    ];
    if let Some(detail) = detail {
        lines.push(Line::from(Span::styled(detail.to_string(), Styles::text_muted())));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(UiText::PRESS_QUIT, Styles::text_secondary())));
    render_centered(f, area, lines);
}

/// One-line status message
pub fn render_status(f: &mut Frame, area: Rect, view: &ViewState<'_>) {
    let style = match view.mode {
        AppMode::LoadFailed => Styles::error(),
        AppMode::NoResults => Styles::warning(),
        AppMode::Results => Styles::success(),
        AppMode::Loading | AppMode::Question => Styles::text_secondary(),
    };
    let status = Paragraph::new(Span::styled(view.status_message.to_string(), style))
        .alignment(Alignment::Center);
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, mode: AppMode, keybinding_ctx: &KeybindingContext, area: Rect) {
    let nav_bar = NavBar::new(keybinding_ctx.get_nav_items(&mode));
    nav_bar.render(f, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, mode: AppMode, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&mode, keybinding_ctx);
    help_overlay.render(f, f.area());
}
