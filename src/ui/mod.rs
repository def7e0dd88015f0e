//! User interface rendering module
//!
//! Turns a [`ViewState`] into widgets. Submodules:
//! - `header` - title block, status line, nav bar, help, loading and error screens
//! - `question` - one quiz step with answers, progress and Back/Next
//! - `carousel` - product cards, arrows and indicators
//!
//! Every clickable element is recorded in a [`HitMap`] during the draw so the
//! input layer can hit-test mouse events against what is actually on screen.

mod carousel;
mod header;
mod question;

use crate::app::{AppMode, ViewState};
use crate::components::keybindings::KeybindingContext;
use crate::theme::UiConstants;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    Frame,
};

pub use header::HeaderRenderer;

/// Clickable element of the last drawn frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// Answer option of a step
    Answer { step: usize, answer: String },
    Back,
    Next,
    PrevArrow,
    NextArrow,
    /// Carousel indicator for a slide
    Indicator(usize),
    Restart,
}

/// Rectangles of clickable elements recorded during a draw
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
    track: Option<Rect>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything from the previous frame
    pub fn clear(&mut self) {
        self.regions.clear();
        self.track = None;
    }

    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Record the carousel track surface
    pub fn set_track(&mut self, area: Rect) {
        self.track = Some(area);
    }

    /// Carousel track of the last frame, if one was drawn
    pub fn track(&self) -> Option<Rect> {
        self.track
    }

    /// Whether `(column, row)` lies on the carousel track
    pub fn on_track(&self, column: u16, row: u16) -> bool {
        self.track
            .is_some_and(|t| t.contains(Position::new(column, row)))
    }

    /// Target under `(column, row)`; later registrations win
    pub fn hit(&self, column: u16, row: u16) -> Option<&HitTarget> {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| target)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Terminal-side settings a draw needs besides the view
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub keybindings: &'a KeybindingContext,
    /// Answer under the keyboard cursor on the question screen
    pub answer_cursor: usize,
    /// Pixel width of one terminal column
    pub cell_width_px: f32,
}

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI and record clickable regions in `hits`
    pub fn render(&self, f: &mut Frame, view: &ViewState<'_>, ctx: &RenderContext<'_>, hits: &mut HitMap) {
        hits.clear();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(UiConstants::STATUS_BAR_HEIGHT),
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        self.header.render_title(f, chunks[0], view.mode);

        match view.mode {
            AppMode::Loading => header::render_loading(f, chunks[1]),
            AppMode::LoadFailed => header::render_load_failed(f, chunks[1], view.load_error),
            AppMode::Question => {
                if let Some(step) = &view.step {
                    question::render_question(f, chunks[1], step, ctx.answer_cursor, hits);
                }
            }
            AppMode::Results => {
                if let Some(snapshot) = &view.carousel {
                    carousel::render_results(f, chunks[1], view.products, snapshot, ctx.cell_width_px, hits);
                }
            }
            AppMode::NoResults => carousel::render_no_results(f, chunks[1], hits),
        }

        header::render_status(f, chunks[2], view);
        header::render_nav_bar(f, view.mode, ctx.keybindings, chunks[3]);

        if view.help_visible {
            header::render_help_overlay(f, view.mode, ctx.keybindings);
        }
    }
}
