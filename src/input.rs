//! Input handling module
//!
//! Translates crossterm key, mouse and focus events into [`Intent`]s. Key
//! presses go through the [`KeybindingContext`]; mouse clicks are hit-tested
//! against the [`HitMap`] recorded during the last draw. A mouse drag that
//! starts on the carousel track becomes a pointer gesture, with column
//! positions converted to pixels.

use crate::app::{AppMode, Intent, ViewState};
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::types::Direction;
use crate::ui::{HitMap, HitTarget};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use tracing::trace;

/// Terminal-side input state
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Answer under the keyboard cursor
    answer_cursor: usize,
    /// Step the cursor belongs to; the cursor resets when the step changes
    cursor_step: Option<usize>,
    /// A mouse drag on the track is in progress
    dragging: bool,
    cell_width_px: f32,
}

impl InputHandler {
    pub fn new(cell_width_px: f32) -> Self {
        Self {
            answer_cursor: 0,
            cursor_step: None,
            dragging: false,
            cell_width_px,
        }
    }

    /// Answer index under the keyboard cursor
    pub fn answer_cursor(&self) -> usize {
        self.answer_cursor
    }

    pub fn cell_width_px(&self) -> f32 {
        self.cell_width_px
    }

    /// Convert a terminal column to the carousel's pixel space
    pub fn column_to_px(&self, column: u16) -> f32 {
        f32::from(column) * self.cell_width_px
    }

    /// Keep the cursor on the current step, restoring a previous selection.
    pub fn sync(&mut self, view: &ViewState<'_>) {
        if view.mode != AppMode::Results {
            self.dragging = false;
        }
        let Some(step) = &view.step else {
            self.cursor_step = None;
            return;
        };
        if self.cursor_step != Some(step.index) {
            self.cursor_step = Some(step.index);
            self.answer_cursor = step.answers.iter().position(|a| a.selected).unwrap_or(0);
        }
    }

    /// Translate one terminal event
    pub fn handle_event(
        &mut self,
        event: &Event,
        view: &ViewState<'_>,
        keys: &KeybindingContext,
        hits: &HitMap,
    ) -> Option<Intent> {
        match event {
            Event::Key(key) => self.handle_key(*key, view, keys),
            Event::Mouse(mouse) => self.handle_mouse(*mouse, view, hits),
            Event::FocusLost => self.end_drag(),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, view: &ViewState<'_>, keys: &KeybindingContext) -> Option<Intent> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let action = keys.resolve(&view.mode, key.code, key.modifiers)?;
        trace!(?action, "Key resolved");

        if view.help_visible {
            return match (action, key.code) {
                (KeyAction::Help, _) | (_, KeyCode::Esc) => Some(Intent::ToggleHelp),
                (KeyAction::Quit, _) => Some(Intent::Quit),
                _ => None,
            };
        }

        match action {
            KeyAction::Help => Some(Intent::ToggleHelp),
            KeyAction::Quit => Some(Intent::Quit),
            KeyAction::Restart => Some(Intent::Restart),
            KeyAction::Next => Some(Intent::Advance),
            KeyAction::Back => Some(Intent::Retreat),
            KeyAction::PrevSlide => Some(Intent::Navigate(Direction::Prev)),
            KeyAction::NextSlide => Some(Intent::Navigate(Direction::Next)),
            KeyAction::CursorUp | KeyAction::CursorDown => {
                let count = view.step.as_ref().map_or(0, |s| s.answers.len());
                if count > 0 {
                    self.answer_cursor = if action == KeyAction::CursorUp {
                        (self.answer_cursor + count - 1) % count
                    } else {
                        (self.answer_cursor + 1) % count
                    };
                }
                None
            }
            KeyAction::Select => self.select(view, self.answer_cursor),
            KeyAction::Pick => {
                let KeyCode::Char(c) = key.code else {
                    return None;
                };
                let index = c.to_digit(10)?.checked_sub(1)? as usize;
                match view.mode {
                    AppMode::Results => Some(Intent::GoToSlide(index)),
                    _ => {
                        let intent = self.select(view, index);
                        if intent.is_some() {
                            self.answer_cursor = index;
                        }
                        intent
                    }
                }
            }
        }
    }

    fn select(&self, view: &ViewState<'_>, index: usize) -> Option<Intent> {
        let step = view.step.as_ref()?;
        let answer = step.answers.get(index)?;
        Some(Intent::SelectAnswer {
            step: step.index,
            answer: answer.label.clone(),
        })
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, view: &ViewState<'_>, hits: &HitMap) -> Option<Intent> {
        if view.help_visible {
            return None;
        }
        let x = self.column_to_px(mouse.column);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(target) = hits.hit(mouse.column, mouse.row) {
                    return self.click(target);
                }
                if view.mode == AppMode::Results && hits.on_track(mouse.column, mouse.row) {
                    self.dragging = true;
                    return Some(Intent::PointerDown { x });
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => {
                if hits.on_track(mouse.column, mouse.row) {
                    Some(Intent::PointerMove { x })
                } else {
                    self.end_drag()
                }
            }
            MouseEventKind::Up(MouseButton::Left) if self.dragging => {
                self.dragging = false;
                Some(Intent::PointerUp)
            }
            _ => None,
        }
    }

    /// Pointer left the track or the terminal lost focus
    fn end_drag(&mut self) -> Option<Intent> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some(Intent::PointerLeave)
    }

    fn click(&mut self, target: &HitTarget) -> Option<Intent> {
        Some(match target {
            HitTarget::Answer { step, answer } => Intent::SelectAnswer {
                step: *step,
                answer: answer.clone(),
            },
            HitTarget::Back => Intent::Retreat,
            HitTarget::Next => Intent::Advance,
            HitTarget::PrevArrow => Intent::Navigate(Direction::Prev),
            HitTarget::NextArrow => Intent::Navigate(Direction::Next),
            HitTarget::Indicator(index) => Intent::GoToSlide(*index),
            HitTarget::Restart => Intent::Restart,
        })
    }
}
