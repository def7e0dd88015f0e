//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current screen.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the answer cursor up
    CursorUp,
    /// Move the answer cursor down
    CursorDown,
    /// Select the answer under the cursor
    Select,
    /// Select answer / jump to slide by number
    Pick,
    Next,
    Back,
    PrevSlide,
    NextSlide,
    Restart,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.key == key && (self.modifiers.is_empty() || modifiers.contains(self.modifiers))
    }
}

/// Context-aware keybinding registry
#[derive(Debug)]
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.mode_bindings.insert(
            AppMode::Question,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::CursorUp, "Up", "Previous answer"),
                Keybinding::new(KeyCode::Down, KeyAction::CursorDown, "Down", "Next answer"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Choose answer"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Select, "Space", "Choose answer"),
                Keybinding::new(KeyCode::Char('1'), KeyAction::Pick, "1-9", "Choose answer by number"),
                Keybinding::new(KeyCode::Right, KeyAction::Next, "Right", "Next step"),
                Keybinding::new(KeyCode::Tab, KeyAction::Next, "Tab", "Next step"),
                Keybinding::new(KeyCode::Left, KeyAction::Back, "Left", "Previous step"),
                Keybinding::new(KeyCode::Backspace, KeyAction::Back, "Bksp", "Previous step"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Restart, "R", "Start over"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Results,
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::PrevSlide, "Left", "Previous product"),
                Keybinding::new(KeyCode::Right, KeyAction::NextSlide, "Right", "Next product"),
                Keybinding::new(KeyCode::Char('1'), KeyAction::Pick, "1-9", "Jump to product"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Restart, "R", "Start over"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::NoResults,
            vec![
                Keybinding::new(KeyCode::Char('r'), KeyAction::Restart, "R", "Start over"),
                Keybinding::new(KeyCode::Enter, KeyAction::Restart, "Enter", "Start over"),
            ],
        );

        self.mode_bindings.insert(AppMode::Loading, Vec::new());
        self.mode_bindings.insert(AppMode::LoadFailed, Vec::new());
    }

    /// Get all keybindings for a mode (mode-specific + global)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(mode_specific) = self.mode_bindings.get(mode) {
            bindings.extend(mode_specific.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Resolve a key press to an action in the given mode.
    ///
    /// Digits resolve to [`KeyAction::Pick`] wherever a pick binding exists.
    pub fn resolve(&self, mode: &AppMode, key: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
        let bindings = self.get_bindings(mode);
        if matches!(key, KeyCode::Char('1'..='9')) {
            return bindings
                .iter()
                .any(|b| b.action == KeyAction::Pick)
                .then_some(KeyAction::Pick);
        }
        bindings
            .iter()
            .find(|b| b.matches(key, modifiers))
            .map(|b| b.action)
    }

    /// Get navigation bar items for a mode (condensed view)
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Question => vec![
                KeyAction::CursorUp,
                KeyAction::Select,
                KeyAction::Next,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Results => vec![
                KeyAction::PrevSlide,
                KeyAction::Pick,
                KeyAction::Restart,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::NoResults => vec![KeyAction::Restart, KeyAction::Quit],
            AppMode::Loading | AppMode::LoadFailed => vec![KeyAction::Quit],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            let Some(binding) = bindings.iter().find(|b| b.action == action) else {
                continue;
            };
            // Combine paired movement keys into one item
            let item = match action {
                KeyAction::CursorUp => NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Answers".to_string(),
                },
                KeyAction::PrevSlide => NavBarItem {
                    key_display: "Left/Right".to_string(),
                    action_label: "Browse".to_string(),
                },
                _ => NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                },
            };
            items.push(item);
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, &[KeyAction]); 3] = [
            (
                "Navigation",
                &[
                    KeyAction::CursorUp,
                    KeyAction::CursorDown,
                    KeyAction::Next,
                    KeyAction::Back,
                    KeyAction::PrevSlide,
                    KeyAction::NextSlide,
                ],
            ),
            ("Actions", &[KeyAction::Select, KeyAction::Pick, KeyAction::Restart]),
            ("General", &[KeyAction::Help, KeyAction::Quit]),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: (*title).to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
