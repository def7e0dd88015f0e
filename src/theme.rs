//! Centralized theme and styling for the quiz UI
//!
//! Every color, style and user-facing string of the terminal front end is
//! defined here so screens stay visually consistent.
//!
//! # Usage
//! ```rust
//! use swipequiz::swatch::swatch_for;
//! use swipequiz::theme::{Colors, Styles, Theme};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let swatch_color = Theme::swatch_color(&swatch_for("mavi"));
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::swatch::Swatch;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors
    // -------------------------------------------------------------------------

    /// Card and popup background
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled text color
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Selected answers and the active indicator
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // -------------------------------------------------------------------------
    // Quiz Elements
    // -------------------------------------------------------------------------

    pub const BORDER_ACTIVE: Color = Color::Cyan;
    pub const BORDER_INACTIVE: Color = Color::DarkGray;
    pub const SELECTED_BG: Color = Color::Yellow;
    pub const SELECTED_FG: Color = Color::Black;

    /// Reached step in the progress row
    pub const STEP_DONE: Color = Color::Green;

    /// Step not reached yet
    pub const STEP_PENDING: Color = Color::DarkGray;

    /// Current price on a product card
    pub const PRICE: Color = Color::LightGreen;

    /// Struck-through original price
    pub const OLD_PRICE: Color = Color::DarkGray;

    /// Product link
    pub const LINK: Color = Color::LightBlue;

    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Main title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    /// Selected answer
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn unselected() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    /// Enabled Back/Next button
    pub fn button_active() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled Back/Next button
    pub fn button_disabled() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn price() -> Style {
        Style::default()
            .fg(Colors::PRICE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn old_price() -> Style {
        Style::default()
            .fg(Colors::OLD_PRICE)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn link() -> Style {
        Style::default()
            .fg(Colors::LINK)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

// =============================================================================
// THEME CONTEXT
// =============================================================================

/// Semantic style lookups
pub struct Theme;

impl Theme {
    /// Terminal color of a color-answer swatch
    pub fn swatch_color(swatch: &Swatch) -> Color {
        let (r, g, b) = swatch.rgb;
        Color::Rgb(r, g, b)
    }

    /// Style of one step in the progress row
    pub fn step_style(reached: bool) -> Style {
        if reached {
            Style::default()
                .fg(Colors::STEP_DONE)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Colors::STEP_PENDING)
        }
    }

    /// Style of one carousel indicator
    pub fn indicator_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Colors::SECONDARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Colors::FG_MUTED)
        }
    }

    /// Back/Next button style
    pub fn button_style(enabled: bool) -> Style {
        if enabled {
            Styles::button_active()
        } else {
            Styles::button_disabled()
        }
    }

    /// Answer option style
    pub fn answer_style(selected: bool) -> Style {
        if selected {
            Styles::selected()
        } else {
            Styles::unselected()
        }
    }
}

// =============================================================================
// UI CONSTANTS
// =============================================================================

/// UI dimension and layout constants
pub struct UiConstants;

impl UiConstants {
    /// Help popup width percentage
    pub const DIALOG_WIDTH_PCT: u16 = 60;
    pub const DIALOG_HEIGHT_PCT: u16 = 70;
    pub const DIALOG_MIN_WIDTH: u16 = 40;
    pub const DIALOG_MAX_WIDTH: u16 = 80;

    pub const NAV_BAR_HEIGHT: u16 = 1;

    /// Title block height
    pub const HEADER_HEIGHT: u16 = 3;

    pub const STATUS_BAR_HEIGHT: u16 = 1;

    /// Rows per answer option
    pub const ANSWER_HEIGHT: u16 = 1;

    /// Width of the previous/next arrow columns
    pub const ARROW_WIDTH: u16 = 5;

    /// Max slide width in columns
    pub const CARD_MAX_WIDTH: u16 = 48;
}

// =============================================================================
// TEXT CONSTANTS
// =============================================================================

/// User-facing strings
pub struct UiText;

impl UiText {
    pub const APP_TITLE: &'static str = "Find Your Style";

    pub const BTN_BACK: &'static str = "[ Back ]";
    pub const BTN_NEXT: &'static str = "[ Next ]";
    pub const BTN_SEE_RESULTS: &'static str = "[ See Results ]";
    pub const BTN_RESTART: &'static str = "[ Start Over ]";

    pub const ARROW_PREV: &'static str = "‹";
    pub const ARROW_NEXT: &'static str = "›";
    pub const INDICATOR: &'static str = "●";
    pub const STEP_MARK: &'static str = "■";

    pub const LOADING: &'static str = "Loading...";
    pub const LOAD_FAILED: &'static str = "Something went wrong while loading the quiz.";
    pub const NO_PRODUCTS: &'static str = "No Products Found";
    pub const NO_PRODUCTS_HINT: &'static str = "Try different answers to see more products.";
    pub const PRESS_QUIT: &'static str = "Press q to quit";
}
