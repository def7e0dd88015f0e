//! Application state definitions
//!
//! Screen modes, the intents a presentation layer may emit, and the
//! read-only view handed to renderers.

use crate::carousel::CarouselSnapshot;
use crate::catalog::Product;
use crate::quiz::StepView;
use crate::types::Direction;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Waiting for questions and products
    Loading,
    /// Answering one quiz step
    Question,
    /// Browsing matching products in the carousel
    Results,
    /// Quiz finished but no product matched
    NoResults,
    /// Data could not be loaded; only quitting is possible
    LoadFailed,
}

impl AppMode {
    /// Human-readable screen name
    pub const fn title(self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::Question => "Quiz",
            Self::Results => "Recommendations",
            Self::NoResults => "No Results",
            Self::LoadFailed => "Load Failed",
        }
    }
}

/// User intents emitted by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SelectAnswer { step: usize, answer: String },
    Advance,
    Retreat,
    Navigate(Direction),
    GoToSlide(usize),
    /// Pointer pressed on the carousel track, x in pixels
    PointerDown { x: f32 },
    /// Pointer moved while pressed, x in pixels
    PointerMove { x: f32 },
    PointerUp,
    /// Pointer or focus left the carousel surface
    PointerLeave,
    Restart,
    ToggleHelp,
    Quit,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct ViewState<'a> {
    pub mode: AppMode,
    pub step: Option<StepView>,
    pub products: &'a [Product],
    pub carousel: Option<CarouselSnapshot>,
    /// Snap animation progress in `[0, 1]`
    pub settle_progress: f32,
    pub status_message: &'a str,
    pub load_error: Option<&'a str>,
    pub help_visible: bool,
}
