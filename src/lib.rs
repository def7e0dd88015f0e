//! SwipeQuiz Library
//!
//! A product-recommendation quiz: a step-by-step question flow, a catalog
//! filter driven by the answers, and a swipeable carousel for the results,
//! with a terminal front end on top.

pub mod app;
pub mod carousel;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod loader;
pub mod quiz;
pub mod swatch;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::{AppMode, Intent, QuizApp, ViewState};
pub use carousel::{Carousel, CarouselConfig, CarouselSnapshot, DragPhase, ReleaseOutcome};
pub use catalog::{Catalog, Product};
pub use config::AppConfig;
pub use error::{QuizError, Result};
pub use filter::{PriceRange, filter_catalog};
pub use loader::{DataLoader, Dataset};
pub use quiz::{QuizSession, Selections, StepView, Transition};
pub use types::{Direction, FilterStage, Question, QuestionKind};
