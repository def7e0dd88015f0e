//! Headless quiz controller
//!
//! Owns the quiz session, the loaded catalog and the results carousel, and
//! applies [`Intent`]s to them. The terminal front end only translates input
//! into intents and renders [`ViewState`] snapshots; tests drive the same
//! controller without a terminal.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use super::state::{AppMode, Intent, ViewState};
use crate::carousel::{Carousel, CarouselConfig, ReleaseOutcome, SharedWidth};
use crate::catalog::{Catalog, Product};
use crate::error::Result;
use crate::filter::filter_catalog;
use crate::loader::Dataset;
use crate::quiz::{QuizSession, Transition};
use crate::types::Direction;

/// Quiz application state without any terminal attached
#[derive(Debug)]
pub struct QuizApp {
    mode: AppMode,
    session: Option<QuizSession>,
    catalog: Catalog,
    carousel: Option<Carousel<Product>>,
    carousel_config: CarouselConfig,
    slide_width: SharedWidth,
    status_message: String,
    load_error: Option<String>,
    help_visible: bool,
}

impl QuizApp {
    /// Create a controller waiting for data. `slide_width` is the initial
    /// width of one carousel slide in pixels.
    pub fn new(carousel_config: CarouselConfig, slide_width: f32) -> Self {
        Self {
            mode: AppMode::Loading,
            session: None,
            catalog: Catalog::default(),
            carousel: None,
            carousel_config,
            slide_width: SharedWidth::new(slide_width),
            status_message: "Loading questions and products...".to_string(),
            load_error: None,
            help_visible: false,
        }
    }

    /// Create a controller with data already loaded
    pub fn with_dataset(carousel_config: CarouselConfig, slide_width: f32, dataset: Dataset) -> Self {
        let mut app = Self::new(carousel_config, slide_width);
        app.on_loaded(Ok(dataset));
        app
    }

    /// Receive the outcome of the data load.
    ///
    /// Only the first outcome counts; later ones are ignored.
    pub fn on_loaded(&mut self, outcome: Result<Dataset>) {
        if self.mode != AppMode::Loading {
            warn!(mode = ?self.mode, "Ignoring data load outcome outside loading screen");
            return;
        }

        match outcome.and_then(|dataset| {
            let session = QuizSession::new(dataset.questions)?;
            Ok((session, dataset.catalog))
        }) {
            Ok((session, catalog)) => {
                info!(
                    steps = session.total_steps(),
                    products = catalog.len(),
                    "Quiz ready"
                );
                self.session = Some(session);
                self.catalog = catalog;
                self.mode = AppMode::Question;
                self.status_message = "Choose an answer".to_string();
            }
            Err(e) => {
                error!(error = %e, "Failed to load quiz data");
                self.status_message = "Could not load the quiz".to_string();
                self.load_error = Some(e.to_string());
                self.mode = AppMode::LoadFailed;
            }
        }
    }

    #[inline]
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn carousel(&self) -> Option<&Carousel<Product>> {
        self.carousel.as_ref()
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Products currently in the carousel
    pub fn results(&self) -> &[Product] {
        self.carousel.as_ref().map(Carousel::items).unwrap_or(&[])
    }

    /// Apply one intent. Returns `true` when the app should quit.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        debug!(?intent, mode = ?self.mode, "Dispatching intent");

        match intent {
            Intent::Quit => return true,
            Intent::ToggleHelp => self.help_visible = !self.help_visible,
            Intent::Restart => self.restart(),
            Intent::SelectAnswer { step, answer } => self.select_answer(step, &answer),
            Intent::Advance => self.advance(),
            Intent::Retreat => self.retreat(),
            Intent::Navigate(direction) => self.navigate(direction),
            Intent::GoToSlide(index) => {
                if let Some(carousel) = self.results_carousel() {
                    carousel.go_to_slide(index);
                }
            }
            Intent::PointerDown { x } => {
                if let Some(carousel) = self.results_carousel() {
                    carousel.pointer_down(x);
                }
            }
            Intent::PointerMove { x } => {
                if let Some(carousel) = self.results_carousel() {
                    carousel.pointer_move(x);
                }
            }
            Intent::PointerUp => self.release(false),
            Intent::PointerLeave => self.release(true),
        }
        false
    }

    /// Whether the host should deliver an animation frame soon
    pub fn wants_frame(&self) -> bool {
        self.carousel.as_ref().is_some_and(Carousel::wants_frame)
    }

    /// Deliver an animation frame to the carousel
    pub fn on_animation_frame(&mut self, now: Instant) -> bool {
        self.carousel
            .as_mut()
            .is_some_and(|c| c.on_animation_frame(now))
    }

    /// Update the slide width and re-settle the carousel
    pub fn relayout(&mut self, slide_width: f32) {
        if self.slide_width.get() == slide_width {
            return;
        }
        self.slide_width.set(slide_width);
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.relayout();
        }
    }

    /// Current slide width in pixels
    pub fn slide_width(&self) -> f32 {
        self.slide_width.get()
    }

    /// Snapshot for the renderer
    pub fn view(&self, now: Instant) -> ViewState<'_> {
        let step = match self.mode {
            AppMode::Question => self.session.as_ref().map(QuizSession::step_view),
            _ => None,
        };
        ViewState {
            mode: self.mode,
            step,
            products: self.results(),
            carousel: self.carousel.as_ref().map(Carousel::snapshot),
            settle_progress: self
                .carousel
                .as_ref()
                .map_or(1.0, |c| c.settle_progress(now)),
            status_message: &self.status_message,
            load_error: self.load_error.as_deref(),
            help_visible: self.help_visible,
        }
    }

    fn results_carousel(&mut self) -> Option<&mut Carousel<Product>> {
        match self.mode {
            AppMode::Results => self.carousel.as_mut(),
            _ => None,
        }
    }

    fn select_answer(&mut self, step: usize, answer: &str) {
        if self.mode != AppMode::Question {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.select_answer(step, answer) {
            Ok(()) => self.status_message = format!("Selected: {answer}"),
            Err(e) => {
                warn!(error = %e, "Answer rejected");
                self.status_message = e.to_string();
            }
        }
    }

    fn advance(&mut self) {
        if self.mode != AppMode::Question {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.advance() {
            Transition::Moved { to, .. } => {
                self.status_message = format!("Step {} of {}", to + 1, session.total_steps());
            }
            Transition::Completed(selections) => {
                let products = filter_catalog(&self.catalog, &selections);
                self.show_results(products);
            }
            Transition::Unchanged(reason) => {
                self.status_message = reason.to_string();
            }
        }
    }

    fn retreat(&mut self) {
        if self.mode != AppMode::Question {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Transition::Unchanged(reason) = session.retreat() {
            self.status_message = reason.to_string();
        }
    }

    fn navigate(&mut self, direction: Direction) {
        if let Some(carousel) = self.results_carousel() {
            carousel.navigate(direction);
        }
    }

    fn release(&mut self, left: bool) {
        let Some(carousel) = self.results_carousel() else {
            return;
        };
        let outcome = if left {
            carousel.pointer_leave()
        } else {
            carousel.pointer_up()
        };
        if let ReleaseOutcome::Moved(direction) = outcome {
            debug!(%direction, "Drag committed");
        }
    }

    fn show_results(&mut self, products: Vec<Product>) {
        if products.is_empty() {
            info!("Quiz completed with no matching products");
            self.carousel = None;
            self.mode = AppMode::NoResults;
            self.status_message = "No products match your answers".to_string();
            return;
        }

        info!(matches = products.len(), "Quiz completed");
        self.status_message = format!("{} products found", products.len());
        let mut carousel = Carousel::new(products, self.slide_width.clone(), self.carousel_config);
        carousel.relayout();
        self.carousel = Some(carousel);
        self.mode = AppMode::Results;
    }

    fn restart(&mut self) {
        if !matches!(self.mode, AppMode::Results | AppMode::NoResults | AppMode::Question) {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.restart();
        self.carousel = None;
        self.mode = AppMode::Question;
        self.status_message = "Quiz restarted".to_string();
        info!("Quiz restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;
    use crate::types::{Question, QuestionKind};

    fn dataset() -> Dataset {
        Dataset {
            questions: vec![
                Question::new("Who is it for?", QuestionKind::Text, &["Men", "Women"]),
                Question::new("Color?", QuestionKind::Color, &["siyah", "bej"]),
                Question::new("Budget?", QuestionKind::Text, &["0-500", "500-"]),
            ],
            catalog: Catalog::from_json(
                r#"[
                    {"name": "Coat", "gender": "Women", "colors": ["bej"], "price": 750},
                    {"name": "Shirt", "gender": "Men", "colors": ["siyah"], "price": 200}
                ]"#,
            )
            .unwrap(),
        }
    }

    fn app() -> QuizApp {
        QuizApp::with_dataset(CarouselConfig::default(), 320.0, dataset())
    }

    fn answer_all(app: &mut QuizApp, answers: &[&str]) {
        for (step, answer) in answers.iter().enumerate() {
            app.dispatch(Intent::SelectAnswer {
                step,
                answer: answer.to_string(),
            });
            app.dispatch(Intent::Advance);
        }
    }

    #[test]
    fn test_starts_loading() {
        let app = QuizApp::new(CarouselConfig::default(), 100.0);
        assert_eq!(app.mode(), AppMode::Loading);
        assert!(app.view(Instant::now()).step.is_none());
    }

    #[test]
    fn test_load_failure_is_terminal() {
        let mut app = QuizApp::new(CarouselConfig::default(), 100.0);
        app.on_loaded(Err(QuizError::data_load("offline")));
        assert_eq!(app.mode(), AppMode::LoadFailed);
        assert!(app.view(Instant::now()).load_error.unwrap().contains("offline"));

        app.dispatch(Intent::Restart);
        app.on_loaded(Ok(dataset()));
        assert_eq!(app.mode(), AppMode::LoadFailed);
        assert!(app.dispatch(Intent::Quit));
    }

    #[test]
    fn test_advance_requires_selection() {
        let mut app = app();
        app.dispatch(Intent::Advance);
        assert_eq!(app.session().unwrap().current_step(), 0);
        assert_eq!(app.status_message(), "no answer selected for the current step");
    }

    #[test]
    fn test_completion_builds_carousel() {
        let mut app = app();
        answer_all(&mut app, &["Women", "bej", "500-"]);

        assert_eq!(app.mode(), AppMode::Results);
        assert_eq!(app.results().len(), 1);
        assert_eq!(app.results()[0].display_name(), "Coat");
        assert_eq!(app.view(Instant::now()).carousel.unwrap().active_index, 0);
    }

    #[test]
    fn test_empty_result_shows_no_results() {
        let mut app = app();
        answer_all(&mut app, &["Men", "bej", "0-500"]);
        assert_eq!(app.mode(), AppMode::NoResults);
        assert!(app.carousel().is_none());
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut app = app();
        answer_all(&mut app, &["Women", "bej", "500-"]);
        app.dispatch(Intent::Restart);

        let session = app.session().unwrap();
        assert_eq!(app.mode(), AppMode::Question);
        assert_eq!(session.current_step(), 0);
        assert!(session.selections().is_empty());
        assert!(app.results().is_empty());
    }

    #[test]
    fn test_carousel_intents_ignored_outside_results() {
        let mut app = app();
        app.dispatch(Intent::PointerDown { x: 10.0 });
        app.dispatch(Intent::Navigate(Direction::Next));
        assert!(!app.wants_frame());
    }

    #[test]
    fn test_relayout_updates_offsets() {
        let mut app = QuizApp::with_dataset(
            CarouselConfig::default(),
            100.0,
            Dataset {
                catalog: Catalog::from(vec![
                    Product {
                        gender: Some("Women".into()),
                        colors: Some(vec!["bej".into()]),
                        price: Some(600.0),
                        ..Product::default()
                    };
                    3
                ]),
                ..dataset()
            },
        );
        answer_all(&mut app, &["Women", "bej", "500-"]);
        assert_eq!(app.results().len(), 3);

        app.dispatch(Intent::GoToSlide(2));
        app.relayout(50.0);
        let snapshot = app.carousel().unwrap().snapshot();
        assert_eq!(snapshot.committed_offset, -100.0);
        assert_eq!(snapshot.rendered_offset, -100.0);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        app.dispatch(Intent::ToggleHelp);
        assert!(app.help_visible());
        app.dispatch(Intent::ToggleHelp);
        assert!(!app.help_visible());
    }
}
