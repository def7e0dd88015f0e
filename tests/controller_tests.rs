//! End-to-end tests for the quiz controller
//!
//! Drives [`QuizApp`] with the bundled sample data, both directly through
//! intents and through the terminal input layer with a `TestBackend`.

use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Terminal, backend::TestBackend};

use swipequiz::app::{AppMode, Intent, QuizApp};
use swipequiz::carousel::{CarouselConfig, DragPhase};
use swipequiz::components::keybindings::KeybindingContext;
use swipequiz::input::InputHandler;
use swipequiz::loader::{DataLoader, Dataset, DirectorySource, MemoryStore};
use swipequiz::types::Direction;
use swipequiz::ui::{HitMap, HitTarget, RenderContext, UiRenderer};

const CELL_PX: f32 = 8.0;

fn sample_dataset() -> Dataset {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    DataLoader::new(DirectorySource::new(dir), MemoryStore::new())
        .load()
        .unwrap()
}

fn loaded_app() -> QuizApp {
    let mut app = QuizApp::new(CarouselConfig::default(), 0.0);
    app.on_loaded(Ok(sample_dataset()));
    app
}

fn answer(app: &mut QuizApp, step: usize, label: &str) {
    app.dispatch(Intent::SelectAnswer {
        step,
        answer: label.to_string(),
    });
    app.dispatch(Intent::Advance);
}

fn result_names(app: &QuizApp) -> Vec<String> {
    app.results()
        .iter()
        .map(|p| p.display_name().to_string())
        .collect()
}

// =============================================================================
// Intent-Driven Flow
// =============================================================================

#[test]
fn test_full_flow_to_results() {
    let mut app = loaded_app();
    assert_eq!(app.mode(), AppMode::Question);

    answer(&mut app, 0, "Women");
    answer(&mut app, 1, "Bej");
    answer(&mut app, 2, "500-1000");

    assert_eq!(app.mode(), AppMode::Results);
    assert_eq!(result_names(&app), vec!["Knit Sweater", "Pleated Midi Skirt"]);
}

#[test]
fn test_back_then_change_answer() {
    let mut app = loaded_app();
    answer(&mut app, 0, "Kids");
    app.dispatch(Intent::Retreat);
    assert_eq!(app.session().unwrap().selection_for(0), Some("Kids"));

    answer(&mut app, 0, "Men");
    answer(&mut app, 1, "Siyah");
    answer(&mut app, 2, "2000-");
    assert_eq!(result_names(&app), vec!["Leather Boots"]);
}

#[test]
fn test_no_match_is_not_an_error() {
    let mut app = loaded_app();
    answer(&mut app, 0, "Kids");
    answer(&mut app, 1, "Mavi");
    answer(&mut app, 2, "2000-");

    assert_eq!(app.mode(), AppMode::NoResults);
    assert!(app.results().is_empty());
    assert!(app.view(Instant::now()).load_error.is_none());

    app.dispatch(Intent::Restart);
    assert_eq!(app.mode(), AppMode::Question);
    assert!(app.session().unwrap().selections().is_empty());
}

#[test]
fn test_swipe_through_results() {
    let mut app = loaded_app();
    app.relayout(320.0);
    answer(&mut app, 0, "Women");
    answer(&mut app, 1, "Bej");
    answer(&mut app, 2, "500-1000");

    app.dispatch(Intent::PointerDown { x: 400.0 });
    app.dispatch(Intent::PointerMove { x: 200.0 });
    app.dispatch(Intent::PointerUp);
    assert_eq!(app.carousel().unwrap().active_index(), 1);

    // Wraps back to the first slide
    app.dispatch(Intent::Navigate(Direction::Next));
    assert_eq!(app.carousel().unwrap().active_index(), 0);

    let mut now = Instant::now();
    let mut frames = 0;
    while app.wants_frame() && frames < 1000 {
        now += Duration::from_millis(16);
        app.on_animation_frame(now);
        frames += 1;
    }
    let carousel = app.carousel().unwrap();
    assert_eq!(carousel.phase(), DragPhase::Idle);
    assert_eq!(carousel.snapshot().rendered_offset, 0.0);
}

// =============================================================================
// Terminal Front End
// =============================================================================

struct Harness {
    app: QuizApp,
    input: InputHandler,
    keys: KeybindingContext,
    hits: HitMap,
    renderer: UiRenderer,
    terminal: Terminal<TestBackend>,
}

impl Harness {
    fn new() -> Self {
        Self {
            app: loaded_app(),
            input: InputHandler::new(CELL_PX),
            keys: KeybindingContext::new(),
            hits: HitMap::new(),
            renderer: UiRenderer::new(),
            terminal: Terminal::new(TestBackend::new(100, 30)).unwrap(),
        }
    }

    fn draw(&mut self) {
        let view = self.app.view(Instant::now());
        self.input.sync(&view);
        let ctx = RenderContext {
            keybindings: &self.keys,
            answer_cursor: self.input.answer_cursor(),
            cell_width_px: CELL_PX,
        };
        let renderer = &self.renderer;
        let hits = &mut self.hits;
        self.terminal
            .draw(|f| renderer.render(f, &view, &ctx, hits))
            .unwrap();
        if let Some(track) = self.hits.track() {
            self.app.relayout(f32::from(track.width) * CELL_PX);
        }
    }

    fn send(&mut self, event: Event) -> bool {
        let intent = {
            let view = self.app.view(Instant::now());
            self.input.handle_event(&event, &view, &self.keys, &self.hits)
        };
        let quit = intent.is_some_and(|intent| self.app.dispatch(intent));
        self.draw();
        quit
    }

    fn key(&mut self, code: KeyCode) -> bool {
        self.send(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        self.send(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    fn find(&self, target: &HitTarget) -> (u16, u16) {
        let area = self.terminal.backend().buffer().area;
        for row in area.top()..area.bottom() {
            for column in area.left()..area.right() {
                if self.hits.hit(column, row) == Some(target) {
                    return (column, row);
                }
            }
        }
        panic!("{target:?} not on screen");
    }

    fn screen(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }
}

#[test]
fn test_keyboard_walkthrough() {
    let mut h = Harness::new();
    h.draw();
    assert!(h.screen().contains("Who are you shopping for?"));

    h.key(KeyCode::Char('1'));
    h.key(KeyCode::Right);
    h.key(KeyCode::Down);
    h.key(KeyCode::Enter);
    h.key(KeyCode::Right);
    assert_eq!(h.app.session().unwrap().selection_for(1), Some("Bej"));

    h.key(KeyCode::Char('2'));
    h.key(KeyCode::Right);
    assert_eq!(h.app.mode(), AppMode::Results);
    assert!(h.screen().contains("Knit Sweater"));

    h.key(KeyCode::Right);
    assert_eq!(h.app.carousel().unwrap().active_index(), 1);
    assert!(h.key(KeyCode::Char('q')));
}

#[test]
fn test_mouse_clicks_and_drag() {
    let mut h = Harness::new();
    h.draw();

    let answers = [(0, "Women"), (1, "Bej"), (2, "500-1000")];
    for (step, label) in answers {
        let (col, row) = h.find(&HitTarget::Answer {
            step,
            answer: label.to_string(),
        });
        h.mouse(MouseEventKind::Down(MouseButton::Left), col, row);
        let (col, row) = h.find(&HitTarget::Next);
        h.mouse(MouseEventKind::Down(MouseButton::Left), col, row);
    }
    assert_eq!(h.app.mode(), AppMode::Results);

    let track = h.hits.track().expect("results draw a track");
    assert!(h.app.slide_width() > 0.0);

    // 20 columns at 8px is past the 100px threshold
    let row = track.y + 1;
    let start = track.x + track.width - 2;
    h.mouse(MouseEventKind::Down(MouseButton::Left), start, row);
    assert_eq!(h.app.carousel().unwrap().phase(), DragPhase::Dragging);
    h.mouse(MouseEventKind::Drag(MouseButton::Left), start - 20, row);
    h.mouse(MouseEventKind::Up(MouseButton::Left), start - 20, row);
    assert_eq!(h.app.carousel().unwrap().active_index(), 1);

    let (col, row) = h.find(&HitTarget::Indicator(0));
    h.mouse(MouseEventKind::Down(MouseButton::Left), col, row);
    assert_eq!(h.app.carousel().unwrap().active_index(), 0);

    let (col, row) = h.find(&HitTarget::Restart);
    h.mouse(MouseEventKind::Down(MouseButton::Left), col, row);
    assert_eq!(h.app.mode(), AppMode::Question);
}

#[test]
fn test_focus_lost_ends_drag() {
    let mut h = Harness::new();
    h.draw();
    h.key(KeyCode::Char('1'));
    h.key(KeyCode::Right);
    h.key(KeyCode::Char('2'));
    h.key(KeyCode::Right);
    h.key(KeyCode::Char('2'));
    h.key(KeyCode::Right);
    assert_eq!(h.app.mode(), AppMode::Results);

    let track = h.hits.track().unwrap();
    h.mouse(MouseEventKind::Down(MouseButton::Left), track.x + 10, track.y + 1);
    assert_eq!(h.app.carousel().unwrap().phase(), DragPhase::Dragging);

    h.send(Event::FocusLost);
    assert_ne!(h.app.carousel().unwrap().phase(), DragPhase::Dragging);
}
