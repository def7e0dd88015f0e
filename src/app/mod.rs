//! Application module
//!
//! Contains the terminal event loop and the headless quiz controller.
//!
//! # Module Structure
//! - `state` - Screen modes, intents and the renderer view
//! - `controller` - [`QuizApp`], the terminal-independent controller
//! - Main module - [`App`], which wires the controller to crossterm and ratatui

mod controller;
mod state;

pub use controller::QuizApp;
pub use state::{AppMode, Intent, ViewState};

use crate::components::keybindings::KeybindingContext;
use crate::config::AppConfig;
use crate::error::{QuizError, Result};
use crate::input::InputHandler;
use crate::loader::{DataLoader, Dataset};
use crate::ui::{HitMap, RenderContext, UiRenderer};
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Poll timeout while an animation frame is pending (about 60 fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll timeout when nothing is animating
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Main application struct
pub struct App {
    quiz: QuizApp,
    ui_renderer: UiRenderer,
    input_handler: InputHandler,
    keybinding_context: KeybindingContext,
    /// Clickable regions of the last drawn frame
    hits: HitMap,
    /// Receives the data load outcome from the worker thread
    load_rx: Option<Receiver<Result<Dataset>>>,
}

impl App {
    /// Create the application and start loading data on a worker thread
    pub fn new(config: &AppConfig, loader: DataLoader) -> Self {
        info!("Creating new App instance");
        let (load_tx, load_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut loader = loader;
            let outcome = loader.load();
            if load_tx.send(outcome).is_err() {
                debug!("App exited before data finished loading");
            }
        });

        Self {
            quiz: QuizApp::new(config.carousel(), 0.0),
            ui_renderer: UiRenderer::new(),
            input_handler: InputHandler::new(config.cell_width_px),
            keybinding_context: KeybindingContext::new(),
            hits: HitMap::new(),
            load_rx: Some(load_rx),
        }
    }

    /// Headless controller behind the terminal
    pub fn quiz(&self) -> &QuizApp {
        &self.quiz
    }

    /// Check whether the worker thread finished loading
    fn poll_loader(&mut self) {
        let Some(rx) = &self.load_rx else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                warn!("Loader thread exited without a result");
                Err(QuizError::data_load("loader thread exited unexpectedly"))
            }
        };
        self.load_rx = None;
        self.quiz.on_loaded(outcome);
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.poll_loader();

            let now = Instant::now();
            if self.quiz.wants_frame() {
                self.quiz.on_animation_frame(now);
            }

            self.draw(terminal, now)?;

            let timeout = if self.quiz.wants_frame() || self.load_rx.is_some() {
                FRAME_INTERVAL
            } else {
                IDLE_POLL
            };
            if !event::poll(timeout)? {
                continue;
            }

            let event = event::read()?;
            if let Event::Resize(width, height) = event {
                debug!(width, height, "Terminal resized");
                // The track is re-measured after the next draw
                continue;
            }

            let intent = {
                let view = self.quiz.view(Instant::now());
                self.input_handler
                    .handle_event(&event, &view, &self.keybinding_context, &self.hits)
            };
            if let Some(intent) = intent {
                if self.quiz.dispatch(intent) {
                    info!("Quit requested");
                    break;
                }
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>, now: Instant) -> Result<()> {
        let view = self.quiz.view(now);
        self.input_handler.sync(&view);

        let ctx = RenderContext {
            keybindings: &self.keybinding_context,
            answer_cursor: self.input_handler.answer_cursor(),
            cell_width_px: self.input_handler.cell_width_px(),
        };
        let renderer = &self.ui_renderer;
        let hits = &mut self.hits;
        terminal.draw(|f| renderer.render(f, &view, &ctx, hits))?;

        // Slides are exactly one track wide
        if let Some(track) = self.hits.track() {
            let width = f32::from(track.width) * self.input_handler.cell_width_px();
            self.quiz.relayout(width);
        }
        Ok(())
    }
}
