//! Quiz State Machine
//!
//! Owns the current step and the per-step answer selections of one quiz
//! session. Steps are walked in order; the `Next` action after the last step
//! moves the session into the terminal completed state and hands the
//! collected selections to the caller, which runs the catalog filter.
//!
//! # Step Flow
//!
//! ```text
//! Step(0) <-> Step(1) <-> ... <-> Step(n-1)
//!                                    |
//!                                    v  advance() with a selection
//!                                Completed
//! ```
//!
//! # Invariants
//!
//! - At most one selection per step; re-selecting overwrites
//! - Selections survive back/forward navigation within the session
//! - `advance()` without a selection for the current step changes nothing
//! - `retreat()` at step 0 changes nothing
//! - Completion is reported exactly once; `restart()` destroys the session data

use std::collections::BTreeMap;

use serde::Serialize;
use strum::Display;
use tracing::{debug, info, warn};

use crate::error::{QuizError, Result};
use crate::swatch::{Swatch, swatch_for};
use crate::types::{Question, QuestionKind};

/// Answer recorded per step index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selections(BTreeMap<usize, String>);

impl Selections {
    /// Selection recorded for `step`
    pub fn get(&self, step: usize) -> Option<&str> {
        self.0.get(&step).map(String::as_str)
    }

    /// Record `answer` for `step`, returning the answer it replaced
    pub fn insert(&mut self, step: usize, answer: String) -> Option<String> {
        self.0.insert(step, answer)
    }

    pub fn contains(&self, step: usize) -> bool {
        self.0.contains_key(&step)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selections in step order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(step, answer)| (*step, answer.as_str()))
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(usize, String)> for Selections {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Why a navigation request left the session unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NoopReason {
    #[strum(to_string = "no answer selected for the current step")]
    NoSelection,
    #[strum(to_string = "already at the first step")]
    FirstStep,
    #[strum(to_string = "quiz already completed")]
    AlreadyCompleted,
}

/// Result of `advance()` / `retreat()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved between two steps
    Moved { from: usize, to: usize },
    /// Left the last step; carries the full selection map
    Completed(Selections),
    /// Nothing changed
    Unchanged(NoopReason),
}

/// One answer option as the renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerView {
    pub label: String,
    pub selected: bool,
    /// Present for color-typed questions
    pub swatch: Option<Swatch>,
}

/// Render payload for the current step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub kind: QuestionKind,
    pub answers: Vec<AnswerView>,
    /// Indicator `i` is lit iff `i <= index`
    pub progress: Vec<bool>,
    pub back_enabled: bool,
    pub next_enabled: bool,
    pub is_last: bool,
}

/// One quiz session over a fixed question list.
///
/// # Example
///
/// ```
/// use swipequiz::quiz::{QuizSession, Transition};
/// use swipequiz::types::{Question, QuestionKind};
///
/// let mut quiz = QuizSession::new(vec![
///     Question::new("Gender?", QuestionKind::Text, &["Men", "Women"]),
/// ])
/// .unwrap();
///
/// // Nothing selected yet, so Next does nothing
/// assert!(matches!(quiz.advance(), Transition::Unchanged(_)));
///
/// quiz.select_answer(0, "Men").unwrap();
/// assert!(matches!(quiz.advance(), Transition::Completed(_)));
/// assert!(quiz.is_completed());
/// ```
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_step: usize,
    selections: Selections,
    completed: bool,
}

impl QuizSession {
    /// Start a session at step 0 with no selections.
    ///
    /// # Errors
    ///
    /// `DataLoad` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::data_load("quiz needs at least one question"));
        }
        Ok(Self {
            questions,
            current_step: 0,
            selections: Selections::default(),
            completed: false,
        })
    }

    #[inline]
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    #[inline]
    pub fn total_steps(&self) -> usize {
        self.questions.len()
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[inline]
    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 == self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_step]
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Selection recorded for `step`
    pub fn selection_for(&self, step: usize) -> Option<&str> {
        self.selections.get(step)
    }

    /// Whether Next is available (current step has a selection)
    pub fn can_advance(&self) -> bool {
        !self.completed && self.selections.contains(self.current_step)
    }

    /// Whether Back is available
    pub fn can_retreat(&self) -> bool {
        !self.completed && self.current_step > 0
    }

    /// Record `answer` for `step`, replacing any earlier selection.
    ///
    /// # Errors
    ///
    /// - `StepOutOfRange` if `step` does not exist
    /// - `InvalidAnswer` if `answer` is not an option of that step
    ///
    /// Either error leaves the session untouched.
    pub fn select_answer(&mut self, step: usize, answer: &str) -> Result<()> {
        let question = self.questions.get(step).ok_or(QuizError::StepOutOfRange {
            step,
            total: self.questions.len(),
        })?;

        if !question.accepts(answer) {
            warn!(step, answer, "Rejected answer not offered by the question");
            return Err(QuizError::invalid_answer(step, answer));
        }

        if self.completed {
            debug!(step, "Ignoring selection on a completed quiz");
            return Ok(());
        }

        let previous = self.selections.insert(step, answer.to_string());
        debug!(step, answer, ?previous, "Recorded selection");
        Ok(())
    }

    /// Record `answer` for the current step
    pub fn select_current(&mut self, answer: &str) -> Result<()> {
        self.select_answer(self.current_step, answer)
    }

    /// Move forward one step, or complete the quiz from the last step.
    pub fn advance(&mut self) -> Transition {
        if self.completed {
            return Transition::Unchanged(NoopReason::AlreadyCompleted);
        }
        if !self.selections.contains(self.current_step) {
            debug!(step = self.current_step, "Advance ignored, no selection");
            return Transition::Unchanged(NoopReason::NoSelection);
        }

        if self.is_last_step() {
            self.completed = true;
            info!(
                steps = self.questions.len(),
                answered = self.selections.len(),
                "Quiz completed"
            );
            return Transition::Completed(self.selections.clone());
        }

        let from = self.current_step;
        self.current_step += 1;
        debug!(from, to = self.current_step, "Advanced step");
        Transition::Moved {
            from,
            to: self.current_step,
        }
    }

    /// Move back one step.
    pub fn retreat(&mut self) -> Transition {
        if self.completed {
            return Transition::Unchanged(NoopReason::AlreadyCompleted);
        }
        if self.current_step == 0 {
            return Transition::Unchanged(NoopReason::FirstStep);
        }

        let from = self.current_step;
        self.current_step -= 1;
        debug!(from, to = self.current_step, "Retreated step");
        Transition::Moved {
            from,
            to: self.current_step,
        }
    }

    /// Discard all session data and return to step 0.
    pub fn restart(&mut self) {
        info!("Quiz restarted");
        self.current_step = 0;
        self.selections.clear();
        self.completed = false;
    }

    /// Render payload for the current step, with any earlier selection
    /// restored as highlighted.
    pub fn step_view(&self) -> StepView {
        let question = self.current_question();
        let selected = self.selections.get(self.current_step);
        let is_color = question.kind == QuestionKind::Color;

        let answers = question
            .answers
            .iter()
            .map(|answer| AnswerView {
                label: answer.clone(),
                selected: selected == Some(answer.as_str()),
                swatch: is_color.then(|| swatch_for(answer)),
            })
            .collect();

        StepView {
            index: self.current_step,
            total: self.questions.len(),
            title: question.title.clone(),
            kind: question.kind,
            answers,
            progress: (0..self.questions.len())
                .map(|i| i <= self.current_step)
                .collect(),
            back_enabled: self.can_retreat(),
            next_enabled: self.can_advance(),
            is_last: self.is_last_step(),
        }
    }
}
