//! Shared domain types for the quiz
//!
//! Question definitions and the small enums that the quiz, the filter and the
//! carousel agree on. String forms go through strum so that the CLI, the JSON
//! data and the UI all spell them the same way.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{QuizError, Result};

/// How the answers of a question are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QuestionKind {
    /// Answers rendered as labelled buttons
    #[default]
    Text,
    /// Answers are color tokens rendered as swatches
    Color,
}

/// Carousel navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "prev", serialize = "previous")]
    Prev,
    Next,
}

/// One predicate pass of the catalog filter.
///
/// Stages are bound to quiz steps by position: the selection recorded for
/// step `stage.step()` drives that stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FilterStage {
    Category = 0,
    Color = 1,
    Price = 2,
}

impl FilterStage {
    /// Quiz step whose selection feeds this stage
    #[inline]
    pub const fn step(self) -> usize {
        self as usize
    }

    /// Stages in the order they are applied
    pub fn in_order() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// One step of the quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    pub answers: Vec<String>,
}

impl Question {
    /// Create a question
    pub fn new(title: &str, kind: QuestionKind, answers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            kind,
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Whether `answer` is one of the declared options
    pub fn accepts(&self, answer: &str) -> bool {
        self.answers.iter().any(|a| a == answer)
    }

    /// Position of `answer` among the options
    pub fn answer_index(&self, answer: &str) -> Option<usize> {
        self.answers.iter().position(|a| a == answer)
    }
}

/// Accepted layouts of the questions document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionsDocument {
    /// `[{ "steps": [...] }]`
    Grouped(Vec<StepGroup>),
    /// `[...]`
    Flat(Vec<Question>),
}

#[derive(Debug, Deserialize)]
struct StepGroup {
    steps: Vec<Question>,
}

/// Parse the questions document into an ordered list of steps.
///
/// Both the grouped layout (first group's `steps`) and a flat array of steps
/// are accepted. An empty step list is rejected.
pub fn parse_questions(json: &str) -> Result<Vec<Question>> {
    let document: QuestionsDocument = serde_json::from_str(json)?;
    let steps = match document {
        QuestionsDocument::Grouped(groups) => groups
            .into_iter()
            .next()
            .map(|group| group.steps)
            .unwrap_or_default(),
        QuestionsDocument::Flat(steps) => steps,
    };

    if steps.is_empty() {
        return Err(QuizError::data_load("questions document contains no steps"));
    }
    Ok(steps)
}
