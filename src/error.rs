//! Error handling module for swipequiz
//!
//! Provides centralized error handling with proper error types using thiserror.
//! The core recovers locally from most bad input; the variants here are the
//! conditions that are reported to a caller instead of being absorbed.

use thiserror::Error;

/// Main error type for swipequiz
#[derive(Error, Debug)]
pub enum QuizError {
    /// Questions or products could not be obtained from cache or source
    #[error("Data load failure: {0}")]
    DataLoad(String),

    /// Answer is not one of the options declared for the step
    #[error("Invalid answer {answer:?} for step {step}")]
    InvalidAnswer { step: usize, answer: String },

    /// Step index does not exist in the question set
    #[error("Step {step} is out of range (quiz has {total} steps)")]
    StepOutOfRange { step: usize, total: usize },

    /// Product collection is not a sequence of product records
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for swipequiz operations
pub type Result<T> = std::result::Result<T, QuizError>;

impl QuizError {
    /// Create a data load error
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad(msg.into())
    }

    /// Create an invalid answer error
    pub fn invalid_answer(step: usize, answer: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            step,
            answer: answer.into(),
        }
    }

    /// Create a malformed catalog error
    pub fn malformed_catalog(msg: impl Into<String>) -> Self {
        Self::MalformedCatalog(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}
