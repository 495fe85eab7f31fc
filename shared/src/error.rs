use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::validation::ValidationIssue;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum QuizError {
    #[error("Quiz has {} validation error(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    #[error("Invalid quiz format: {0}")]
    Format(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("{what} index {index} is out of range (length {len})")]
    OutOfRange {
        what: String,
        index: usize,
        len: usize,
    },

    #[error("Quiz has no questions")]
    EmptyQuiz,

    #[error("Select at least one option before verifying")]
    NothingSelected,

    #[error("Answer is already revealed")]
    AnswerLocked,

    #[error("Cannot {action} while in the {phase} phase")]
    InvalidTransition { action: String, phase: String },

    #[error("Payload rejected: {0}")]
    InvalidPayload(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

impl QuizError {
    pub(crate) fn out_of_range(what: &str, index: usize, len: usize) -> Self {
        Self::OutOfRange {
            what: what.to_string(),
            index,
            len,
        }
    }

    /// Human-readable lines for display to the author.
    pub fn messages(&self) -> Vec<String> {
        match self {
            QuizError::Validation(issues) => issues.iter().map(|i| i.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }
}

impl From<JsonError> for QuizError {
    fn from(error: JsonError) -> Self {
        Self::Format(error.to_string())
    }
}

impl From<std::io::Error> for QuizError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<ValidationErrors> for QuizError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidPayload(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
