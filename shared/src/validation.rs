use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::quiz::{Question, QuizDocument, MIN_OPTIONS, MIN_QUESTION_TIME};

/// One violated authoring rule. Indices are 0-based; messages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingQuestionText { question: usize },
    TooFewOptions { question: usize, count: usize },
    MissingOptionText { question: usize, option: usize },
    NoCorrectOption { question: usize },
    InvalidTime { question: usize, time: i64 },
}

impl ValidationIssue {
    /// Index of the question the issue belongs to
    pub fn question(&self) -> usize {
        match self {
            ValidationIssue::MissingQuestionText { question }
            | ValidationIssue::TooFewOptions { question, .. }
            | ValidationIssue::MissingOptionText { question, .. }
            | ValidationIssue::NoCorrectOption { question }
            | ValidationIssue::InvalidTime { question, .. } => *question,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingQuestionText { question } => {
                write!(f, "Question {}: question text is required", question + 1)
            }
            ValidationIssue::TooFewOptions { question, count } => write!(
                f,
                "Question {}: at least {} options are required (found {})",
                question + 1,
                MIN_OPTIONS,
                count
            ),
            ValidationIssue::MissingOptionText { question, option } => write!(
                f,
                "Question {}, option {}: option text is required",
                question + 1,
                option + 1
            ),
            ValidationIssue::NoCorrectOption { question } => {
                write!(f, "Question {}: mark at least one option as correct", question + 1)
            }
            ValidationIssue::InvalidTime { question, time } => write!(
                f,
                "Question {}: time must be at least {} second (got {})",
                question + 1,
                MIN_QUESTION_TIME,
                time
            ),
        }
    }
}

/// Rules for a single question, in reporting order.
pub fn validate_question(index: usize, question: &Question) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if question.question.trim().is_empty() {
        issues.push(ValidationIssue::MissingQuestionText { question: index });
    }

    if question.options.len() < MIN_OPTIONS {
        issues.push(ValidationIssue::TooFewOptions {
            question: index,
            count: question.options.len(),
        });
    }

    for (option, choice) in question.options.iter().enumerate() {
        if choice.text.trim().is_empty() {
            issues.push(ValidationIssue::MissingOptionText {
                question: index,
                option,
            });
        }
    }

    if !question.options.iter().any(|o| o.is_correct) {
        issues.push(ValidationIssue::NoCorrectOption { question: index });
    }

    if question.time < MIN_QUESTION_TIME {
        issues.push(ValidationIssue::InvalidTime {
            question: index,
            time: question.time,
        });
    }

    issues
}

/// Every violated rule across the whole document. An empty document has none.
pub fn validate_document(document: &QuizDocument) -> Vec<ValidationIssue> {
    document
        .iter()
        .enumerate()
        .flat_map(|(index, question)| validate_question(index, question))
        .collect()
}
