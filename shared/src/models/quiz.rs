use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Countdown budget given to a freshly added question, in seconds
pub const DEFAULT_QUESTION_TIME: i64 = 60;

/// Smallest accepted per-question time, in seconds
pub const MIN_QUESTION_TIME: i64 = 1;

/// A question never has fewer options than this through the editor
pub const MIN_OPTIONS: usize = 2;

/// File name used when a quiz document is exported
pub const EXPORT_FILE_NAME: &str = "quiz_data.json";

/// One selectable answer choice
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizOption {
    /// Text shown to the player
    pub text: String,

    /// Whether selecting this option is part of the correct answer
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

impl QuizOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// One quiz question with its ordered options and countdown budget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    /// The prompt
    pub question: String,

    /// Answer choices; order drives index-based answer matching
    pub options: Vec<QuizOption>,

    /// Countdown budget in seconds
    pub time: i64,
}

impl Default for Question {
    fn default() -> Self {
        Self {
            question: String::new(),
            options: vec![QuizOption::default(); MIN_OPTIONS],
            time: DEFAULT_QUESTION_TIME,
        }
    }
}

impl Question {
    pub fn new(question: impl Into<String>, options: Vec<QuizOption>, time: i64) -> Self {
        Self {
            question: question.into(),
            options,
            time,
        }
    }

    /// Indices of every option flagged correct
    pub fn correct_indices(&self) -> BTreeSet<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct)
            .map(|(index, _)| index)
            .collect()
    }

    /// Exact-match check: the selection must equal the correct set
    pub fn is_exact_match(&self, selected: &BTreeSet<usize>) -> bool {
        *selected == self.correct_indices()
    }
}

/// Ordered list of questions; the unit handed to file export, the
/// clipboard and game/event creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct QuizDocument {
    questions: Vec<Question>,
}

impl Default for QuizDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizDocument {
    /// A new quiz with a single default question
    pub fn new() -> Self {
        Self {
            questions: vec![Question::default()],
        }
    }

    pub fn empty() -> Self {
        Self {
            questions: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub(crate) fn questions_mut(&mut self) -> &mut Vec<Question> {
        &mut self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl From<Vec<Question>> for QuizDocument {
    fn from(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl<'a> IntoIterator for &'a QuizDocument {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
