use crate::dto::common::{validate_description_len, validate_quiz};
use crate::models::quiz::QuizDocument;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload for creating a game around a quiz
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    /// Game's name
    #[validate(length(
        min = 1,
        max = 200,
        message = "Name is required and must be at most 200 characters"
    ))]
    pub name: String,

    /// Game's description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_description_len"))]
    pub description: Option<String>,

    /// Currency a player spends to enter
    pub required_currency: u32,

    /// The quiz document, embedded as a literal JSON array
    #[validate(custom(function = "validate_quiz"))]
    pub quiz: QuizDocument,
}

impl CreateGameRequest {
    pub fn new(name: impl Into<String>, required_currency: u32, quiz: QuizDocument) -> Self {
        Self {
            name: name.into(),
            description: None,
            required_currency,
            quiz,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
