use crate::models::quiz::QuizDocument;
use crate::validation::validate_document;
use serde::{Deserialize, Serialize};
use validator::ValidationError;

/// Common error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Identifier of a record the platform just created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedResponse {
    #[serde(alias = "_id")]
    pub id: String,
}

pub(crate) fn validate_description_len(text: &String) -> Result<(), ValidationError> {
    if text.len() > 4000 {
        let mut err = ValidationError::new("length");
        err.message = Some("Description must be at most 4000 characters".into());
        return Err(err);
    }
    Ok(())
}

/// A published quiz needs at least one question and no authoring issues
pub(crate) fn validate_quiz(quiz: &QuizDocument) -> Result<(), ValidationError> {
    if quiz.is_empty() {
        let mut err = ValidationError::new("quiz_empty");
        err.message = Some("Quiz must contain at least one question".into());
        return Err(err);
    }
    let issues = validate_document(quiz);
    if let Some(first) = issues.first() {
        let mut err = ValidationError::new("quiz_invalid");
        err.message = Some(format!("{} ({} issue(s) in total)", first, issues.len()).into());
        return Err(err);
    }
    Ok(())
}
