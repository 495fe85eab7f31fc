use crate::dto::common::{validate_description_len, validate_quiz};
use crate::models::quiz::QuizDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Payload for creating a time-boxed event around a quiz
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_event_window"))]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Name is required and must be at most 200 characters"
    ))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_description_len"))]
    pub description: Option<String>,

    /// Sponsor backing the event, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor_id: Option<String>,

    pub starts_at: DateTime<Utc>,

    pub ends_at: DateTime<Utc>,

    pub required_currency: u32,

    #[validate(custom(function = "validate_quiz"))]
    pub quiz: QuizDocument,
}

impl CreateEventRequest {
    pub fn new(
        name: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        required_currency: u32,
        quiz: QuizDocument,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            sponsor_id: None,
            starts_at,
            ends_at,
            required_currency,
            quiz,
        }
    }

    pub fn with_sponsor(mut self, sponsor_id: impl Into<String>) -> Self {
        self.sponsor_id = Some(sponsor_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn validate_event_window(request: &CreateEventRequest) -> Result<(), ValidationError> {
    if request.ends_at <= request.starts_at {
        let mut err = ValidationError::new("event_window");
        err.message = Some("Event must end after it starts".into());
        return Err(err);
    }
    Ok(())
}
