pub mod models {
    pub mod quiz;
}

pub mod dto {
    pub mod common;
    pub mod event;
    pub mod game;
}

pub mod codec;
pub mod countdown;
pub mod editor;
pub mod error;
pub mod platform;
pub mod simulation;
pub mod validation;

// Re-export commonly used items
pub use error::{QuizError, Result};

// Re-export models
pub use models::quiz::{
    Question, QuizDocument, QuizOption, DEFAULT_QUESTION_TIME, EXPORT_FILE_NAME, MIN_OPTIONS,
    MIN_QUESTION_TIME,
};

pub use countdown::Countdown;
pub use editor::{OptionUpdate, QuestionUpdate, QuizEditor};
pub use platform::{publish_event, publish_game, AuthToken, PlatformClient};
pub use simulation::{OptionReveal, Phase, QuizMeta, QuizOutcome, Simulation};
pub use validation::{validate_document, ValidationIssue};

// Re-export DTOs
pub use dto::{
    common::{CreatedResponse, ErrorResponse},
    event::CreateEventRequest,
    game::CreateGameRequest,
};
