//! Canonical JSON text form of a quiz document.
//!
//! The wire shape is a bare array of question objects:
//!
//! ```json
//! [
//!   {
//!     "question": "Capital of France?",
//!     "options": [
//!       { "text": "Paris", "isCorrect": true },
//!       { "text": "Rome", "isCorrect": false }
//!     ],
//!     "time": 30
//!   }
//! ]
//! ```
//!
//! These functions only handle the text form. Authoring rules are checked by
//! [`crate::editor::QuizEditor::serialize`] before anything is written out.

use crate::error::{QuizError, Result};
use crate::models::quiz::QuizDocument;

/// Pretty-printed JSON with two-space indentation
pub fn to_json(document: &QuizDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Parses JSON text; fails on invalid JSON or a shape mismatch
pub fn from_json(text: &str) -> Result<QuizDocument> {
    Ok(serde_json::from_str(text)?)
}

/// Decodes raw file contents as UTF-8 before parsing
pub fn from_bytes(contents: &[u8]) -> Result<QuizDocument> {
    let text = std::str::from_utf8(contents)
        .map_err(|e| QuizError::Format(format!("file is not valid UTF-8: {}", e)))?;
    from_json(text)
}
