use log::{debug, info, warn};
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::{QuizError, Result};
use crate::models::quiz::{
    Question, QuizDocument, QuizOption, EXPORT_FILE_NAME, MIN_OPTIONS, MIN_QUESTION_TIME,
};
use crate::validation::{validate_document, ValidationIssue};

/// Change to a question's own fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionUpdate {
    Text(String),
    /// Seconds; values below 1 are clamped to 1
    Time(i64),
}

impl QuestionUpdate {
    /// Builds a time update from raw author input. The leading integer is
    /// used ("12s" is 12, "2.5" is 2); input without one becomes 1.
    pub fn time_from_input(input: &str) -> Self {
        let seconds = leading_integer(input).unwrap_or(MIN_QUESTION_TIME);
        QuestionUpdate::Time(seconds.max(MIN_QUESTION_TIME))
    }
}

fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let digits_from = usize::from(trimmed.starts_with(['+', '-']));
    let end = trimmed[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |offset| digits_from + offset);
    match trimmed[..end].parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(i64::MAX),
        Err(_) => None,
    }
}

/// Change to a single option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionUpdate {
    Text(String),
    Correct(bool),
}

/// In-memory quiz editor. Every mutation either applies fully or leaves the
/// document untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizEditor {
    document: QuizDocument,
}

impl QuizEditor {
    pub fn new() -> Self {
        Self {
            document: QuizDocument::new(),
        }
    }

    pub fn with_document(document: QuizDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &QuizDocument {
        &self.document
    }

    pub fn into_document(self) -> QuizDocument {
        self.document
    }

    /// Appends a default question and returns its index
    pub fn add_question(&mut self) -> usize {
        self.document.questions_mut().push(Question::default());
        let index = self.document.len() - 1;
        debug!("Added question {}", index);
        index
    }

    /// Removes a question. The document may become empty.
    pub fn remove_question(&mut self, index: usize) -> Result<Question> {
        let len = self.document.len();
        if index >= len {
            warn!("Ignoring removal of question {} (document has {})", index, len);
            return Err(QuizError::out_of_range("question", index, len));
        }
        let removed = self.document.questions_mut().remove(index);
        debug!("Removed question {}", index);
        Ok(removed)
    }

    pub fn update_question(&mut self, index: usize, update: QuestionUpdate) -> Result<()> {
        let question = self.question_mut(index)?;
        match update {
            QuestionUpdate::Text(text) => question.question = text,
            QuestionUpdate::Time(seconds) => question.time = seconds.max(MIN_QUESTION_TIME),
        }
        debug!("Updated question {}", index);
        Ok(())
    }

    /// Appends a blank, incorrect option and returns its index
    pub fn add_option(&mut self, question_index: usize) -> Result<usize> {
        let question = self.question_mut(question_index)?;
        question.options.push(QuizOption::default());
        let option_index = question.options.len() - 1;
        debug!("Added option {} to question {}", option_index, question_index);
        Ok(option_index)
    }

    /// Removes an option, refusing to go below the two-option floor
    pub fn remove_option(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<QuizOption> {
        let question = self.question_mut(question_index)?;
        let len = question.options.len();
        if option_index >= len {
            warn!(
                "Ignoring removal of option {} on question {} (has {})",
                option_index, question_index, len
            );
            return Err(QuizError::out_of_range("option", option_index, len));
        }
        if len <= MIN_OPTIONS {
            warn!(
                "Refusing to remove option {} on question {}: {} options is the minimum",
                option_index, question_index, MIN_OPTIONS
            );
            return Err(QuizError::InvariantViolation(format!(
                "question {} must keep at least {} options",
                question_index + 1,
                MIN_OPTIONS
            )));
        }
        let removed = question.options.remove(option_index);
        debug!("Removed option {} from question {}", option_index, question_index);
        Ok(removed)
    }

    pub fn update_option(
        &mut self,
        question_index: usize,
        option_index: usize,
        update: OptionUpdate,
    ) -> Result<()> {
        let question = self.question_mut(question_index)?;
        let len = question.options.len();
        let option = question.options.get_mut(option_index).ok_or_else(|| {
            warn!(
                "Ignoring update of option {} on question {} (has {})",
                option_index, question_index, len
            );
            QuizError::out_of_range("option", option_index, len)
        })?;
        match update {
            OptionUpdate::Text(text) => option.text = text,
            OptionUpdate::Correct(is_correct) => option.is_correct = is_correct,
        }
        debug!("Updated option {} on question {}", option_index, question_index);
        Ok(())
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_document(&self.document)
    }

    /// Canonical JSON text, refused while any validation issue remains
    pub fn serialize(&self) -> Result<String> {
        let issues = self.validate();
        if !issues.is_empty() {
            warn!("Serialization refused: {} validation issue(s)", issues.len());
            return Err(QuizError::Validation(issues));
        }
        codec::to_json(&self.document)
    }

    /// Text placed on the system clipboard
    pub fn clipboard_text(&self) -> Result<String> {
        self.serialize()
    }

    /// Replaces the document wholesale. On failure the current document is kept.
    pub fn deserialize(&mut self, text: &str) -> Result<()> {
        let document = codec::from_json(text).map_err(Self::log_import_failure)?;
        self.replace(document);
        Ok(())
    }

    /// Writes the serialized quiz as `quiz_data.json` inside `dir`
    pub fn export_to_file(&self, dir: &Path) -> Result<PathBuf> {
        let text = self.serialize()?;
        let path = dir.join(EXPORT_FILE_NAME);
        std::fs::write(&path, text)?;
        info!("Exported quiz to {}", path.display());
        Ok(path)
    }

    /// Replaces the document from raw file contents
    pub fn import_from_file(&mut self, contents: &[u8]) -> Result<()> {
        let document = codec::from_bytes(contents).map_err(Self::log_import_failure)?;
        self.replace(document);
        Ok(())
    }

    pub fn import_from_path(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read(path)?;
        self.import_from_file(&contents)
    }

    fn replace(&mut self, document: QuizDocument) {
        info!("Imported quiz with {} question(s)", document.len());
        self.document = document;
    }

    fn log_import_failure(error: QuizError) -> QuizError {
        warn!("Import failed, keeping current document: {}", error);
        error
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut Question> {
        let len = self.document.len();
        self.document.questions_mut().get_mut(index).ok_or_else(|| {
            warn!("Question {} does not exist (document has {})", index, len);
            QuizError::out_of_range("question", index, len)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn filled_editor() -> QuizEditor {
        let mut editor = QuizEditor::new();
        editor.update_question(0, QuestionUpdate::Text("2 + 2?".into())).unwrap();
        editor.update_option(0, 0, OptionUpdate::Text("4".into())).unwrap();
        editor.update_option(0, 0, OptionUpdate::Correct(true)).unwrap();
        editor.update_option(0, 1, OptionUpdate::Text("5".into())).unwrap();
        editor
    }

    #[test_log::test]
    fn test_add_question_appends_default_shape() {
        let mut editor = QuizEditor::new();
        let index = editor.add_question();
        assert_eq!(index, 1);
        assert_eq!(editor.document().questions()[1], Question::default());
    }

    #[test_log::test]
    fn test_remove_question_can_empty_document() {
        let mut editor = QuizEditor::new();
        editor.remove_question(0).unwrap();
        assert!(editor.document().is_empty());
        assert!(editor.validate().is_empty());
    }

    #[test_log::test]
    fn test_remove_question_out_of_range_is_noop() {
        let mut editor = filled_editor();
        let before = editor.clone();
        let err = editor.remove_question(3).unwrap_err();
        assert!(matches!(err, QuizError::OutOfRange { index: 3, len: 1, .. }));
        assert_eq!(editor, before);
    }

    #[rstest]
    #[case("45", 45)]
    #[case(" 12 ", 12)]
    #[case("0", 1)]
    #[case("-7", 1)]
    #[case("abc", 1)]
    #[case("", 1)]
    #[case("2.5", 2)]
    #[case("12abc", 12)]
    #[case("+30", 30)]
    #[case("-", 1)]
    #[case("s12", 1)]
    #[case("99999999999999999999", i64::MAX)]
    fn test_time_input_is_coerced(#[case] input: &str, #[case] expected: i64) {
        let mut editor = QuizEditor::new();
        editor.update_question(0, QuestionUpdate::time_from_input(input)).unwrap();
        assert_eq!(editor.document().questions()[0].time, expected);
    }

    #[test_log::test]
    fn test_time_update_is_clamped() {
        let mut editor = QuizEditor::new();
        editor.update_question(0, QuestionUpdate::Time(-30)).unwrap();
        assert_eq!(editor.document().questions()[0].time, 1);
    }

    #[test_log::test]
    fn test_add_option_appends_blank_incorrect() {
        let mut editor = QuizEditor::new();
        let index = editor.add_option(0).unwrap();
        assert_eq!(index, 2);
        assert_eq!(editor.document().questions()[0].options[2], QuizOption::default());
    }

    #[test_log::test]
    fn test_remove_option_keeps_two_option_floor() {
        let mut editor = QuizEditor::new();
        let err = editor.remove_option(0, 1).unwrap_err();
        assert!(matches!(err, QuizError::InvariantViolation(_)));
        assert_eq!(editor.document().questions()[0].options.len(), 2);

        editor.add_option(0).unwrap();
        editor.update_option(0, 2, OptionUpdate::Text("third".into())).unwrap();
        let removed = editor.remove_option(0, 2).unwrap();
        assert_eq!(removed.text, "third");
        assert_eq!(editor.document().questions()[0].options.len(), 2);
    }

    #[test_log::test]
    fn test_multiple_correct_options_allowed() {
        let mut editor = filled_editor();
        editor.update_option(0, 1, OptionUpdate::Correct(true)).unwrap();
        assert_eq!(editor.document().questions()[0].correct_indices().len(), 2);
        assert!(editor.validate().is_empty());
    }

    #[test_log::test]
    fn test_update_option_out_of_range() {
        let mut editor = QuizEditor::new();
        let err = editor.update_option(0, 9, OptionUpdate::Correct(true)).unwrap_err();
        assert!(matches!(err, QuizError::OutOfRange { index: 9, len: 2, .. }));
        let err = editor.add_option(4).unwrap_err();
        assert!(matches!(err, QuizError::OutOfRange { index: 4, len: 1, .. }));
    }

    #[test_log::test]
    fn test_serialize_refused_with_issue_list() {
        let editor = QuizEditor::new();
        match editor.serialize().unwrap_err() {
            QuizError::Validation(issues) => assert_eq!(issues.len(), 4),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test_log::test]
    fn test_serialize_then_deserialize_round_trips() {
        let editor = filled_editor();
        let text = editor.serialize().unwrap();

        let mut other = QuizEditor::new();
        other.deserialize(&text).unwrap();
        assert_eq!(other.document(), editor.document());
        assert_eq!(editor.clipboard_text().unwrap(), text);
    }

    #[test_log::test]
    fn test_malformed_import_keeps_document() {
        let mut editor = filled_editor();
        let before = editor.serialize().unwrap();

        let err = editor.import_from_file(b"[{\"question\": ").unwrap_err();
        assert!(matches!(err, QuizError::Format(_)));
        assert_eq!(err.messages().len(), 1);
        assert_eq!(editor.serialize().unwrap(), before);
    }

    #[test_log::test]
    fn test_export_and_import_through_file() {
        let dir = std::env::temp_dir().join(format!("quiz-editor-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let editor = filled_editor();
        let path = editor.export_to_file(&dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "quiz_data.json");

        let mut imported = QuizEditor::with_document(QuizDocument::empty());
        imported.import_from_path(&path).unwrap();
        assert_eq!(imported.document(), editor.document());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test_log::test]
    fn test_export_refused_when_invalid() {
        let editor = QuizEditor::new();
        let dir = std::env::temp_dir();
        assert!(matches!(
            editor.export_to_file(&dir),
            Err(QuizError::Validation(_))
        ));
    }
}
