use crate::cli::EditAction;
use crate::commands::{
    apply_edit, check_quiz, edit_quiz, export_quiz, new_quiz, open_quiz, preview_quiz,
};
use pretty_assertions::assert_eq;
use shared::{QuizEditor, QuizMeta};
use std::path::PathBuf;
use test_log::test;

struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("quizctl-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn author_valid_quiz(path: &PathBuf) {
    let mut out = Vec::new();
    let steps = vec![
        EditAction::SetText { question: 1, text: "Capital of Peru?".into() },
        EditAction::SetTime { question: 1, seconds: "20".into() },
        EditAction::SetOption { question: 1, option: 1, text: "Lima".into() },
        EditAction::SetOption { question: 1, option: 2, text: "Cusco".into() },
        EditAction::Mark { question: 1, option: 1 },
    ];
    for step in steps {
        edit_quiz(path, step, &mut out).unwrap();
    }
    let output = String::from_utf8(out).unwrap();
    assert!(output.trim_end().ends_with("Quiz is valid."));
}

#[test]
fn test_new_then_edit_to_valid_quiz() {
    let scratch = Scratch::new("edit");
    let path = scratch.path("draft.json");

    let mut out = Vec::new();
    new_quiz(&path, false, &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Question 1: question text is required"));
    assert!(new_quiz(&path, false, &mut Vec::new()).is_err());

    author_valid_quiz(&path);

    let editor = open_quiz(&path).unwrap();
    let question = &editor.document().questions()[0];
    assert_eq!(question.question, "Capital of Peru?");
    assert_eq!(question.time, 20);
    assert!(question.options[0].is_correct);
}

#[test]
fn test_check_reports_issues() {
    let scratch = Scratch::new("check");
    let path = scratch.path("draft.json");
    new_quiz(&path, false, &mut Vec::new()).unwrap();

    let mut out = Vec::new();
    let err = check_quiz(&path, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "4 validation issue(s) found");
    assert_eq!(String::from_utf8(out).unwrap().matches("  - ").count(), 4);
}

#[test]
fn test_export_writes_fixed_file_name() {
    let scratch = Scratch::new("export");
    let path = scratch.path("draft.json");
    new_quiz(&path, false, &mut Vec::new()).unwrap();

    assert!(export_quiz(&path, &scratch.dir, false, &mut Vec::new()).is_err());
    assert!(!scratch.path("quiz_data.json").exists());

    author_valid_quiz(&path);
    let mut out = Vec::new();
    export_quiz(&path, &scratch.dir, false, &mut out).unwrap();
    assert!(scratch.path("quiz_data.json").exists());

    let mut printed = Vec::new();
    export_quiz(&path, &scratch.dir, true, &mut printed).unwrap();
    let exported = std::fs::read_to_string(scratch.path("quiz_data.json")).unwrap();
    assert_eq!(String::from_utf8(printed).unwrap().trim_end(), exported);
}

#[test]
fn test_edit_rejects_zero_based_numbers() {
    let mut editor = QuizEditor::new();
    assert!(apply_edit(&mut editor, EditAction::RemoveQuestion { question: 0 }).is_err());
    assert_eq!(editor.document().len(), 1);
}

#[test]
fn test_edit_keeps_option_floor() {
    let mut editor = QuizEditor::new();
    let remove_first = EditAction::RemoveOption { question: 1, option: 1 };
    let err = apply_edit(&mut editor, remove_first).unwrap_err();
    assert!(err.to_string().contains("at least 2 options"));

    apply_edit(&mut editor, EditAction::AddOption { question: 1 }).unwrap();
    apply_edit(&mut editor, EditAction::RemoveOption { question: 1, option: 3 }).unwrap();
    assert_eq!(editor.document().questions()[0].options.len(), 2);
}

#[test]
fn test_malformed_file_leaves_it_untouched() {
    let scratch = Scratch::new("malformed");
    let path = scratch.path("broken.json");
    std::fs::write(&path, "[{\"question\": ").unwrap();

    let err = edit_quiz(&path, EditAction::AddQuestion, &mut Vec::new()).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid quiz format"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"question\": ");
}

#[tokio::test]
async fn preview_refuses_blank_name() {
    let scratch = Scratch::new("preview-name");
    let path = scratch.path("quiz.json");
    author_valid_quiz(&path);

    let mut out = Vec::new();
    let err = preview_quiz(&path, QuizMeta::new("", 0), &mut out).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid preview details");
    assert!(out.is_empty());
}
