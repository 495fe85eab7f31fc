use anyhow::{anyhow, bail, Context, Result};
use log::info;
use shared::{
    codec, publish_event, publish_game, CreateEventRequest, CreateGameRequest, OptionUpdate,
    QuestionUpdate, QuizEditor, QuizError, QuizMeta, Simulation,
};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::cli::{Command, EditAction, PublishTarget};
use crate::client::HttpPlatformClient;
use crate::config::Config;
use crate::preview::run_preview;

pub async fn run(command: Command, config: &Config) -> Result<()> {
    let mut out = std::io::stdout();
    match command {
        Command::New { path, force } => new_quiz(&path, force, &mut out),
        Command::Edit { path, action } => edit_quiz(&path, action, &mut out),
        Command::Check { path } => check_quiz(&path, &mut out),
        Command::Export {
            path,
            out_dir,
            stdout,
        } => {
            let dir = out_dir.unwrap_or_else(|| config.export_dir.clone());
            export_quiz(&path, &dir, stdout, &mut out)
        }
        Command::Preview {
            path,
            name,
            currency,
        } => preview_quiz(&path, QuizMeta::new(name, currency), &mut out).await,
        Command::Publish { target } => publish(target, config, &mut out).await,
    }
}

/// Loads a quiz file into an editor
pub fn open_quiz(path: &Path) -> Result<QuizEditor> {
    let mut editor = QuizEditor::with_document(shared::QuizDocument::empty());
    editor
        .import_from_path(path)
        .with_context(|| format!("Failed to open quiz {}", path.display()))?;
    Ok(editor)
}

/// Drafts are saved without validation so authoring can happen in steps
fn save_draft(editor: &QuizEditor, path: &Path) -> Result<()> {
    let text = codec::to_json(editor.document())?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved draft {}", path.display());
    Ok(())
}

fn write_issues<W: Write>(editor: &QuizEditor, out: &mut W) -> Result<usize> {
    let issues = editor.validate();
    for issue in &issues {
        writeln!(out, "  - {}", issue)?;
    }
    Ok(issues.len())
}

pub fn new_quiz<W: Write>(path: &Path, force: bool, out: &mut W) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let editor = QuizEditor::new();
    save_draft(&editor, path)?;
    writeln!(out, "Created {}. Still to fill in:", path.display())?;
    write_issues(&editor, out)?;
    Ok(())
}

fn to_index(number: usize, what: &str) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("{} numbers start at 1", what))
}

pub fn apply_edit(editor: &mut QuizEditor, action: EditAction) -> Result<()> {
    match action {
        EditAction::AddQuestion => {
            editor.add_question();
        }
        EditAction::RemoveQuestion { question } => {
            editor.remove_question(to_index(question, "Question")?)?;
        }
        EditAction::SetText { question, text } => {
            editor.update_question(to_index(question, "Question")?, QuestionUpdate::Text(text))?;
        }
        EditAction::SetTime { question, seconds } => {
            editor.update_question(
                to_index(question, "Question")?,
                QuestionUpdate::time_from_input(&seconds),
            )?;
        }
        EditAction::AddOption { question } => {
            editor.add_option(to_index(question, "Question")?)?;
        }
        EditAction::RemoveOption { question, option } => {
            editor.remove_option(to_index(question, "Question")?, to_index(option, "Option")?)?;
        }
        EditAction::SetOption {
            question,
            option,
            text,
        } => {
            editor.update_option(
                to_index(question, "Question")?,
                to_index(option, "Option")?,
                OptionUpdate::Text(text),
            )?;
        }
        EditAction::Mark { question, option } => {
            editor.update_option(
                to_index(question, "Question")?,
                to_index(option, "Option")?,
                OptionUpdate::Correct(true),
            )?;
        }
        EditAction::Unmark { question, option } => {
            editor.update_option(
                to_index(question, "Question")?,
                to_index(option, "Option")?,
                OptionUpdate::Correct(false),
            )?;
        }
    }
    Ok(())
}

pub fn edit_quiz<W: Write>(path: &Path, action: EditAction, out: &mut W) -> Result<()> {
    let mut editor = open_quiz(path)?;
    apply_edit(&mut editor, action)?;
    save_draft(&editor, path)?;

    let remaining = editor.validate().len();
    if remaining == 0 {
        writeln!(out, "Saved {}. Quiz is valid.", path.display())?;
    } else {
        writeln!(out, "Saved {}. {} issue(s) left.", path.display(), remaining)?;
    }
    Ok(())
}

pub fn check_quiz<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    let editor = open_quiz(path)?;
    writeln!(out, "{}: {} question(s)", path.display(), editor.document().len())?;
    let count = write_issues(&editor, out)?;
    if count > 0 {
        bail!("{} validation issue(s) found", count);
    }
    writeln!(out, "OK")?;
    Ok(())
}

pub fn export_quiz<W: Write>(path: &Path, dir: &Path, to_stdout: bool, out: &mut W) -> Result<()> {
    let editor = open_quiz(path)?;
    if to_stdout {
        match editor.clipboard_text() {
            Ok(text) => writeln!(out, "{}", text)?,
            Err(err) => {
                write_issues(&editor, out)?;
                return Err(err.into());
            }
        }
        return Ok(());
    }

    match editor.export_to_file(dir) {
        Ok(written) => {
            writeln!(out, "Exported {}", written.display())?;
            Ok(())
        }
        Err(err) => {
            write_issues(&editor, out)?;
            Err(anyhow::Error::from(err).context("Export refused"))
        }
    }
}

pub async fn preview_quiz<W: Write>(path: &Path, meta: QuizMeta, out: &mut W) -> Result<()> {
    meta.validate().map_err(QuizError::from).context("Invalid preview details")?;
    let editor = open_quiz(path)?;
    if write_issues(&editor, out)? > 0 {
        writeln!(out, "Previewing a quiz that does not validate yet.")?;
    }

    let mut simulation = Simulation::new(editor.document(), meta);
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    run_preview(&mut simulation, input, out, Duration::from_secs(1)).await
}

async fn publish<W: Write>(target: PublishTarget, config: &Config, out: &mut W) -> Result<()> {
    let client = HttpPlatformClient::new(&config.api)?;

    match target {
        PublishTarget::Game {
            path,
            name,
            description,
            currency,
            token,
        } => {
            let token = config
                .api_token(token.as_deref())
                .ok_or_else(|| anyhow!("No API token: set QUIZDASH_API_TOKEN or pass --token"))?;
            let quiz = open_quiz(&path)?.into_document();
            let mut request = CreateGameRequest::new(name, currency, quiz);
            request.description = description;

            let created = publish_game(&client, &token, &request)
                .await
                .context("Failed to publish game")?;
            writeln!(out, "Created game {}", created.id)?;
        }
        PublishTarget::Event {
            path,
            name,
            description,
            sponsor,
            starts_at,
            ends_at,
            currency,
            token,
        } => {
            let token = config
                .api_token(token.as_deref())
                .ok_or_else(|| anyhow!("No API token: set QUIZDASH_API_TOKEN or pass --token"))?;
            let quiz = open_quiz(&path)?.into_document();
            let mut request = CreateEventRequest::new(name, starts_at, ends_at, currency, quiz);
            request.description = description;
            request.sponsor_id = sponsor;

            let created = publish_event(&client, &token, &request)
                .await
                .context("Failed to publish event")?;
            writeln!(out, "Created event {}", created.id)?;
        }
    }
    Ok(())
}
