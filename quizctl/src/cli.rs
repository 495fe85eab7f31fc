use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quizctl")]
#[command(
    author,
    version,
    about = "Author, preview and publish platform quizzes",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a new draft quiz with one blank question
    New {
        /// Draft file to create
        #[arg(default_value = "quiz_draft.json")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Change a draft quiz in place
    Edit {
        /// Draft file to edit
        path: PathBuf,
        #[command(subcommand)]
        action: EditAction,
    },
    /// Report every validation issue in a quiz file
    Check {
        path: PathBuf,
    },
    /// Export a valid quiz as quiz_data.json
    Export {
        path: PathBuf,
        /// Directory to write into
        #[arg(short, long, env = "QUIZ_EXPORT_DIR")]
        out_dir: Option<PathBuf>,
        /// Print the canonical JSON instead, e.g. to pipe into a clipboard tool
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },
    /// Play through a quiz in the terminal
    Preview {
        path: PathBuf,
        /// Name shown on the welcome screen
        #[arg(long, default_value = "Quiz preview")]
        name: String,
        /// Entry cost shown on the welcome screen
        #[arg(long, default_value_t = 0)]
        currency: u32,
    },
    /// Create a game or event from a quiz through the platform API
    Publish {
        #[command(subcommand)]
        target: PublishTarget,
    },
}

/// Question and option numbers are 1-based
#[derive(Subcommand, Debug)]
pub enum EditAction {
    /// Append a blank question
    AddQuestion,
    RemoveQuestion {
        question: usize,
    },
    /// Set the question prompt
    SetText {
        question: usize,
        text: String,
    },
    /// Set the countdown in seconds; invalid input becomes 1
    SetTime {
        question: usize,
        seconds: String,
    },
    AddOption {
        question: usize,
    },
    RemoveOption {
        question: usize,
        option: usize,
    },
    SetOption {
        question: usize,
        option: usize,
        text: String,
    },
    /// Mark an option as correct
    Mark {
        question: usize,
        option: usize,
    },
    /// Mark an option as wrong
    Unmark {
        question: usize,
        option: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum PublishTarget {
    Game {
        path: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = 0)]
        currency: u32,
        /// Bearer token for the platform API
        #[arg(long, env = "QUIZDASH_API_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    Event {
        path: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        sponsor: Option<String>,
        /// RFC 3339 start time, e.g. 2026-07-15T14:00:00Z
        #[arg(long)]
        starts_at: DateTime<Utc>,
        #[arg(long)]
        ends_at: DateTime<Utc>,
        #[arg(long, default_value_t = 0)]
        currency: u32,
        /// Bearer token for the platform API
        #[arg(long, env = "QUIZDASH_API_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_edit_command() {
        let cli = Cli::try_parse_from([
            "quizctl",
            "edit",
            "q.json",
            "set-option",
            "1",
            "2",
            "Paris",
        ])
        .unwrap();
        match cli.command {
            Command::Edit {
                path,
                action: EditAction::SetOption { question, option, text },
            } => {
                assert_eq!(path, PathBuf::from("q.json"));
                assert_eq!((question, option, text.as_str()), (1, 2, "Paris"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_publish_event() {
        let cli = Cli::try_parse_from([
            "quizctl",
            "publish",
            "event",
            "q.json",
            "--name",
            "Cup",
            "--starts-at",
            "2026-07-15T14:00:00Z",
            "--ends-at",
            "2026-07-15T16:00:00Z",
        ])
        .unwrap();
        match cli.command {
            Command::Publish {
                target: PublishTarget::Event { starts_at, ends_at, currency, .. },
            } => {
                assert!(ends_at > starts_at);
                assert_eq!(currency, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_dir_read_from_environment() {
        std::env::set_var("QUIZ_EXPORT_DIR", "/srv/quizzes");
        let from_env = Cli::try_parse_from(["quizctl", "export", "q.json"]).unwrap();
        let from_flag =
            Cli::try_parse_from(["quizctl", "export", "q.json", "--out-dir", "out"]).unwrap();
        std::env::remove_var("QUIZ_EXPORT_DIR");

        assert_eq!(export_dir(from_env), Some(PathBuf::from("/srv/quizzes")));
        assert_eq!(export_dir(from_flag), Some(PathBuf::from("out")));
    }

    fn export_dir(cli: Cli) -> Option<PathBuf> {
        match cli.command {
            Command::Export { out_dir, .. } => out_dir,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_timestamp() {
        let result = Cli::try_parse_from([
            "quizctl", "publish", "event", "q.json", "--name", "Cup", "--starts-at", "tomorrow",
            "--ends-at", "2026-07-15T16:00:00Z",
        ]);
        assert!(result.is_err());
    }
}
