//! Quiz preview player.
//!
//! A [`Simulation`] borrows a [`QuizDocument`] read-only and walks it the way
//! a player would: a welcome screen, one question at a time with a countdown
//! and multi-select answers, then a result screen.
//!
//! ```text
//! welcome --start--> playing --verify--> playing(revealed) --next--> playing
//!                                                      \--next (last)--> result
//! result --retry--> welcome
//! ```
//!
//! Scoring is exact-match: a question counts only when the selected options
//! are precisely the options flagged correct.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::Validate;

use crate::countdown::Countdown;
use crate::error::{QuizError, Result};
use crate::models::quiz::{Question, QuizDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Welcome,
    Playing,
    Result,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Welcome => "welcome",
            Phase::Playing => "playing",
            Phase::Result => "result",
        };
        f.write_str(name)
    }
}

/// Details shown on the welcome screen. They belong to the surrounding
/// game or event, not to the quiz document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizMeta {
    #[validate(length(min = 1, max = 200, message = "Quiz name is required"))]
    pub name: String,

    /// Currency a player spends to enter
    pub required_currency: u32,
}

impl QuizMeta {
    pub fn new(name: impl Into<String>, required_currency: u32) -> Self {
        Self {
            name: name.into(),
            required_currency,
        }
    }
}

/// How an option is shown once the answer is revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionReveal {
    /// Flagged correct
    Correct,
    /// Selected but wrong
    Incorrect,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
}

impl fmt::Display for QuizOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.score, self.total)
    }
}

#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    document: &'a QuizDocument,
    meta: QuizMeta,
    phase: Phase,
    current_question_index: usize,
    countdown: Countdown,
    selected: BTreeSet<usize>,
    revealed: bool,
    score: usize,
}

impl<'a> Simulation<'a> {
    pub fn new(document: &'a QuizDocument, meta: QuizMeta) -> Self {
        Self {
            document,
            meta,
            phase: Phase::Welcome,
            current_question_index: 0,
            countdown: Countdown::new(),
            selected: BTreeSet::new(),
            revealed: false,
            score: 0,
        }
    }

    pub fn meta(&self) -> &QuizMeta {
        &self.meta
    }

    pub fn document(&self) -> &QuizDocument {
        self.document
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    /// The question being played; `None` outside the playing phase
    pub fn current_question(&self) -> Option<&'a Question> {
        match self.phase {
            Phase::Playing => self.document.get(self.current_question_index),
            _ => None,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.document.len()
    }

    pub fn remaining_time(&self) -> u64 {
        self.countdown.remaining()
    }

    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn selected_options(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn can_verify(&self) -> bool {
        self.phase == Phase::Playing && !self.revealed && !self.selected.is_empty()
    }

    pub fn start(&mut self) -> Result<()> {
        self.expect_phase(Phase::Welcome, "start")?;
        let first = self.document.get(0).ok_or_else(|| {
            warn!("Cannot start preview of '{}': quiz has no questions", self.meta.name);
            QuizError::EmptyQuiz
        })?;

        self.phase = Phase::Playing;
        self.current_question_index = 0;
        self.score = 0;
        self.selected.clear();
        self.revealed = false;
        self.countdown.restart(budget(first));
        info!(
            "Preview of '{}' started with {} question(s)",
            self.meta.name,
            self.document.len()
        );
        Ok(())
    }

    /// Toggles an option. Returns whether it is selected afterwards.
    pub fn select_option(&mut self, index: usize) -> Result<bool> {
        let question = self.playing_question("select an option")?;
        if self.revealed {
            return Err(QuizError::AnswerLocked);
        }
        if index >= question.options.len() {
            return Err(QuizError::out_of_range("option", index, question.options.len()));
        }

        let selected = if self.selected.remove(&index) {
            false
        } else {
            self.selected.insert(index);
            true
        };
        debug!("Option {} selected: {}", index, selected);
        Ok(selected)
    }

    /// Reveals correctness for the current question and freezes the countdown
    pub fn verify(&mut self) -> Result<()> {
        self.playing_question("verify")?;
        if self.revealed {
            return Err(QuizError::AnswerLocked);
        }
        if self.selected.is_empty() {
            return Err(QuizError::NothingSelected);
        }
        self.revealed = true;
        self.countdown.suspend();
        debug!(
            "Question {} revealed with {} second(s) left",
            self.current_question_index,
            self.countdown.remaining()
        );
        Ok(())
    }

    /// Whether the current selection matches the correct set exactly
    pub fn is_answer_correct(&self) -> bool {
        self.current_question()
            .map(|q| q.is_exact_match(&self.selected))
            .unwrap_or(false)
    }

    /// Reveal state of an option; `None` until the answer is revealed
    pub fn option_reveal(&self, index: usize) -> Option<OptionReveal> {
        if !self.revealed {
            return None;
        }
        let option = self.current_question()?.options.get(index)?;
        Some(if option.is_correct {
            OptionReveal::Correct
        } else if self.selected.contains(&index) {
            OptionReveal::Incorrect
        } else {
            OptionReveal::Neutral
        })
    }

    /// Scores the revealed question and moves on. Returns the new phase.
    pub fn next(&mut self) -> Result<Phase> {
        let question = self.playing_question("advance")?;
        if !self.revealed {
            return Err(QuizError::InvalidTransition {
                action: "advance before verifying".to_string(),
                phase: self.phase.to_string(),
            });
        }

        if question.is_exact_match(&self.selected) {
            self.score += 1;
        }

        let next_index = self.current_question_index + 1;
        match self.document.get(next_index) {
            Some(next) => {
                self.current_question_index = next_index;
                self.selected.clear();
                self.revealed = false;
                self.countdown.restart(budget(next));
                debug!("Moved to question {}", next_index);
            }
            None => {
                self.phase = Phase::Result;
                self.countdown.stop();
                info!(
                    "Preview of '{}' finished: {}/{}",
                    self.meta.name,
                    self.score,
                    self.document.len()
                );
            }
        }
        Ok(self.phase)
    }

    /// One elapsed second. Returns false when the countdown ignored it.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing || self.revealed {
            return false;
        }
        self.countdown.tick()
    }

    /// Final score; `None` before the result phase
    pub fn outcome(&self) -> Option<QuizOutcome> {
        match self.phase {
            Phase::Result => Some(QuizOutcome {
                score: self.score,
                total: self.document.len(),
            }),
            _ => None,
        }
    }

    pub fn retry(&mut self) -> Result<()> {
        self.expect_phase(Phase::Result, "retry")?;
        self.phase = Phase::Welcome;
        self.current_question_index = 0;
        self.score = 0;
        self.selected.clear();
        self.revealed = false;
        self.countdown = Countdown::new();
        info!("Preview of '{}' reset", self.meta.name);
        Ok(())
    }

    fn expect_phase(&self, phase: Phase, action: &str) -> Result<()> {
        if self.phase != phase {
            return Err(QuizError::InvalidTransition {
                action: action.to_string(),
                phase: self.phase.to_string(),
            });
        }
        Ok(())
    }

    fn playing_question(&self, action: &str) -> Result<&'a Question> {
        self.expect_phase(Phase::Playing, action)?;
        let len = self.document.len();
        self.document
            .get(self.current_question_index)
            .ok_or_else(|| QuizError::out_of_range("question", self.current_question_index, len))
    }
}

fn budget(question: &Question) -> u64 {
    u64::try_from(question.time).unwrap_or(0)
}
