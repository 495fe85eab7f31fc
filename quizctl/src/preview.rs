//! Terminal preview of a quiz.
//!
//! Commands are read one per line while a one-second interval drives the
//! simulation's countdown.

use log::debug;
use shared::{OptionReveal, Phase, Simulation};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewCommand {
    Start,
    /// 1-based option number as typed by the player
    Toggle(usize),
    Verify,
    Next,
    Retry,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl PreviewCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Ok(number) = line.parse::<usize>() {
            return PreviewCommand::Toggle(number);
        }
        match line.to_lowercase().as_str() {
            "s" | "start" => PreviewCommand::Start,
            "v" | "verify" => PreviewCommand::Verify,
            "n" | "next" => PreviewCommand::Next,
            "r" | "retry" => PreviewCommand::Retry,
            "" | "show" => PreviewCommand::Show,
            "h" | "?" | "help" => PreviewCommand::Help,
            "q" | "quit" | "exit" => PreviewCommand::Quit,
            other => PreviewCommand::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs the preview until input ends or the player quits
pub async fn run_preview<R, W>(
    simulation: &mut Simulation<'_>,
    input: R,
    out: &mut W,
    tick_every: Duration,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut ticker = tokio::time::interval(tick_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    render(simulation, out)?;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if simulation.tick() {
                    announce_time(simulation.remaining_time(), out)?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Preview input closed");
                    break;
                };
                if apply(simulation, PreviewCommand::parse(&line), out)? == Flow::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Applies one command and renders the outcome
pub fn apply<W: Write>(
    simulation: &mut Simulation<'_>,
    command: PreviewCommand,
    out: &mut W,
) -> anyhow::Result<Flow> {
    let result = match command {
        PreviewCommand::Start => simulation.start(),
        PreviewCommand::Toggle(number) => match number.checked_sub(1) {
            Some(index) => simulation.select_option(index).map(|_| ()),
            None => {
                writeln!(out, "Options are numbered from 1.")?;
                return Ok(Flow::Continue);
            }
        },
        PreviewCommand::Verify => simulation.verify(),
        PreviewCommand::Next => simulation.next().map(|_| ()),
        PreviewCommand::Retry => simulation.retry(),
        PreviewCommand::Show => Ok(()),
        PreviewCommand::Help => {
            write_help(out)?;
            return Ok(Flow::Continue);
        }
        PreviewCommand::Quit => return Ok(Flow::Quit),
        PreviewCommand::Unknown(other) => {
            writeln!(out, "Unknown command '{}'. Type 'help' for commands.", other)?;
            return Ok(Flow::Continue);
        }
    };

    if let Err(err) = result {
        writeln!(out, "! {}", err)?;
        return Ok(Flow::Continue);
    }
    render(simulation, out)?;
    Ok(Flow::Continue)
}

pub fn render<W: Write>(simulation: &Simulation<'_>, out: &mut W) -> std::io::Result<()> {
    match simulation.phase() {
        Phase::Welcome => {
            let meta = simulation.meta();
            writeln!(out, "=== {} ===", meta.name)?;
            writeln!(out, "Entry cost: {} coin(s)", meta.required_currency)?;
            writeln!(out, "Questions: {}", simulation.total_questions())?;
            writeln!(out, "Type 'start' to begin.")?;
        }
        Phase::Playing => {
            let Some(question) = simulation.current_question() else {
                return Ok(());
            };
            writeln!(
                out,
                "--- Question {}/{} ({}s left) ---",
                simulation.current_question_index() + 1,
                simulation.total_questions(),
                simulation.remaining_time()
            )?;
            writeln!(out, "{}", question.question)?;
            for (index, option) in question.options.iter().enumerate() {
                let mark = if simulation.selected_options().contains(&index) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let verdict = match simulation.option_reveal(index) {
                    Some(OptionReveal::Correct) => "  (correct)",
                    Some(OptionReveal::Incorrect) => "  (wrong)",
                    _ => "",
                };
                writeln!(out, "{} {}. {}{}", mark, index + 1, option.text, verdict)?;
            }
            if simulation.is_revealed() {
                if simulation.is_answer_correct() {
                    writeln!(out, "Correct! Type 'next' to continue.")?;
                } else {
                    writeln!(out, "Not quite. Type 'next' to continue.")?;
                }
            } else if simulation.can_verify() {
                writeln!(out, "Toggle options by number, then 'verify'.")?;
            } else {
                writeln!(out, "Toggle options by number.")?;
            }
        }
        Phase::Result => {
            if let Some(outcome) = simulation.outcome() {
                writeln!(out, "=== Finished ===")?;
                writeln!(out, "Score: {}", outcome)?;
                writeln!(out, "Type 'retry' to play again or 'quit' to leave.")?;
            }
        }
    }
    Ok(())
}

fn announce_time<W: Write>(remaining: u64, out: &mut W) -> std::io::Result<()> {
    if remaining == 0 {
        writeln!(out, "Time is up! You can still answer.")
    } else if remaining <= 5 || remaining % 10 == 0 {
        writeln!(out, "{}s left", remaining)
    } else {
        Ok(())
    }
}

fn write_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  start       begin the quiz")?;
    writeln!(out, "  <number>    toggle an option")?;
    writeln!(out, "  verify      reveal the answer")?;
    writeln!(out, "  next        go to the next question")?;
    writeln!(out, "  retry       back to the welcome screen")?;
    writeln!(out, "  show        redraw the screen")?;
    writeln!(out, "  quit        leave the preview")
}
