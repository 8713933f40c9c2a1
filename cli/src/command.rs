//! Line commands typed at the prompt.

use gatekeeper_core::{GameManager, StepOutcome};
use gatekeeper_types::{BitSequence, ConfigPatch, DomainError};
use thiserror::Error;

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 0-based position, most significant bit first.
    Toggle(usize),
    Set(BitSequence),
    Evaluate,
    Next,
    Previous,
    /// 0-based step index; may be out of range.
    GoTo(isize),
    ResetStep,
    Restart,
    Settings(ConfigPatch),
    Stats,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (type `help` for a list)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a number")]
    InvalidNumber(String),
    #[error("expected `on` or `off`, got {0:?}")]
    InvalidSwitch(String),
    #[error("invalid answer: {0}")]
    InvalidBits(#[from] DomainError),
}

fn number<T: std::str::FromStr>(arg: Option<&str>, name: &'static str) -> Result<T, CommandError> {
    let raw = arg.ok_or(CommandError::MissingArgument(name))?;
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn switch(arg: Option<&str>, name: &'static str) -> Result<bool, CommandError> {
    match arg.ok_or(CommandError::MissingArgument(name))? {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(CommandError::InvalidSwitch(other.to_string())),
    }
}

impl Command {
    /// Parse one input line. An empty line evaluates the current answer.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Command::Evaluate);
        };
        let arg = words.next();

        match head.to_ascii_lowercase().as_str() {
            "t" | "toggle" => number(arg, "toggle").map(Command::Toggle),
            "set" => {
                let bits = arg.ok_or(CommandError::MissingArgument("set"))?;
                Ok(Command::Set(bits.parse()?))
            }
            "e" | "eval" | "check" => Ok(Command::Evaluate),
            "n" | "next" => Ok(Command::Next),
            "p" | "prev" | "previous" => Ok(Command::Previous),
            "g" | "goto" => {
                let step: isize = number(arg, "goto")?;
                Ok(Command::GoTo(step.saturating_sub(1)))
            }
            "r" | "reset" => Ok(Command::ResetStep),
            "restart" => Ok(Command::Restart),
            "hints" => switch(arg, "hints").map(|on| Command::Settings(ConfigPatch::show_hints(on))),
            "auto" => switch(arg, "auto").map(|on| Command::Settings(ConfigPatch::auto_advance(on))),
            "sound" => {
                switch(arg, "sound").map(|on| Command::Settings(ConfigPatch::sound_enabled(on)))
            }
            "stats" => Ok(Command::Stats),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }

    /// Run against `game`. Returns feedback that no event will print.
    pub fn apply(self, game: &mut GameManager) -> Option<String> {
        match self {
            Command::Toggle(index) => {
                if game.toggle_bit(index) {
                    None
                } else {
                    Some(format!(
                        "No bit at position {index} (positions 0..{})",
                        game.state().bit_width
                    ))
                }
            }
            Command::Set(bits) => game
                .set_bits(bits)
                .err()
                .map(|err| CommandError::from(err).to_string()),
            Command::Evaluate => {
                game.evaluate();
                None
            }
            Command::Next => {
                game.next_step();
                None
            }
            Command::Previous => match game.previous_step() {
                StepOutcome::AtBoundary => Some("Already at the first step".to_string()),
                _ => None,
            },
            Command::GoTo(index) => match game.go_to_step(index) {
                StepOutcome::AtBoundary => Some(format!(
                    "No such step (steps 1..={})",
                    game.sequence().len()
                )),
                _ => None,
            },
            Command::ResetStep => {
                game.reset_step();
                None
            }
            Command::Restart => {
                game.reset_game();
                None
            }
            Command::Settings(patch) => {
                game.update_config(patch);
                None
            }
            Command::Stats => Some(render::render_stats(&game.stats())),
            Command::Help => Some(render::HELP.to_string()),
            Command::Quit => None,
        }
    }
}
