//! Plain-text views of game state. Pure functions so they can be snapshot
//! tested without a terminal.

use std::fmt::Write as _;

use gatekeeper_core::{GameState, GameStats};
use gatekeeper_types::{DEFAULT_GROUP_SIZE, GameConfig, from_binary};

pub const BELL: &str = "\x07";

pub const HELP: &str = "\
Commands:
  t N, toggle N    flip bit N (0 is the leftmost bit)
  set BITS         replace your answer, e.g. `set 1010`
  e, eval, <enter> check your answer
  n, next          next step
  p, prev          previous step
  g N, goto N      jump to step N
  r, reset         clear the current step
  restart          start over from step 1
  hints on|off     show or hide hints
  auto on|off      advance automatically after a correct answer
  sound on|off     ring the terminal bell on each check
  stats            show progress
  help             show this list
  q, quit          save preferences and exit";

fn width_label(state: &GameState) -> String {
    if state.is_signed() {
        format!("{}-bit two's complement", state.bit_width)
    } else {
        format!("{}-bit unsigned", state.bit_width)
    }
}

/// Header line for the current step.
#[must_use]
pub fn render_header(state: &GameState) -> String {
    format!(
        "Step {}/{}  target {} ({})",
        state.step_number(),
        state.total_steps,
        state.target,
        width_label(state)
    )
}

/// Header, the answer being built, and the hint when enabled.
#[must_use]
pub fn render_state(state: &GameState, config: &GameConfig) -> String {
    let mut out = render_header(state);
    let _ = write!(
        out,
        "\n  bits: {}",
        state.user_bits.grouped(DEFAULT_GROUP_SIZE)
    );
    if config.show_hints {
        let _ = write!(out, "\n  hint: {}", state.hint);
    }
    out
}

#[must_use]
pub fn render_evaluation(state: &GameState, is_correct: bool, config: &GameConfig) -> String {
    if is_correct {
        let mut out = format!("Correct! {} is {}", state.target, state.user_bits);
        if config.auto_advance && !state.is_last_step() {
            out.push_str(" (moving on)");
        }
        return out;
    }

    match from_binary(&state.user_bits, state.is_signed()) {
        Ok(value) => format!(
            "Not quite: {} reads as {value}, not {}",
            state.user_bits, state.target
        ),
        Err(err) => format!("Not quite: {} ({err})", state.user_bits),
    }
}

#[must_use]
pub fn render_complete(state: &GameState) -> String {
    format!("You finished all {} steps!", state.total_steps)
}

#[must_use]
pub fn render_stats(stats: &GameStats) -> String {
    format!(
        "Step {} of {} ({:.0}% through)",
        stats.completed_steps, stats.total_steps, stats.progress
    )
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[must_use]
pub fn render_config(config: &GameConfig) -> String {
    format!(
        "Settings: hints {}, auto-advance {}, sound {}",
        on_off(config.show_hints),
        on_off(config.auto_advance),
        on_off(config.sound_enabled)
    )
}
