//! Gatekeeper CLI - line-oriented front end for the binary quiz.
//!
//! # Event Loop
//!
//! A single-threaded runtime waits on two sources at once:
//!
//! ```text
//! stdin line ──> Command::parse ──> Command::apply ──> GameManager ──> listeners print
//! deadline   ──> GameManager::run_due (auto-advance)
//! ```
//!
//! All output happens in event listeners, so the screen shows exactly what the
//! game emitted. Preferences are loaded once at startup and written back on
//! every `configUpdated` and on quit.

mod command;
mod render;

use std::cell::Cell;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gatekeeper_config::Preferences;
use gatekeeper_core::{GameEvent, GameEventKind, GameManager, ListenerResult};
use gatekeeper_types::GameConfig;

use crate::command::Command;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // stdout belongs to the game; no log file means no logs.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.gatekeeper/logs/gatekeeper.log
    if let Some(dir) = gatekeeper_config::data_dir() {
        candidates.push(dir.join("logs").join("gatekeeper.log"));
    }

    candidates.push(PathBuf::from(".gatekeeper").join("logs").join("gatekeeper.log"));

    candidates
}

fn print_block(text: &str) -> ListenerResult {
    let mut out = io::stdout().lock();
    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

fn load_preferences() -> Option<Preferences> {
    match Preferences::default_location() {
        Ok(prefs) => Some(prefs),
        Err(err) => {
            tracing::warn!("Preferences disabled: {err}");
            None
        }
    }
}

/// Register the listeners that draw the game and save settings.
fn attach_output(game: &mut GameManager, prefs: Option<Preferences>) {
    let config = Rc::new(Cell::new(game.config()));

    for kind in [
        GameEventKind::StepChanged,
        GameEventKind::StepReset,
        GameEventKind::GameReset,
        GameEventKind::BinaryUpdated,
    ] {
        let config = Rc::clone(&config);
        game.subscribe(kind, move |event| match event.state() {
            Some(state) => print_block(&render::render_state(state, &config.get())),
            None => Ok(()),
        });
    }

    {
        let config = Rc::clone(&config);
        game.subscribe(GameEventKind::Evaluated, move |event| {
            let GameEvent::Evaluated { state, is_correct } = event else {
                return Ok(());
            };
            let config = config.get();
            if config.sound_enabled {
                print!("{}", render::BELL);
            }
            print_block(&render::render_evaluation(state, *is_correct, &config))
        });
    }

    game.subscribe(GameEventKind::GameComplete, |event| match event.state() {
        Some(state) => print_block(&render::render_complete(state)),
        None => Ok(()),
    });

    game.subscribe(GameEventKind::ConfigUpdated, move |event| {
        let GameEvent::ConfigUpdated(updated) = event else {
            return Ok(());
        };
        config.set(*updated);
        print_block(&render::render_config(updated))?;
        if let Some(prefs) = &prefs {
            prefs.persist(updated)?;
        }
        Ok(())
    });
}

fn save_on_exit(prefs: Option<&Preferences>, config: &GameConfig) {
    if let Some(prefs) = prefs
        && let Err(err) = prefs.persist(config)
    {
        tracing::warn!("Failed to save preferences: {err}");
    }
}

async fn sleep_until_due(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let prefs = load_preferences();
    let mut game = GameManager::new();

    // Applied before listeners attach so startup does not re-save the file.
    if let Some(prefs) = &prefs {
        match prefs.load() {
            Ok(Some(patch)) => {
                game.update_config(patch);
            }
            Ok(None) => {}
            Err(err) => tracing::warn!("Ignoring preferences: {err}"),
        }
    }
    attach_output(&mut game, prefs.clone());

    println!("Gatekeeper: spell each number in binary. Type `help` for commands.");
    println!("{}", render::render_config(&game.config()));
    println!("{}", render::render_state(&game.state(), &game.config()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = game.next_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        tracing::debug!(?command, "Applying command");
                        if let Some(feedback) = command.apply(&mut game) {
                            println!("{feedback}");
                        }
                    }
                    Err(err) => println!("{err}"),
                }
            }
            () = sleep_until_due(deadline) => {
                game.run_due(Instant::now());
            }
        }
    }

    save_on_exit(prefs.as_ref(), &game.config());
    tracing::info!(step = game.state().step_number(), "Exiting");
    Ok(())
}
