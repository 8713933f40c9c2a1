//! Settings flowing between a game and its preferences file.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use gatekeeper_config::{ConfigError, Preferences};
use gatekeeper_core::{GameEvent, GameEventKind, GameManager};
use gatekeeper_types::{ConfigPatch, GameConfig};
use tempfile::tempdir;

fn save_on_update(game: &mut GameManager, prefs: Preferences) {
    game.subscribe(GameEventKind::ConfigUpdated, move |event| {
        if let GameEvent::ConfigUpdated(config) = event {
            prefs.persist(config)?;
        }
        Ok(())
    });
}

#[test]
fn updates_survive_a_restart() {
    let dir = tempdir().unwrap();
    let prefs = Preferences::at(dir.path().join("preferences.toml"));

    let mut first = GameManager::new();
    save_on_update(&mut first, prefs.clone());
    first.update_config(ConfigPatch::show_hints(false));
    first.update_config(ConfigPatch::auto_advance(false));

    let mut second = GameManager::new();
    let patch = prefs.load().unwrap().unwrap();
    let config = second.update_config(patch);
    assert_eq!(config, first.config());
    assert!(!config.show_hints);
    assert!(!config.auto_advance);
    assert!(config.sound_enabled);
}

#[test]
fn failed_save_does_not_stop_the_game() {
    let dir = tempdir().unwrap();
    // A directory where the file should be makes every write fail.
    let blocked = dir.path().join("preferences.toml");
    fs::create_dir(&blocked).unwrap();

    let mut game = GameManager::new();
    save_on_update(&mut game, Preferences::at(&blocked));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    game.subscribe(GameEventKind::ConfigUpdated, move |event| {
        if let GameEvent::ConfigUpdated(config) = event {
            sink.borrow_mut().push(*config);
        }
        Ok(())
    });

    let config = game.update_config(ConfigPatch::sound_enabled(false));
    assert!(!config.sound_enabled);
    assert_eq!(seen.borrow().as_slice(), &[config]);
}

#[test]
fn unreadable_file_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");
    fs::write(&path, "[game]\nshow_hints = \"sometimes\"\n").unwrap();

    let err = Preferences::at(&path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), Some(path.as_path()));
}

#[test]
fn missing_file_leaves_defaults() {
    let dir = tempdir().unwrap();
    let prefs = Preferences::at(dir.path().join("preferences.toml"));
    let mut game = GameManager::new();

    if let Some(patch) = prefs.load().unwrap() {
        game.update_config(patch);
    }
    assert_eq!(game.config(), GameConfig::default());
}
