//! Full games driven through the public `GameManager` API.

use std::time::{Duration, Instant};

use gatekeeper_core::{DEFAULT_AUTO_ADVANCE_DELAY, GameEvent, GameEventKind, GameManager, StepOutcome};
use gatekeeper_types::{ConfigPatch, GameConfig};

use crate::common::{EventLog, answer};

#[test]
fn auto_advance_walks_the_learning_sequence() {
    let mut game = GameManager::new();
    let log = EventLog::attach(&mut game);
    let total = game.sequence().len();
    let mut now = Instant::now();

    for step in 0..total {
        let state = game.state();
        assert_eq!(state.current_step_index, step);

        game.set_bits(answer(state.target)).unwrap();
        assert!(game.evaluate_at(now), "step {} target {}", step + 1, state.target);

        now += DEFAULT_AUTO_ADVANCE_DELAY;
        assert_eq!(game.run_due(now), 1);
    }

    assert_eq!(log.count(GameEventKind::GameComplete), 1);
    assert_eq!(log.count(GameEventKind::StepChanged), total - 1);
    assert!(matches!(log.last(), Some(GameEvent::GameComplete(_))));
    assert!(game.is_game_complete());
    assert!((game.progress() - 100.0).abs() < 1e-9);
    assert!(!game.has_pending_advance());
}

#[test]
fn wrong_answers_never_advance() {
    let mut game = GameManager::new();
    let start = Instant::now();

    game.go_to_step(4);
    game.set_bits("1011".parse().unwrap()).unwrap();
    assert!(!game.evaluate_at(start));
    assert_eq!(game.run_due(start + Duration::from_secs(60)), 0);
    assert_eq!(game.state().target, 10);
    assert_eq!(game.state().is_correct(), Some(false));
}

#[test]
fn editing_after_a_correct_answer_cancels_the_advance() {
    let mut game = GameManager::new();
    let log = EventLog::attach(&mut game);
    let start = Instant::now();

    game.go_to_step(3);
    game.set_bits(answer(4)).unwrap();
    assert!(game.evaluate_at(start));
    assert!(game.has_pending_advance());

    game.toggle_bit(0);
    assert!(!game.has_pending_advance());
    assert_eq!(game.run_due(start + DEFAULT_AUTO_ADVANCE_DELAY), 0);
    assert_eq!(game.state().target, 4);
    assert_eq!(log.kinds().last(), Some(&GameEventKind::BinaryUpdated));
    assert!(!game.state().is_evaluated());
}

#[test]
fn manual_mode_needs_explicit_navigation() {
    let mut game = GameManager::new().with_config(
        GameConfig::default().merged(ConfigPatch::auto_advance(false)),
    );
    let log = EventLog::attach(&mut game);
    let start = Instant::now();

    assert!(game.evaluate_at(start));
    assert_eq!(game.next_deadline(), None);
    assert_eq!(game.run_due(start + Duration::from_secs(5)), 0);
    assert_eq!(game.state().current_step_index, 0);

    assert_eq!(game.next_step(), StepOutcome::Moved);
    assert_eq!(
        log.kinds(),
        vec![GameEventKind::Evaluated, GameEventKind::StepChanged]
    );
}

#[test]
fn restart_after_completion_starts_fresh() {
    let mut game = GameManager::new();
    let log = EventLog::attach(&mut game);

    game.go_to_step(10);
    game.set_bits(answer(-128)).unwrap();
    game.evaluate();
    assert!(game.is_game_complete());
    assert_eq!(game.next_step(), StepOutcome::Completed);

    log.clear();
    game.reset_game();

    let state = game.state();
    assert_eq!(state.current_step_index, 0);
    assert_eq!(state.user_bits.to_string(), "0");
    assert!(!state.is_evaluated());
    assert!(!game.has_pending_advance());
    assert_eq!(log.kinds(), vec![GameEventKind::GameReset]);
}

#[test]
fn snapshots_do_not_track_later_changes() {
    let mut game = GameManager::new();
    let before = game.state();

    game.go_to_step(2);
    game.toggle_bit(0);

    assert_eq!(before.current_step_index, 0);
    assert_eq!(before.user_bits.to_string(), "0");
    assert_eq!(game.state().user_bits.to_string(), "10");
}
