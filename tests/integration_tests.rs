//! Integration tests - the engine driven through its public surface

use std::time::Duration;

use termtris::engine::{Clock, ConfigError, Game, GameConfig, LevelCurve, ManualClock, Phase};
use termtris::types::{ClearKind, GameAction, DEFAULT_NEXT_COUNT};

fn seeded(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

fn new_game(clock: &ManualClock, seed: u64) -> Game {
    Game::new(seeded(seed), clock.now()).expect("default config is valid")
}

#[test]
fn test_new_game_is_ready_to_play() {
    let clock = ManualClock::new();
    let game = new_game(&clock, 1);

    assert_eq!(game.phase(), Phase::Falling);
    assert!(game.active().is_some());
    assert_eq!(game.next_queue().len(), DEFAULT_NEXT_COUNT);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.combo(), 0);
    assert_eq!(game.last_clear(), ClearKind::None);
    assert!(game.can_hold());
    assert!(game.hold_piece().is_none());
}

#[test]
fn test_config_errors_surface_before_play() {
    let clock = ManualClock::new();
    let narrow = GameConfig {
        board_width: 3,
        ..GameConfig::default()
    };
    assert_eq!(
        Game::new(narrow, clock.now()).unwrap_err(),
        ConfigError::BoardTooNarrow(3)
    );

    let bad_level = GameConfig {
        initial_level: 0,
        ..GameConfig::default()
    };
    assert!(Game::new(bad_level, clock.now()).is_err());

    let no_preview = GameConfig {
        next_count: 0,
        ..GameConfig::default()
    };
    assert_eq!(
        Game::new(no_preview, clock.now()).unwrap_err(),
        ConfigError::EmptyNextQueue
    );
}

#[test]
fn test_gravity_follows_drop_interval() {
    let clock = ManualClock::new();
    let mut game = new_game(&clock, 2);
    let start_row = game.active().unwrap().row;
    assert_eq!(game.drop_interval(), Duration::from_millis(800));

    assert!(!game.tick(clock.advance_ms(799)));
    assert_eq!(game.active().unwrap().row, start_row);

    assert!(game.tick(clock.advance_ms(1)));
    assert_eq!(game.active().unwrap().row, start_row + 1);
}

#[test]
fn test_hold_swaps_once_per_piece() {
    let clock = ManualClock::new();
    let mut game = new_game(&clock, 3);
    let first = game.active().unwrap().kind();
    let upcoming = game.next_queue()[0];

    assert!(game.apply_action(GameAction::Hold, clock.now()));
    assert_eq!(game.hold_piece(), Some(first));
    assert_eq!(game.active().unwrap().kind(), upcoming);
    assert!(!game.can_hold());

    assert!(!game.apply_action(GameAction::Hold, clock.now()));
    assert_eq!(game.active().unwrap().kind(), upcoming);

    assert!(game.apply_action(GameAction::HardDrop, clock.now()));
    assert!(game.can_hold());
    let after_lock = game.active().unwrap().kind();

    assert!(game.apply_action(GameAction::Hold, clock.now()));
    assert_eq!(game.active().unwrap().kind(), first);
    assert_eq!(game.hold_piece(), Some(after_lock));
}

#[test]
fn test_held_piece_spawns_at_top() {
    let clock = ManualClock::new();
    let mut game = new_game(&clock, 4);
    game.apply_action(GameAction::SoftDrop, clock.now());
    game.apply_action(GameAction::SoftDrop, clock.now());
    game.apply_action(GameAction::Hold, clock.now());
    game.apply_action(GameAction::HardDrop, clock.now());

    game.apply_action(GameAction::Hold, clock.now());
    assert_eq!(game.active().unwrap().row, 0);
}

#[test]
fn test_hard_drop_locks_and_reports() {
    let clock = ManualClock::new();
    let mut game = new_game(&clock, 5);
    let kind = game.active().unwrap().kind();

    assert!(game.apply_action(GameAction::HardDrop, clock.now()));
    let event = game.take_last_event().expect("lock event");
    assert_eq!(event.kind, kind);
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(event.score_delta, 0);
    assert!(!event.tspin);
    assert_eq!(game.board().filled_count(), 4);
    assert!(game.take_last_event().is_none());
}

#[test]
fn test_pause_freezes_everything_until_resumed() {
    let clock = ManualClock::new();
    let mut game = new_game(&clock, 6);
    let row = game.active().unwrap().row;
    let col = game.active().unwrap().col;

    assert!(game.apply_action(GameAction::Pause, clock.now()));
    assert!(game.is_paused());
    assert!(!game.tick(clock.advance_ms(5_000)));
    assert!(!game.apply_action(GameAction::MoveLeft, clock.now()));
    assert!(!game.apply_action(GameAction::HardDrop, clock.now()));
    assert_eq!(game.active().unwrap().row, row);
    assert_eq!(game.active().unwrap().col, col);

    assert!(game.apply_action(GameAction::Confirm, clock.now()));
    assert!(!game.is_paused());

    // The paused stretch doesn't count towards gravity.
    assert!(!game.tick(clock.advance_ms(799)));
    assert!(game.tick(clock.advance_ms(1)));
    assert_eq!(game.active().unwrap().row, row + 1);
}

#[test]
fn test_restart_is_ignored_while_playing() {
    let clock = ManualClock::new();
    let mut game = new_game(&clock, 7);
    game.apply_action(GameAction::HardDrop, clock.now());
    assert!(!game.apply_action(GameAction::Restart, clock.now()));
    assert_eq!(game.board().filled_count(), 4);
}

fn drop_until_over(game: &mut Game, clock: &ManualClock) -> usize {
    let mut drops = 0;
    while !game.is_game_over() {
        assert!(drops < 200, "stack never topped out");
        game.apply_action(GameAction::HardDrop, clock.now());
        drops += 1;
    }
    drops
}

#[test]
fn test_stacking_in_place_tops_out() {
    let clock = ManualClock::new();
    let mut game = new_game(&clock, 8);
    drop_until_over(&mut game, &clock);

    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.active().is_none());
    assert!(game.snapshot().game_over);
    assert!(!game.tick(clock.advance_ms(10_000)));
    assert!(!game.apply_action(GameAction::MoveLeft, clock.now()));
    assert!(!game.apply_action(GameAction::Pause, clock.now()));
}

#[test]
fn test_restart_after_game_over_replays_seed() {
    let clock = ManualClock::new();
    let fresh = new_game(&clock, 9);
    let mut game = new_game(&clock, 9);
    let first_run = drop_until_over(&mut game, &clock);

    assert!(game.apply_action(GameAction::Restart, clock.now()));
    assert!(!game.is_game_over());
    assert_eq!(game.score(), 0);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(
        game.active().map(|p| p.kind()),
        fresh.active().map(|p| p.kind())
    );
    assert_eq!(game.next_queue(), fresh.next_queue());

    let second_run = drop_until_over(&mut game, &clock);
    assert_eq!(first_run, second_run);
}

#[test]
fn test_level_curve_defaults() {
    let curve = LevelCurve::new(&GameConfig::default());
    assert_eq!(curve.threshold(2), 500);
    assert_eq!(curve.threshold(3), 750);
    assert_eq!(curve.threshold(4), 1125);
    assert_eq!(curve.threshold(5), 1688);

    assert_eq!(curve.level_for(1, 499), 1);
    assert_eq!(curve.level_for(1, 800), 3);
    assert_eq!(curve.level_for(4, 0), 4);

    let mut previous = curve.drop_interval(1);
    for level in 2..=curve.max_level() {
        let interval = curve.drop_interval(level);
        assert!(interval <= previous, "level {level}");
        assert!(interval >= Duration::from_millis(30));
        previous = interval;
    }
    assert_eq!(curve.next_threshold(curve.max_level()), None);
}

#[test]
fn test_snapshot_tracks_play() {
    let clock = ManualClock::new();
    let mut game = new_game(&clock, 10);
    let mut snap = game.snapshot();
    assert_eq!(snap.visible_height(), 20);
    assert_eq!(snap.next.len(), DEFAULT_NEXT_COUNT);
    assert_eq!(snap.next_level_at, Some(500));
    assert!(snap.playable());

    let active = snap.active.unwrap();
    assert_eq!(active.cells().len(), 4);
    let ghost: Vec<_> = snap.ghost_cells().collect();
    assert_eq!(ghost.len(), 4);
    assert!(ghost.iter().all(|&(r, _)| r >= active.row));

    game.apply_action(GameAction::HardDrop, clock.now());
    game.snapshot_into(&mut snap);
    let filled = snap.board.iter().filter(|&&c| c).count();
    assert_eq!(filled, 4);
    for (r, c) in ghost {
        assert!(snap.cell(r as usize, c as usize));
    }

    game.apply_action(GameAction::Pause, clock.now());
    game.snapshot_into(&mut snap);
    assert!(snap.paused);
    assert!(!snap.playable());
}

#[test]
fn test_combo_sequence_bonuses() {
    use termtris::engine::{calculate_score, ScoreInput, ScoreTable};

    let table = ScoreTable::default();
    let level = 2;
    let mut combo = 0;
    let mut last_clear = ClearKind::None;
    let mut bonuses = Vec::new();
    for lines in [1, 1, 0, 2] {
        let result = calculate_score(
            &table,
            ScoreInput {
                lines,
                level,
                tspin: false,
                perfect_clear: false,
                combo,
                last_clear,
            },
        );
        bonuses.push(result.combo_bonus);
        combo = result.next_combo;
        last_clear = result.clear_kind;
    }
    assert_eq!(bonuses, [0, 50 * level as u64, 0, 0]);
    assert_eq!(last_clear, ClearKind::Normal);
}
