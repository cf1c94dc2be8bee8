//! Session tests - scripted input, a manual clock and an in-memory log

use serde_json::Value;

use termtris::engine::{Clock, Game, GameConfig, ManualClock};
use termtris::input::ScriptedInput;
use termtris::session::Session;
use termtris::session_log::SessionLog;
use termtris::types::GameAction;

fn game(clock: &ManualClock) -> Game {
    let config = GameConfig {
        seed: Some(21),
        ..GameConfig::default()
    };
    Game::new(config, clock.now()).unwrap()
}

fn parse(log: SessionLog<Vec<u8>>) -> Vec<Value> {
    String::from_utf8(log.into_inner())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn events(records: &[Value]) -> Vec<&str> {
    records.iter().map(|r| r["event"].as_str().unwrap()).collect()
}

#[test]
fn test_hard_drop_then_quit_is_logged() {
    let clock = ManualClock::new();
    let mut log = SessionLog::new(Vec::new(), clock.now());
    let mut input = ScriptedInput::new([vec![GameAction::HardDrop], vec![GameAction::Quit]]);

    let summary = {
        let mut session = Session::new(game(&clock), Some(&mut log));
        session.run(&mut input, &clock, |_| Ok(())).unwrap()
    };
    assert_eq!(summary.games, 1);
    assert_eq!(summary.score, 0);
    assert!(input.is_exhausted());

    let records = parse(log);
    assert_eq!(events(&records), ["start", "lock", "quit"]);
    assert_eq!(records[0]["seed"], 21);
    assert_eq!(records[0]["width"], 10);
    assert_eq!(records[0]["height"], 20);
    assert_eq!(records[1]["lines"], 0);
    assert_eq!(records[1]["clear"], "none");
}

#[test]
fn test_gravity_runs_between_polls() {
    let clock = ManualClock::new();
    let mut input = ScriptedInput::new(
        std::iter::repeat(Vec::new())
            .take(5)
            .chain([vec![GameAction::Quit]]),
    );

    let mut frames = 0;
    let mut session: Session<'_, Vec<u8>> = Session::new(game(&clock), None);
    session
        .run(&mut input, &clock, |snap| {
            assert!(snap.playable());
            frames += 1;
            clock.advance_ms(800);
            Ok(())
        })
        .unwrap();

    assert_eq!(frames, 6);
    assert_eq!(session.game().active().unwrap().row, 5);
}

#[test]
fn test_quit_works_while_paused() {
    let clock = ManualClock::new();
    let mut input = ScriptedInput::new([
        vec![GameAction::Pause],
        vec![GameAction::MoveLeft, GameAction::Quit],
    ]);

    let mut session: Session<'_, Vec<u8>> = Session::new(game(&clock), None);
    let summary = session.run(&mut input, &clock, |_| Ok(())).unwrap();
    assert_eq!(summary.games, 1);
    assert!(session.game().is_paused());
}

#[test]
fn test_restart_after_game_over_starts_a_second_game() {
    let clock = ManualClock::new();
    let mut log = SessionLog::new(Vec::new(), clock.now());
    let mut script: Vec<Vec<GameAction>> = (0..100).map(|_| vec![GameAction::HardDrop]).collect();
    script.push(vec![GameAction::Restart]);
    script.push(vec![GameAction::Quit]);
    let mut input = ScriptedInput::new(script);

    let mut saw_game_over = false;
    let summary = {
        let mut session = Session::new(game(&clock), Some(&mut log));
        session
            .run(&mut input, &clock, |snap| {
                saw_game_over |= snap.game_over;
                clock.advance_ms(16);
                Ok(())
            })
            .unwrap()
    };
    assert!(saw_game_over);
    assert_eq!(summary.games, 2);
    assert_eq!(summary.score, 0);

    let records = parse(log);
    let names = events(&records);
    assert_eq!(names.iter().filter(|&&e| e == "game_over").count(), 1);
    assert_eq!(names.iter().filter(|&&e| e == "start").count(), 2);

    let tail = &names[names.len() - 4..];
    assert_eq!(tail, ["game_over", "restart", "start", "quit"]);

    let stamps: Vec<u64> = records.iter().map(|r| r["t_ms"].as_u64().unwrap()).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_draw_errors_stop_the_loop() {
    let clock = ManualClock::new();
    let mut input = ScriptedInput::new([vec![GameAction::Quit]]);
    let mut session: Session<'_, Vec<u8>> = Session::new(game(&clock), None);

    let err = session
        .run(&mut input, &clock, |_| Err(anyhow::anyhow!("terminal gone")))
        .unwrap_err();
    assert_eq!(err.to_string(), "terminal gone");
}
