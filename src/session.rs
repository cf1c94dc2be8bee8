//! The main loop: poll input, apply actions, tick, draw.
//!
//! The loop never blocks beyond one input poll, so quitting works from any
//! state, paused and game over included.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use crate::engine::{Clock, Game, GameSnapshot};
use crate::input::InputSource;
use crate::session_log::{SessionLog, SessionRecord};
use crate::types::{GameAction, POLL_MS};

/// Final totals reported when the player quits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub games: u32,
}

pub struct Session<'a, W: Write> {
    game: Game,
    log: Option<&'a mut SessionLog<W>>,
    snapshot: GameSnapshot,
    over_logged: bool,
    games: u32,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(game: Game, log: Option<&'a mut SessionLog<W>>) -> Self {
        Self {
            game,
            log,
            snapshot: GameSnapshot::default(),
            over_logged: false,
            games: 1,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run until `Quit`, handing every frame's snapshot to `draw`.
    pub fn run<I, C, F>(&mut self, input: &mut I, clock: &C, mut draw: F) -> Result<SessionSummary>
    where
        I: InputSource,
        C: Clock,
        F: FnMut(&GameSnapshot) -> Result<()>,
    {
        self.write(clock, SessionRecord::start(&self.game))?;

        loop {
            self.game.snapshot_into(&mut self.snapshot);
            draw(&self.snapshot)?;

            for action in input.poll_actions(Duration::from_millis(POLL_MS))? {
                if action == GameAction::Quit {
                    let score = self.game.score();
                    self.write(clock, SessionRecord::Quit { score })?;
                    return Ok(self.summary());
                }
                self.apply(action, clock)?;
            }

            self.game.tick(clock.now());
            self.observe(clock)?;
        }
    }

    fn apply<C: Clock>(&mut self, action: GameAction, clock: &C) -> Result<()> {
        let was_over = self.game.is_game_over();
        let changed = self.game.apply_action(action, clock.now());

        if was_over && changed && action == GameAction::Restart {
            self.games += 1;
            self.over_logged = false;
            self.write(clock, SessionRecord::Restart)?;
            self.write(clock, SessionRecord::start(&self.game))?;
        }
        self.observe(clock)
    }

    /// Log the last lock and a newly reached game over.
    fn observe<C: Clock>(&mut self, clock: &C) -> Result<()> {
        if let Some(event) = self.game.take_last_event() {
            let record = SessionRecord::lock(&event, self.game.score());
            self.write(clock, record)?;
        }
        if self.game.is_game_over() && !self.over_logged {
            self.over_logged = true;
            self.write(clock, SessionRecord::game_over(&self.game))?;
        }
        Ok(())
    }

    fn write<C: Clock>(&mut self, clock: &C, record: SessionRecord) -> Result<()> {
        match self.log.as_mut() {
            Some(log) => log.record(clock.now(), &record),
            None => Ok(()),
        }
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.game.score(),
            level: self.game.level(),
            lines: self.game.lines(),
            games: self.games,
        }
    }
}
