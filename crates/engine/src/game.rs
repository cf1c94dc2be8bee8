//! Game module - the piece-locking state machine
//!
//! Ties the board, the bag, scoring and the level curve together. The engine
//! is driven entirely from outside: the caller feeds player intents through
//! [`Game::apply_action`] and advances gravity with [`Game::tick`], passing the
//! current instant to both.
//!
//! A piece is `Falling` until gravity fails to move it, then `LockPending`
//! until its deadline passes, at which point it is fixed into the board and
//! the next piece spawns. A spawn that collides ends the game.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use termtris_core::{Bag, Board, Piece, Probe, Shape};

use crate::config::{ConfigError, GameConfig};
use crate::level::LevelCurve;
use crate::scoring::{calculate_score, ScoreInput};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{ClearKind, GameAction, LockEvent, PieceKind};

/// Horizontal kick offsets, tried in order
const KICK_DX: [i32; 5] = [0, -1, 1, -2, 2];
const I_KICK_DX: [i32; 7] = [0, -1, 1, -2, 2, -3, 3];

/// Upward kick offsets, only while the piece is waiting to lock
const FLOOR_KICK_DY: [i32; 3] = [0, -1, -2];
const I_FLOOR_KICK_DY: [i32; 4] = [0, -1, -2, -3];
const NO_FLOOR_KICK: [i32; 1] = [0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Gravity moves the piece down once per drop interval
    Falling,
    /// The piece can't fall; it locks once `deadline` passes
    LockPending { deadline: Instant },
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    curve: LevelCurve,
    board: Board,
    bag: Bag,
    active: Option<Piece>,
    hold: Option<PieceKind>,
    hold_used: bool,
    next: VecDeque<PieceKind>,
    phase: Phase,
    /// Set while paused
    paused_at: Option<Instant>,
    /// Reference point for the next gravity step
    last_drop: Instant,
    score: u64,
    level: u32,
    lines: u32,
    combo: u32,
    last_clear: ClearKind,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl Game {
    /// Validate `config` and start a game with the first piece falling
    pub fn new(config: GameConfig, now: Instant) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(config, now))
    }

    fn start(config: GameConfig, now: Instant) -> Self {
        let curve = LevelCurve::new(&config);
        let board = Board::new(config.total_height(), config.board_width as usize);
        let mut bag = config.seed.map(Bag::with_seed).unwrap_or_default();
        let next = (0..config.next_count).map(|_| bag.next()).collect();
        let level = config.initial_level;

        let mut game = Self {
            config,
            curve,
            board,
            bag,
            active: None,
            hold: None,
            hold_used: false,
            next,
            phase: Phase::Falling,
            paused_at: None,
            last_drop: now,
            score: 0,
            level,
            lines: 0,
            combo: 0,
            last_clear: ClearKind::None,
            last_event: None,
        };
        game.spawn_next(now);
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    pub fn next_queue(&self) -> &VecDeque<PieceKind> {
        &self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn last_clear(&self) -> ClearKind {
        self.last_clear
    }

    /// Gravity interval at the current level
    pub fn drop_interval(&self) -> Duration {
        self.curve.drop_interval(self.level)
    }

    pub fn lock_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::LockPending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Apply one player intent.
    ///
    /// Returns whether anything changed. Rejected moves, actions while paused
    /// (other than resuming) and everything but `Restart` after game over are
    /// ignored. `Quit` is left to the caller.
    pub fn apply_action(&mut self, action: GameAction, now: Instant) -> bool {
        if self.is_game_over() {
            return match action {
                GameAction::Restart => {
                    self.restart(now);
                    true
                }
                _ => false,
            };
        }

        if self.is_paused() {
            return match action {
                GameAction::Pause | GameAction::Confirm => {
                    self.resume(now);
                    true
                }
                _ => false,
            };
        }

        match action {
            GameAction::MoveLeft => self.try_shift(-1, now),
            GameAction::MoveRight => self.try_shift(1, now),
            GameAction::SoftDrop => self.soft_drop(now),
            GameAction::RotateCw => self.try_rotate(true, now),
            GameAction::RotateCcw => self.try_rotate(false, now),
            GameAction::HardDrop => self.hard_drop(now),
            GameAction::Hold => self.hold(now),
            GameAction::Pause => {
                self.paused_at = Some(now);
                true
            }
            GameAction::Confirm | GameAction::Restart | GameAction::Quit => false,
        }
    }

    /// Advance gravity and the lock timer to `now`.
    ///
    /// Returns whether the piece moved or locked.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_paused() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        match self.phase {
            Phase::Falling => {
                if now.saturating_duration_since(self.last_drop) < self.drop_interval() {
                    return false;
                }
                self.last_drop = now;
                if self.can_fall(&piece) {
                    self.move_active(1, 0);
                } else {
                    self.phase = Phase::LockPending {
                        deadline: now + self.config.lock_delay,
                    };
                }
                true
            }
            Phase::LockPending { deadline } => {
                if self.can_fall(&piece) {
                    self.move_active(1, 0);
                    self.phase = Phase::Falling;
                    self.last_drop = now;
                    true
                } else if now >= deadline {
                    self.lock_active(now);
                    true
                } else {
                    false
                }
            }
            Phase::GameOver => false,
        }
    }

    /// Start over with the same configuration. Only valid after game over.
    pub fn restart(&mut self, now: Instant) -> bool {
        if !self.is_game_over() {
            return false;
        }
        let config = self.config.clone();
        *self = Self::start(config, now);
        true
    }

    fn resume(&mut self, now: Instant) {
        let Some(since) = self.paused_at.take() else {
            return;
        };
        let paused_for = now.saturating_duration_since(since);
        self.last_drop += paused_for;
        if let Phase::LockPending { deadline } = &mut self.phase {
            *deadline += paused_for;
        }
    }

    fn can_fall(&self, piece: &Piece) -> bool {
        !self
            .board
            .check_collision(piece, Probe::here().row(piece.row + 1))
    }

    fn move_active(&mut self, d_row: i32, d_col: i32) {
        if let Some(piece) = self.active.as_mut() {
            piece.shift(d_row, d_col);
        }
    }

    /// Give the piece a fresh lock window after a successful move
    fn refresh_lock_deadline(&mut self, now: Instant) {
        if let Phase::LockPending { deadline } = &mut self.phase {
            *deadline = now + self.config.lock_delay;
        }
    }

    fn try_shift(&mut self, d_col: i32, now: Instant) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if self
            .board
            .check_collision(&piece, Probe::here().col(piece.col + d_col))
        {
            return false;
        }
        self.move_active(0, d_col);
        self.refresh_lock_deadline(now);
        true
    }

    /// Move down one row. Never locks, even when waiting to lock.
    fn soft_drop(&mut self, now: Instant) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if !self.can_fall(&piece) {
            return false;
        }
        self.move_active(1, 0);
        if matches!(self.phase, Phase::LockPending { .. }) {
            self.phase = Phase::Falling;
            self.last_drop = now;
        }
        true
    }

    /// Rotate with kicks: every `dx` of the first `dy`, then the next `dy`.
    fn try_rotate(&mut self, clockwise: bool, now: Instant) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let rotated = if clockwise {
            piece.shape().rotated_cw()
        } else {
            piece.shape().rotated_ccw()
        };

        let Some((row, col)) = self.find_kick(&piece, rotated) else {
            return false;
        };
        if let Some(active) = self.active.as_mut() {
            active.apply_rotation(rotated, row, col, clockwise);
        }
        self.refresh_lock_deadline(now);
        true
    }

    fn find_kick(&self, piece: &Piece, rotated: Shape) -> Option<(i32, i32)> {
        let dxs: &[i32] = if piece.is_i() { &I_KICK_DX } else { &KICK_DX };
        let dys: &[i32] = match (self.phase, piece.is_i()) {
            (Phase::LockPending { .. }, true) => &I_FLOOR_KICK_DY,
            (Phase::LockPending { .. }, false) => &FLOOR_KICK_DY,
            _ => &NO_FLOOR_KICK,
        };

        dys.iter()
            .flat_map(|&dy| dxs.iter().map(move |&dx| (piece.row + dy, piece.col + dx)))
            .find(|&(row, col)| {
                !self
                    .board
                    .check_collision(piece, Probe::here().row(row).col(col).shape(rotated))
            })
    }

    fn hard_drop(&mut self, now: Instant) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let ghost = self.board.ghost_row(&piece);
        self.move_active(ghost - piece.row, 0);
        self.lock_active(now);
        true
    }

    /// Swap the active piece with the held one, once per piece.
    fn hold(&mut self, now: Instant) -> bool {
        if self.hold_used {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let incoming = match self.hold.replace(piece.kind()) {
            Some(kind) => kind,
            None => self.pop_next(),
        };
        self.hold_used = true;
        self.place_spawned(incoming, now);
        true
    }

    fn pop_next(&mut self) -> PieceKind {
        let kind = self.next.pop_front().unwrap_or_else(|| self.bag.next());
        self.next.push_back(self.bag.next());
        kind
    }

    /// Spawn the next queued piece; a blocked spawn ends the game.
    fn spawn_next(&mut self, now: Instant) -> bool {
        let kind = self.pop_next();
        self.hold_used = false;
        self.place_spawned(kind, now)
    }

    fn place_spawned(&mut self, kind: PieceKind, now: Instant) -> bool {
        let piece = Piece::spawn(kind, self.board.width());
        self.last_drop = now;
        if self.board.check_collision(&piece, Probe::here()) {
            self.active = None;
            self.phase = Phase::GameOver;
            return false;
        }
        self.active = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    /// Fix the active piece, clear lines, score, and spawn the next piece.
    fn lock_active(&mut self, now: Instant) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let tspin = piece.is_t() && piece.was_rotated() && self.board.check_tspin(&piece);
        self.board.fix(&piece);
        let lines = self.board.remove_full_lines() as u32;
        let perfect_clear = self.board.is_perfect_clear();

        let result = calculate_score(
            &self.config.scores,
            ScoreInput {
                lines,
                level: self.level,
                tspin,
                perfect_clear,
                combo: self.combo,
                last_clear: self.last_clear,
            },
        );

        let combo_used = if lines > 0 { self.combo } else { 0 };
        self.score += result.total;
        self.lines += lines;
        self.combo = result.next_combo;
        self.last_clear = result.clear_kind;
        self.level = self.curve.level_for(self.level, self.score);

        self.last_event = Some(LockEvent {
            kind: piece.kind(),
            lines_cleared: lines,
            tspin,
            perfect_clear,
            back_to_back: result.b2b_applied,
            combo: combo_used,
            score_delta: result.total,
            clear_kind: result.clear_kind,
            level: self.level,
        });

        self.spawn_next(now);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.height = self.board.height();
        out.width = self.board.width();
        out.hidden_rows = self.config.hidden_rows as usize;
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());

        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.ghost_row = self.active.as_ref().map(|p| self.board.ghost_row(p));
        out.hold = self.hold;
        out.can_hold = self.can_hold();
        out.next.clear();
        out.next.extend(self.next.iter().copied());
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.last_clear = self.last_clear;
        out.next_level_at = self.curve.next_threshold(self.level);
        out.paused = self.is_paused();
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
