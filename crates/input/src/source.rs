//! Input sources
//!
//! The main loop asks an [`InputSource`] for every action that arrived within
//! a short timeout, then ticks the engine. [`TerminalInput`] reads crossterm
//! key events; [`ScriptedInput`] replays a fixed list for tests.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::GameAction;

/// Most actions returned from a single poll
pub const MAX_BATCH: usize = 16;

pub type ActionBatch = ArrayVec<GameAction, MAX_BATCH>;

pub trait InputSource {
    /// Collect actions that arrive within `timeout`.
    ///
    /// Returns as soon as at least one action is available, or when the
    /// timeout elapses with an empty batch.
    fn poll_actions(&mut self, timeout: Duration) -> Result<ActionBatch>;
}

/// Keyboard input from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn poll_actions(&mut self, timeout: Duration) -> Result<ActionBatch> {
        let mut batch = ActionBatch::new();
        let deadline = Instant::now() + timeout;

        let mut wait = timeout;
        while !batch.is_full() && event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                // Held keys arrive as Repeat; releases carry no intent.
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    if let Some(action) = handle_key_event(key) {
                        batch.push(action);
                    }
                }
            }
            // Drain whatever is already queued without waiting again.
            wait = if batch.is_empty() {
                deadline.saturating_duration_since(Instant::now())
            } else {
                Duration::ZERO
            };
        }

        Ok(batch)
    }
}

/// Replays a fixed sequence of actions, one batch per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<GameAction>>,
}

impl ScriptedInput {
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<GameAction>>,
    {
        Self {
            batches: batches.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.batches.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_actions(&mut self, _timeout: Duration) -> Result<ActionBatch> {
        let mut batch = ActionBatch::new();
        if let Some(actions) = self.batches.pop_front() {
            for action in actions.into_iter().take(MAX_BATCH) {
                batch.push(action);
            }
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_yields_batches_in_order() {
        let mut input = ScriptedInput::new([
            vec![GameAction::MoveLeft, GameAction::HardDrop],
            vec![],
            vec![GameAction::Quit],
        ]);

        let first = input.poll_actions(Duration::ZERO).unwrap();
        assert_eq!(first.as_slice(), &[GameAction::MoveLeft, GameAction::HardDrop]);
        assert!(input.poll_actions(Duration::ZERO).unwrap().is_empty());
        assert_eq!(
            input.poll_actions(Duration::ZERO).unwrap().as_slice(),
            &[GameAction::Quit]
        );
        assert!(input.is_exhausted());
        assert!(input.poll_actions(Duration::ZERO).unwrap().is_empty());
    }

    #[test]
    fn scripted_batches_are_capped() {
        let mut input = ScriptedInput::new([vec![GameAction::SoftDrop; 40]]);
        let batch = input.poll_actions(Duration::ZERO).unwrap();
        assert_eq!(batch.len(), MAX_BATCH);
    }
}
