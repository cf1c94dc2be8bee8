//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and exposes
//! them through the [`InputSource`] trait the main loop polls.

pub mod map;
pub mod source;

pub use termtris_types as types;

pub use map::{handle_key_event, should_quit};
pub use source::{ActionBatch, InputSource, ScriptedInput, TerminalInput, MAX_BATCH};
