//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: a [`GameView`] paints an engine
//! snapshot into a [`FrameBuffer`], and a [`TerminalRenderer`] flushes the
//! framebuffer to the terminal, diffing against the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use termtris_core as core;
pub use termtris_engine as engine;
pub use termtris_types as types;

pub use fb::{BorderChars, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Glyphs, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
