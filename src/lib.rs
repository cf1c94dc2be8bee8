//! termtris (workspace facade crate).
//!
//! Re-exports the member crates under short names and holds the pieces the
//! binary is made of: the command line, the session log and the main loop.

pub use termtris_core as core;
pub use termtris_engine as engine;
pub use termtris_input as input;
pub use termtris_term as term;
pub use termtris_types as types;

pub mod cli;
pub mod session;
pub mod session_log;
