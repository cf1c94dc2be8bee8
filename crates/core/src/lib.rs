//! Core game model - pure, deterministic, and testable
//!
//! This crate holds the data model the engine is built on. It has no
//! dependency on timing, terminals or I/O.
//!
//! # Module Structure
//!
//! - [`shape`]: tetromino cell matrices and clockwise/counter-clockwise rotation
//! - [`piece`]: the falling piece (shape + anchor + rotation marker)
//! - [`board`]: fixed-size grid with collision probes, line removal, ghost and T-Spin tests
//! - [`bag`]: 7-bag random piece generation
//!
//! # Example
//!
//! ```
//! use termtris_core::{Board, Piece, Probe};
//! use termtris_types::PieceKind;
//!
//! let board = Board::new(24, 10);
//! let piece = Piece::spawn(PieceKind::T, board.width());
//!
//! assert!(!board.check_collision(&piece, Probe::here()));
//! assert!(board.check_collision(&piece, Probe::here().col(-1)));
//! assert_eq!(board.ghost_row(&piece), 22);
//! ```

pub mod bag;
pub mod board;
pub mod piece;
pub mod shape;

pub use termtris_types as types;

pub use bag::Bag;
pub use board::{Board, Probe};
pub use piece::{spawn_col, Piece};
pub use shape::Shape;
