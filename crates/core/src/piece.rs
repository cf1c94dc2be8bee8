//! Piece module - the falling tetromino
//!
//! A piece is a shape anchored on the board by the top-left corner of its
//! bounding box. Coordinates are (row, col): rows grow downward from the top
//! of the hidden buffer, columns grow to the right.

use arrayvec::ArrayVec;

use crate::shape::{Shape, MAX_CELLS};
use crate::types::{PieceKind, Rotation};

/// Spawn column for a board of the given width
///
/// Centers a 4-wide bounding box: column 3 on a standard 10-wide board.
pub fn spawn_col(board_width: usize) -> i32 {
    (board_width.saturating_sub(4) / 2) as i32
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    pub row: i32,
    pub col: i32,
    rotation: Rotation,
    /// Whether the most recent successful transform was a rotation
    rotated: bool,
}

impl Piece {
    /// Create a piece of `kind` at the spawn position
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        Self::at(Shape::canonical(kind), 0, spawn_col(board_width))
    }

    /// Place an arbitrary shape at (row, col)
    pub fn at(shape: Shape, row: i32, col: i32) -> Self {
        Self {
            shape,
            row,
            col,
            rotation: Rotation::North,
            rotated: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn was_rotated(&self) -> bool {
        self.rotated
    }

    pub fn is_i(&self) -> bool {
        self.shape.is_i()
    }

    pub fn is_t(&self) -> bool {
        self.shape.is_t()
    }

    /// Absolute (row, col) of every occupied cell
    pub fn cells(&self) -> ArrayVec<(i32, i32), MAX_CELLS> {
        cells_at(&self.shape, self.row, self.col)
    }

    /// Translate by (d_row, d_col).
    ///
    /// Sideways moves clear the rotation marker; falling keeps it.
    pub fn shift(&mut self, d_row: i32, d_col: i32) {
        self.row += d_row;
        self.col += d_col;
        if d_col != 0 {
            self.rotated = false;
        }
    }

    /// Replace the shape after an accepted rotation.
    pub fn apply_rotation(&mut self, shape: Shape, row: i32, col: i32, clockwise: bool) {
        self.shape = shape;
        self.row = row;
        self.col = col;
        self.rotation = if clockwise {
            self.rotation.rotate_cw()
        } else {
            self.rotation.rotate_ccw()
        };
        self.rotated = true;
    }
}

/// Absolute cells of `shape` anchored at (row, col)
pub fn cells_at(shape: &Shape, row: i32, col: i32) -> ArrayVec<(i32, i32), MAX_CELLS> {
    shape.cells().map(|(r, c)| (row + r, col + c)).collect()
}
