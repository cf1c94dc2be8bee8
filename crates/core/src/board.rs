//! Board module - manages the game grid
//!
//! The board is a `height x width` grid of filled/empty cells stored as a flat
//! row-major vector. The height includes the hidden buffer rows above the
//! visible play area. Dimensions are fixed at construction.
//!
//! Coordinates are (row, col) with row 0 at the top of the hidden buffer.
//! Collision probes accept signed coordinates; anything outside the grid
//! counts as blocked.

use crate::piece::{cells_at, Piece};
use crate::shape::Shape;

/// Hypothetical placement overrides for [`Board::check_collision`]
///
/// Unset fields fall back to the piece's own row, column and shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Probe {
    pub row: Option<i32>,
    pub col: Option<i32>,
    pub shape: Option<Shape>,
}

impl Probe {
    /// Probe the piece where it currently is
    pub fn here() -> Self {
        Self::default()
    }

    pub fn row(mut self, row: i32) -> Self {
        self.row = Some(row);
        self
    }

    pub fn col(mut self, col: i32) -> Self {
        self.col = Some(col);
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<bool>,
}

impl Board {
    /// Create an empty board of `height` rows (hidden buffer included) by `width` columns
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (row, col); `None` when out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<bool> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, filled: bool) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = filled;
                true
            }
            None => false,
        }
    }

    /// Out of bounds or filled
    pub fn is_blocked(&self, row: i32, col: i32) -> bool {
        self.get(row, col).unwrap_or(true)
    }

    /// Whether the piece, optionally moved/reshaped by `probe`, overlaps a
    /// wall, the floor, the ceiling or a filled cell.
    pub fn check_collision(&self, piece: &Piece, probe: Probe) -> bool {
        let row = probe.row.unwrap_or(piece.row);
        let col = probe.col.unwrap_or(piece.col);
        let shape = probe.shape.unwrap_or(*piece.shape());
        cells_at(&shape, row, col)
            .iter()
            .any(|&(r, c)| self.is_blocked(r, c))
    }

    /// Mark every in-bounds cell of the piece as filled
    pub fn fix(&mut self, piece: &Piece) {
        for (r, c) in piece.cells() {
            self.set(r, c, true);
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        let start = row * self.width;
        self.cells[start..start + self.width].iter().all(|&c| c)
    }

    /// Remove every full row, shifting the rows above down and inserting
    /// empty rows at the top. Returns the number of rows removed.
    pub fn remove_full_lines(&mut self) -> usize {
        let width = self.width;
        let mut removed = 0;
        let mut write_row = self.height;

        // Two-pointer compaction, bottom to top.
        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                removed += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        self.cells[..write_row * width].fill(false);
        removed
    }

    /// Every cell of the grid is empty
    pub fn is_perfect_clear(&self) -> bool {
        self.cells.iter().all(|&c| !c)
    }

    /// Row the piece would come to rest on if dropped straight down
    pub fn ghost_row(&self, piece: &Piece) -> i32 {
        let mut row = piece.row;
        while !self.check_collision(piece, Probe::here().row(row + 1)) {
            row += 1;
        }
        row
    }

    /// Three-corner T-Spin test.
    ///
    /// The center is the T's pivot: the middle of the bounding box along its
    /// long axis, on the three-cell bar. At least three of the four diagonal
    /// neighbours must be filled or outside the grid. Whether the last move was
    /// a rotation is the caller's concern.
    pub fn check_tspin(&self, piece: &Piece) -> bool {
        if !piece.is_t() {
            return false;
        }
        let Some((pr, pc)) = t_pivot(piece.shape()) else {
            return false;
        };
        let (cr, cc) = (piece.row + pr, piece.col + pc);

        [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .iter()
            .filter(|&&(dr, dc)| self.is_blocked(cr + dr, cc + dc))
            .count()
            >= 3
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

/// Pivot offset of a T matrix in any orientation
fn t_pivot(shape: &Shape) -> Option<(i32, i32)> {
    match (shape.height(), shape.width()) {
        (2, 3) => (0..2)
            .find(|&r| (0..3).all(|c| shape.get(r, c)))
            .map(|r| (r as i32, 1)),
        (3, 2) => (0..2)
            .find(|&c| (0..3).all(|r| shape.get(r, c)))
            .map(|c| (1, c as i32)),
        _ => None,
    }
}
