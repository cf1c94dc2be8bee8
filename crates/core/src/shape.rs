//! Shape geometry - tetromino cell matrices and their rotations
//!
//! A shape is a small boolean matrix (at most 4x4) describing which cells of a
//! bounding box are occupied. Rotations produce new matrices; the matrix
//! dimensions swap on every quarter turn.
//!
//! Shapes are `Copy` values, so every piece owns its own matrix and mutating a
//! piece can never alias the canonical tables.

use crate::types::PieceKind;

/// Largest bounding box side of any tetromino
pub const MAX_DIM: usize = 4;

/// Upper bound on occupied cells of a shape
pub const MAX_CELLS: usize = MAX_DIM * MAX_DIM;

const I_ROWS: &[&[u8]] = &[&[1, 1, 1, 1]];
const O_ROWS: &[&[u8]] = &[&[1, 1], &[1, 1]];
const T_ROWS: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const J_ROWS: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];
const L_ROWS: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];
const S_ROWS: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];
const Z_ROWS: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];

/// Rectangular occupancy matrix tagged with its piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    rows: u8,
    cols: u8,
    /// Row-major; cells outside `rows x cols` are always false.
    cells: [[bool; MAX_DIM]; MAX_DIM],
}

impl Shape {
    /// Spawn matrix for a piece kind
    pub fn canonical(kind: PieceKind) -> Self {
        let rows = match kind {
            PieceKind::I => I_ROWS,
            PieceKind::O => O_ROWS,
            PieceKind::T => T_ROWS,
            PieceKind::J => J_ROWS,
            PieceKind::L => L_ROWS,
            PieceKind::S => S_ROWS,
            PieceKind::Z => Z_ROWS,
        };
        Self::from_rows(kind, rows)
    }

    /// Build a shape from 0/1 rows. Anything beyond 4x4 is truncated.
    pub fn from_rows(kind: PieceKind, rows: &[&[u8]]) -> Self {
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        let height = rows.len().min(MAX_DIM);
        let width = rows
            .iter()
            .take(height)
            .map(|r| r.len())
            .max()
            .unwrap_or(0)
            .min(MAX_DIM);

        for (r, row) in rows.iter().take(height).enumerate() {
            for (c, &v) in row.iter().take(width).enumerate() {
                cells[r][c] = v != 0;
            }
        }

        Self {
            kind,
            rows: height as u8,
            cols: width as u8,
            cells,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn is_i(&self) -> bool {
        self.kind == PieceKind::I
    }

    pub fn is_t(&self) -> bool {
        self.kind == PieceKind::T
    }

    /// Bounding box height in rows
    pub fn height(&self) -> usize {
        self.rows as usize
    }

    /// Bounding box width in columns
    pub fn width(&self) -> usize {
        self.cols as usize
    }

    /// Occupancy at (row, col) of the bounding box; false outside it
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.cells[row][col]
    }

    /// Occupied (row, col) offsets in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height()).flat_map(move |r| {
            (0..self.width())
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i32, c as i32))
        })
    }

    /// Rotate 90° clockwise: reverse the rows, then transpose.
    pub fn rotated_cw(&self) -> Self {
        let (h, w) = (self.height(), self.width());
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for r in 0..w {
            for c in 0..h {
                cells[r][c] = self.cells[h - 1 - c][r];
            }
        }
        Self {
            kind: self.kind,
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Rotate 90° counter-clockwise: transpose, then reverse the rows.
    pub fn rotated_ccw(&self) -> Self {
        let (h, w) = (self.height(), self.width());
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for r in 0..w {
            for c in 0..h {
                cells[r][c] = self.cells[c][w - 1 - r];
            }
        }
        Self {
            kind: self.kind,
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Structural equality of the matrices, ignoring the kind tag
    pub fn same_cells(&self, other: &Shape) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }

    /// Whether this matrix is the canonical shape of `kind` in any orientation
    pub fn matches_kind(&self, kind: PieceKind) -> bool {
        let mut probe = Shape::canonical(kind);
        for _ in 0..4 {
            if self.same_cells(&probe) {
                return true;
            }
            probe = probe.rotated_cw();
        }
        false
    }
}
