use termtris_core::Piece;

use crate::types::{ClearKind, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i32,
    pub col: i32,
    /// Absolute (row, col) of every occupied cell; only the first `len` are valid
    pub cells: [(i32, i32); 4],
    pub len: u8,
}

impl ActiveSnapshot {
    pub fn cells(&self) -> &[(i32, i32)] {
        &self.cells[..self.len as usize]
    }
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        let mut cells = [(0, 0); 4];
        let mut len = 0;
        for (slot, cell) in cells.iter_mut().zip(piece.cells()) {
            *slot = cell;
            len += 1;
        }
        Self {
            kind: piece.kind(),
            rotation: piece.rotation(),
            row: piece.row,
            col: piece.col,
            cells,
            len,
        }
    }
}

/// Read-only view of a game for renderers and observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Total rows, hidden buffer included
    pub height: usize,
    pub width: usize,
    pub hidden_rows: usize,
    /// Row-major filled cells, `height * width` long
    pub board: Vec<bool>,
    pub active: Option<ActiveSnapshot>,
    /// Resting row of the active piece's anchor
    pub ghost_row: Option<i32>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next: Vec<PieceKind>,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub last_clear: ClearKind,
    /// Score needed for the next level, `None` at the top level
    pub next_level_at: Option<u64>,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn cell(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.board[row * self.width + col]
    }

    pub fn visible_height(&self) -> usize {
        self.height.saturating_sub(self.hidden_rows)
    }

    /// Absolute cells of the active piece moved down to its ghost row
    pub fn ghost_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let shift = match (self.active, self.ghost_row) {
            (Some(a), Some(g)) => Some(g - a.row),
            _ => None,
        };
        self.active
            .iter()
            .flat_map(|a| a.cells().iter().copied())
            .filter_map(move |(r, c)| shift.map(|d| (r + d, c)))
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            height: 0,
            width: 0,
            hidden_rows: 0,
            board: Vec::new(),
            active: None,
            ghost_row: None,
            hold: None,
            can_hold: true,
            next: Vec::new(),
            score: 0,
            level: 0,
            lines: 0,
            combo: 0,
            last_clear: ClearKind::None,
            next_level_at: None,
            paused: false,
            game_over: false,
        }
    }
}
