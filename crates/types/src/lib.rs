//! Shared data types and default tuning constants.
//!
//! Everything here is plain data with no dependencies, so the core, engine,
//! input and terminal crates can all agree on the same vocabulary.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 visible rows, with 4 hidden
//! buffer rows above the visible area where pieces spawn:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 24 rows in total (rows 0-3 hidden, 4-23 visible)
//! - **Spawn position**: row 0, column `(width - 4) / 2`
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DROP_BASE_MS` | 800 | Gravity interval at level 1 |
//! | `DEFAULT_DROP_MIN_MS` | 30 | Gravity interval floor |
//! | `DEFAULT_LOCK_DELAY_MS` | 1000 | Grace window once a piece touches down |
//! | `POLL_MS` | 20 | Input poll granularity of the main loop |
//!
//! # Examples
//!
//! ```
//! use termtris_types::{GameAction, PieceKind, Rotation};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! ```

/// Default visible board height in rows
pub const DEFAULT_BOARD_HEIGHT: u16 = 20;

/// Default board width in columns
pub const DEFAULT_BOARD_WIDTH: u16 = 10;

/// Default number of hidden buffer rows above the visible area
pub const DEFAULT_HIDDEN_ROWS: u16 = 4;

/// Gravity interval at level 1
pub const DEFAULT_DROP_BASE_MS: u64 = 800;

/// Gravity interval floor
pub const DEFAULT_DROP_MIN_MS: u64 = 30;

/// Highest reachable level
pub const DEFAULT_LEVEL_MAX: u32 = 15;

/// Starting level
pub const DEFAULT_LEVEL_INIT: u32 = 1;

/// Score needed to reach level 2
pub const DEFAULT_LEVEL_UP_BASE: f64 = 500.0;

/// Growth factor between consecutive level thresholds
pub const DEFAULT_LEVEL_UP_FACTOR: f64 = 1.5;

/// Number of upcoming pieces shown in the preview queue
pub const DEFAULT_NEXT_COUNT: usize = 4;

/// Grace window once a piece can no longer fall
pub const DEFAULT_LOCK_DELAY_MS: u64 = 1000;

/// Sleep granularity of the main loop while waiting for input
pub const POLL_MS: u64 = 20;

/// Base points for clearing N lines, multiplied by the level
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Extra points for a T-Spin clearing N lines, multiplied by the level
pub const TSPIN_BONUS: [u32; 5] = [400, 700, 900, 1100, 0];

/// Extra points when a lock empties the whole board, multiplied by the level
pub const PERFECT_CLEAR_BONUS: [u32; 5] = [0, 800, 1200, 1800, 2000];

/// Combo bonus per chained clear, multiplied by the level
pub const COMBO_BASE: u32 = 50;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All kinds, in canonical table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use termtris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// Orientation of a piece relative to its spawn matrix
///
/// The cycle goes North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use termtris_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete player intents
///
/// Produced by the input layer and consumed by the engine. `Quit` is
/// handled by the runner; the engine ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the active piece with the hold slot
    Hold,
    /// Toggle pause
    Pause,
    /// Dismiss the pause/help screen
    Confirm,
    /// Start a new session after game over
    Restart,
    /// Leave the program
    Quit,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use termtris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECCW"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "confirm" => Some(GameAction::Confirm),
            "restart" => Some(GameAction::Restart),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Confirm => "confirm",
            GameAction::Restart => "restart",
            GameAction::Quit => "quit",
        }
    }
}

/// Type of the most recent line-clearing lock
///
/// Back-to-back eligibility looks at this value: only `TSpin`, `Tetris`
/// and `BackToBack` keep a chain alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClearKind {
    #[default]
    None,
    Normal,
    TSpin,
    Tetris,
    BackToBack,
}

impl ClearKind {
    /// Whether a following qualifying clear earns the back-to-back bonus
    pub fn chains_back_to_back(&self) -> bool {
        matches!(
            self,
            ClearKind::TSpin | ClearKind::Tetris | ClearKind::BackToBack
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClearKind::None => "none",
            ClearKind::Normal => "normal",
            ClearKind::TSpin => "t-spin",
            ClearKind::Tetris => "tetris",
            ClearKind::BackToBack => "back-to-back",
        }
    }
}

/// Emitted by the engine every time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub tspin: bool,
    pub perfect_clear: bool,
    pub back_to_back: bool,
    /// Combo index used for this lock's bonus (before it was advanced); 0 when
    /// no lines were cleared.
    pub combo: u32,
    pub score_delta: u64,
    pub clear_kind: ClearKind,
    pub level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_level_one_parity() {
        assert_eq!(LINE_SCORES[4], 800);
        assert_eq!(LINE_SCORES[1], 100);
        assert_eq!(TSPIN_BONUS[0], 400);
        assert_eq!(COMBO_BASE, 50);
        assert_eq!(DEFAULT_LOCK_DELAY_MS, 1000);
    }

    #[test]
    fn rotation_cycles_back() {
        let mut r = Rotation::North;
        for _ in 0..4 {
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::North);
        assert_eq!(Rotation::North.rotate_cw().rotate_ccw(), Rotation::North);
    }

    #[test]
    fn action_names_roundtrip() {
        for a in [
            GameAction::MoveLeft,
            GameAction::Hold,
            GameAction::Confirm,
            GameAction::Quit,
        ] {
            assert_eq!(GameAction::from_str(a.as_str()), Some(a));
        }
    }

    #[test]
    fn only_hard_clears_chain_back_to_back() {
        assert!(!ClearKind::None.chains_back_to_back());
        assert!(!ClearKind::Normal.chains_back_to_back());
        assert!(ClearKind::TSpin.chains_back_to_back());
        assert!(ClearKind::Tetris.chains_back_to_back());
        assert!(ClearKind::BackToBack.chains_back_to_back());
    }
}
