//! Game configuration
//!
//! A [`GameConfig`] is built once at startup (from CLI flags, environment or
//! defaults) and handed to [`crate::Game::new`], which validates it. Nothing in
//! the engine reads global settings.

use std::time::Duration;

use thiserror::Error;

use crate::types::{
    COMBO_BASE, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_DROP_BASE_MS,
    DEFAULT_DROP_MIN_MS, DEFAULT_HIDDEN_ROWS, DEFAULT_LEVEL_INIT, DEFAULT_LEVEL_MAX,
    DEFAULT_LEVEL_UP_BASE, DEFAULT_LEVEL_UP_FACTOR, DEFAULT_LOCK_DELAY_MS, DEFAULT_NEXT_COUNT,
    LINE_SCORES, PERFECT_CLEAR_BONUS, TSPIN_BONUS,
};

/// Point tables, indexed by lines cleared (0-4) and multiplied by the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTable {
    pub lines: [u32; 5],
    pub tspin: [u32; 5],
    pub perfect_clear: [u32; 5],
    pub combo_base: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            lines: LINE_SCORES,
            tspin: TSPIN_BONUS,
            perfect_clear: PERFECT_CLEAR_BONUS,
            combo_base: COMBO_BASE,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Visible rows
    pub board_height: u16,
    pub board_width: u16,
    /// Buffer rows above the visible area where pieces spawn
    pub hidden_rows: u16,
    /// Gravity interval at level 1
    pub drop_base: Duration,
    /// Gravity interval floor
    pub drop_min: Duration,
    pub level_max: u32,
    pub initial_level: u32,
    /// Score needed for level 2
    pub level_up_base: f64,
    /// Growth between consecutive level thresholds
    pub level_up_factor: f64,
    /// Length of the preview queue
    pub next_count: usize,
    /// Grace window between touching down and locking
    pub lock_delay: Duration,
    pub scores: ScoreTable,
    /// Fixed bag seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_height: DEFAULT_BOARD_HEIGHT,
            board_width: DEFAULT_BOARD_WIDTH,
            hidden_rows: DEFAULT_HIDDEN_ROWS,
            drop_base: Duration::from_millis(DEFAULT_DROP_BASE_MS),
            drop_min: Duration::from_millis(DEFAULT_DROP_MIN_MS),
            level_max: DEFAULT_LEVEL_MAX,
            initial_level: DEFAULT_LEVEL_INIT,
            level_up_base: DEFAULT_LEVEL_UP_BASE,
            level_up_factor: DEFAULT_LEVEL_UP_FACTOR,
            next_count: DEFAULT_NEXT_COUNT,
            lock_delay: Duration::from_millis(DEFAULT_LOCK_DELAY_MS),
            scores: ScoreTable::default(),
            seed: None,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {height} rows x {width} columns")]
    EmptyBoard { height: u16, width: u16 },
    #[error("board width must be at least 4 columns, got {0}")]
    BoardTooNarrow(u16),
    #[error("board must have at least 4 rows including hidden rows, got {0}")]
    BoardTooShort(usize),
    #[error("{0} drop interval must be positive")]
    ZeroDropInterval(&'static str),
    #[error("minimum drop interval {min:?} exceeds base drop interval {base:?}")]
    DropMinAboveBase { min: Duration, base: Duration },
    #[error("max level must be at least 1")]
    ZeroLevelMax,
    #[error("initial level {level} is outside 1..={max}")]
    InitialLevelOutOfRange { level: u32, max: u32 },
    #[error("next queue must hold at least one piece")]
    EmptyNextQueue,
    #[error("level-up base must be a positive finite number, got {0}")]
    InvalidLevelUpBase(f64),
    #[error("level-up factor must be a finite number >= 1, got {0}")]
    InvalidLevelUpFactor(f64),
}

impl GameConfig {
    /// Rows of the board including the hidden buffer
    pub fn total_height(&self) -> usize {
        self.board_height as usize + self.hidden_rows as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_height == 0 || self.board_width == 0 {
            return Err(ConfigError::EmptyBoard {
                height: self.board_height,
                width: self.board_width,
            });
        }
        if self.board_width < 4 {
            return Err(ConfigError::BoardTooNarrow(self.board_width));
        }
        if self.total_height() < 4 {
            return Err(ConfigError::BoardTooShort(self.total_height()));
        }
        if self.drop_base.is_zero() {
            return Err(ConfigError::ZeroDropInterval("base"));
        }
        if self.drop_min.is_zero() {
            return Err(ConfigError::ZeroDropInterval("minimum"));
        }
        if self.drop_min > self.drop_base {
            return Err(ConfigError::DropMinAboveBase {
                min: self.drop_min,
                base: self.drop_base,
            });
        }
        if self.level_max == 0 {
            return Err(ConfigError::ZeroLevelMax);
        }
        if self.initial_level == 0 || self.initial_level > self.level_max {
            return Err(ConfigError::InitialLevelOutOfRange {
                level: self.initial_level,
                max: self.level_max,
            });
        }
        if self.next_count == 0 {
            return Err(ConfigError::EmptyNextQueue);
        }
        if !self.level_up_base.is_finite() || self.level_up_base <= 0.0 {
            return Err(ConfigError::InvalidLevelUpBase(self.level_up_base));
        }
        if !self.level_up_factor.is_finite() || self.level_up_factor < 1.0 {
            return Err(ConfigError::InvalidLevelUpFactor(self.level_up_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.total_height(), 24);
    }

    #[test]
    fn rejects_empty_board() {
        let config = GameConfig {
            board_width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyBoard {
                height: 20,
                width: 0
            })
        );
    }

    #[test]
    fn rejects_narrow_and_short_boards() {
        let narrow = GameConfig {
            board_width: 3,
            ..GameConfig::default()
        };
        assert_eq!(narrow.validate(), Err(ConfigError::BoardTooNarrow(3)));

        let short = GameConfig {
            board_height: 2,
            hidden_rows: 1,
            ..GameConfig::default()
        };
        assert_eq!(short.validate(), Err(ConfigError::BoardTooShort(3)));
    }

    #[test]
    fn rejects_inverted_drop_intervals() {
        let config = GameConfig {
            drop_min: Duration::from_millis(900),
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DropMinAboveBase { .. })
        ));
    }

    #[test]
    fn rejects_initial_level_out_of_range() {
        let config = GameConfig {
            initial_level: 16,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialLevelOutOfRange { level: 16, max: 15 })
        );
    }

    #[test]
    fn rejects_shrinking_level_factor() {
        let config = GameConfig {
            level_up_factor: 0.5,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLevelUpFactor(0.5))
        );
    }

    #[test]
    fn error_messages_name_the_field() {
        let msg = ConfigError::BoardTooNarrow(2).to_string();
        assert!(msg.contains("width"));
        let msg = ConfigError::EmptyNextQueue.to_string();
        assert!(msg.contains("next queue"));
    }
}
