//! Command line and environment configuration.
//!
//! Every flag has a `TETRIS_*` environment fallback and a built-in default,
//! in that order of precedence after the flag itself.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::GameConfig;
use crate::term::{BorderChars, Glyphs};
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_DROP_BASE_MS, DEFAULT_DROP_MIN_MS,
    DEFAULT_HIDDEN_ROWS, DEFAULT_LEVEL_INIT, DEFAULT_LEVEL_MAX, DEFAULT_LEVEL_UP_BASE,
    DEFAULT_LEVEL_UP_FACTOR, DEFAULT_LOCK_DELAY_MS, DEFAULT_NEXT_COUNT,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "termtris", version)]
#[command(about = "Falling-block puzzle game for the terminal")]
pub struct Args {
    /// Visible rows
    #[arg(long, env = "TETRIS_BOARD_HEIGHT", default_value_t = DEFAULT_BOARD_HEIGHT)]
    pub board_height: u16,

    /// Columns
    #[arg(long, env = "TETRIS_BOARD_WIDTH", default_value_t = DEFAULT_BOARD_WIDTH)]
    pub board_width: u16,

    /// Buffer rows above the visible area
    #[arg(long, env = "TETRIS_HIDDEN_ROWS", default_value_t = DEFAULT_HIDDEN_ROWS)]
    pub hidden_rows: u16,

    /// Gravity interval at level 1, in milliseconds
    #[arg(long, env = "TETRIS_DROP_BASE_MS", default_value_t = DEFAULT_DROP_BASE_MS)]
    pub drop_base_ms: u64,

    /// Fastest gravity interval, in milliseconds
    #[arg(long, env = "TETRIS_DROP_MIN_MS", default_value_t = DEFAULT_DROP_MIN_MS)]
    pub drop_min_ms: u64,

    #[arg(long, env = "TETRIS_LEVEL_MAX", default_value_t = DEFAULT_LEVEL_MAX)]
    pub level_max: u32,

    #[arg(long, env = "TETRIS_LEVEL_INIT", default_value_t = DEFAULT_LEVEL_INIT)]
    pub initial_level: u32,

    /// Score needed for level 2
    #[arg(long, env = "TETRIS_LEVEL_UP_BASE", default_value_t = DEFAULT_LEVEL_UP_BASE)]
    pub level_up_base: f64,

    /// Growth between consecutive level thresholds
    #[arg(long, env = "TETRIS_LEVEL_UP_FACTOR", default_value_t = DEFAULT_LEVEL_UP_FACTOR)]
    pub level_up_factor: f64,

    /// Pieces shown in the preview queue
    #[arg(long, env = "TETRIS_NEXT_COUNT", default_value_t = DEFAULT_NEXT_COUNT)]
    pub next_count: usize,

    /// Grace window after touching down, in milliseconds
    #[arg(long, env = "TETRIS_LOCK_DELAY_MS", default_value_t = DEFAULT_LOCK_DELAY_MS)]
    pub lock_delay_ms: u64,

    /// Fixed piece sequence seed
    #[arg(long, env = "TETRIS_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "TETRIS_BLOCK_CHAR", default_value_t = '■')]
    pub block_char: char,

    #[arg(long, env = "TETRIS_GHOST_CHAR", default_value_t = '⧄')]
    pub ghost_char: char,

    #[arg(long, env = "TETRIS_EMPTY_CHAR", default_value_t = ' ')]
    pub empty_char: char,

    /// Six border characters: top-left, top-right, bottom-left, bottom-right, horizontal, vertical
    #[arg(long, env = "TETRIS_BORDER", default_value = "┌┐└┘─│", value_parser = parse_border)]
    pub border: BorderChars,

    /// Append one JSON record per session event to this file
    #[arg(long, env = "TETRIS_LOG_PATH")]
    pub log_path: Option<PathBuf>,
}

impl Args {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            board_height: self.board_height,
            board_width: self.board_width,
            hidden_rows: self.hidden_rows,
            drop_base: Duration::from_millis(self.drop_base_ms),
            drop_min: Duration::from_millis(self.drop_min_ms),
            level_max: self.level_max,
            initial_level: self.initial_level,
            level_up_base: self.level_up_base,
            level_up_factor: self.level_up_factor,
            next_count: self.next_count,
            lock_delay: Duration::from_millis(self.lock_delay_ms),
            seed: self.seed,
            ..GameConfig::default()
        }
    }

    pub fn glyphs(&self) -> Glyphs {
        Glyphs {
            block: self.block_char,
            ghost: self.ghost_char,
            empty: self.empty_char,
            border: self.border,
        }
    }
}

fn parse_border(s: &str) -> Result<BorderChars, String> {
    let chars: Vec<char> = s.chars().collect();
    let [top_left, top_right, bottom_left, bottom_right, horizontal, vertical] = chars[..] else {
        return Err(format!("expected 6 border characters, got {}", chars.len()));
    };
    Ok(BorderChars {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
        horizontal,
        vertical,
    })
}
