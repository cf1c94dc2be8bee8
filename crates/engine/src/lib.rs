//! Game engine - rules, timing and scoring on top of the core model
//!
//! # Module Structure
//!
//! - [`config`]: validated [`GameConfig`] and the [`ScoreTable`]
//! - [`scoring`]: per-lock score computation (T-Spin, Back-to-Back, Combo, Perfect Clear)
//! - [`level`]: precomputed level thresholds and gravity intervals
//! - [`clock`]: [`Clock`] trait with monotonic and manual implementations
//! - [`game`]: the [`Game`] state machine
//! - [`snapshot`]: read-only [`GameSnapshot`] for renderers
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use termtris_engine::{Clock, Game, GameConfig, ManualClock};
//! use termtris_types::GameAction;
//!
//! let clock = ManualClock::new();
//! let config = GameConfig { seed: Some(1), ..GameConfig::default() };
//! let mut game = Game::new(config, clock.now()).unwrap();
//!
//! assert!(game.apply_action(GameAction::MoveLeft, clock.now()));
//! assert!(game.tick(clock.advance(Duration::from_millis(800))));
//! assert_eq!(game.active().unwrap().row, 1);
//! ```

pub mod clock;
pub mod config;
pub mod game;
pub mod level;
pub mod scoring;
pub mod snapshot;

pub use termtris_core as core;
pub use termtris_types as types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ConfigError, GameConfig, ScoreTable};
pub use game::{Game, Phase};
pub use level::LevelCurve;
pub use scoring::{calculate_score, ScoreInput, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
