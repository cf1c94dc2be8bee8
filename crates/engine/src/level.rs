//! Level progression and gravity speed
//!
//! Both curves are computed once per session and cached in a [`LevelCurve`];
//! the engine only indexes into them while playing.
//!
//! - **Thresholds**: level 1 starts at 0 points; level `n >= 2` needs
//!   `round(base * factor^(n - 2))` points (500, 750, 1125, ... by default).
//! - **Gravity**: starts at the base interval and shrinks per level in three
//!   regimes: gentle through level 5, steep through level 10, moderate after,
//!   never below the configured minimum.

use std::time::Duration;

use crate::config::GameConfig;

/// (last level of the regime, per-level decay)
const GRAVITY_REGIMES: [(u32, f64); 3] = [(5, 0.90), (10, 0.75), (u32::MAX, 0.85)];

fn gravity_decay(level: u32) -> f64 {
    GRAVITY_REGIMES
        .iter()
        .find(|&&(last, _)| level <= last)
        .map(|&(_, decay)| decay)
        .unwrap_or(1.0)
}

/// Precomputed score thresholds and drop intervals, indexed by level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCurve {
    /// `thresholds[level]`; index 0 is unused
    thresholds: Vec<u64>,
    /// `intervals[level]`; index 0 is unused
    intervals: Vec<Duration>,
}

impl LevelCurve {
    pub fn new(config: &GameConfig) -> Self {
        let max = config.level_max;

        let thresholds = (0..=max)
            .map(|level| {
                if level < 2 {
                    0
                } else {
                    let t = config.level_up_base * config.level_up_factor.powi(level as i32 - 2);
                    t.round() as u64
                }
            })
            .collect();

        let mut nanos = config.drop_base.as_nanos() as f64;
        let mut intervals = Vec::with_capacity(max as usize + 1);
        for level in 0..=max {
            if level >= 2 {
                nanos *= gravity_decay(level);
            }
            let interval = Duration::from_nanos(nanos.round() as u64).max(config.drop_min);
            intervals.push(interval);
        }

        Self {
            thresholds,
            intervals,
        }
    }

    pub fn max_level(&self) -> u32 {
        (self.thresholds.len() - 1) as u32
    }

    /// Minimum score for `level` (clamped to the table)
    pub fn threshold(&self, level: u32) -> u64 {
        let i = (level as usize).min(self.thresholds.len() - 1);
        self.thresholds[i]
    }

    /// Gravity interval at `level` (clamped to the table)
    pub fn drop_interval(&self, level: u32) -> Duration {
        let i = (level as usize).min(self.intervals.len() - 1);
        self.intervals[i]
    }

    /// Climb from `current` while `score` meets each successive threshold.
    ///
    /// Several levels can be gained at once; the result never exceeds the
    /// maximum level and never drops below `current`.
    pub fn level_for(&self, current: u32, score: u64) -> u32 {
        let mut level = current;
        while level < self.max_level() && score >= self.threshold(level + 1) {
            level += 1;
        }
        level
    }

    /// Score needed for the level after `level`, if there is one
    pub fn next_threshold(&self, level: u32) -> Option<u64> {
        (level < self.max_level()).then(|| self.threshold(level + 1))
    }
}
