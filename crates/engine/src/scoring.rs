//! Scoring module - line clears, T-Spins, Back-to-Back, Perfect Clear, Combo
//!
//! Every component is level-scaled. For a lock that clears `n` lines:
//!
//! - base: `lines[n] * level`
//! - T-Spin bonus: `tspin[n] * level`, only for a confirmed T-Spin
//! - Back-to-Back: half of base + T-Spin bonus, when this clear qualifies
//!   (T-Spin with lines, or four lines) and the previous line-clearing lock
//!   was a T-Spin, Tetris or Back-to-Back
//! - Perfect Clear: `perfect_clear[n] * level` when the board ends up empty
//! - Combo: `combo_base * combo * level` when lines were cleared, where
//!   `combo` counts the clears immediately preceding this one

use crate::config::ScoreTable;
use crate::types::ClearKind;

/// Everything scoring needs to know about one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreInput {
    pub lines: u32,
    pub level: u32,
    pub tspin: bool,
    pub perfect_clear: bool,
    /// Combo counter before this lock
    pub combo: u32,
    /// Type of the previous line-clearing lock
    pub last_clear: ClearKind,
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub base: u64,
    pub tspin_bonus: u64,
    pub back_to_back_bonus: u64,
    pub perfect_clear_bonus: u64,
    pub combo_bonus: u64,
    pub total: u64,
    pub qualifies_for_b2b: bool,
    pub b2b_applied: bool,
    /// Combo counter after this lock
    pub next_combo: u32,
    /// Clear type to remember after this lock
    pub clear_kind: ClearKind,
}

fn tier(table: &[u32; 5], lines: u32) -> u64 {
    table[(lines as usize).min(table.len() - 1)] as u64
}

/// Base points for clearing `lines` at `level`
pub fn line_score(table: &ScoreTable, lines: u32, level: u32) -> u64 {
    tier(&table.lines, lines) * level as u64
}

/// Extra T-Spin points for `lines` at `level`
pub fn tspin_bonus(table: &ScoreTable, lines: u32, level: u32) -> u64 {
    tier(&table.tspin, lines) * level as u64
}

/// Extra Perfect Clear points for `lines` at `level`
pub fn perfect_clear_bonus(table: &ScoreTable, lines: u32, level: u32) -> u64 {
    tier(&table.perfect_clear, lines) * level as u64
}

/// Combo points; nothing for the first clear of a chain
pub fn combo_bonus(table: &ScoreTable, combo: u32, level: u32) -> u64 {
    table.combo_base as u64 * combo as u64 * level as u64
}

/// A "hard" clear: T-Spin with lines, or four lines at once
pub fn qualifies_for_b2b(tspin: bool, lines: u32) -> bool {
    lines > 0 && (tspin || lines >= 4)
}

/// Clear type to record after a lock; unchanged when nothing was cleared
pub fn next_clear_kind(previous: ClearKind, lines: u32, tspin: bool, b2b_applied: bool) -> ClearKind {
    if lines == 0 {
        previous
    } else if b2b_applied {
        ClearKind::BackToBack
    } else if tspin {
        ClearKind::TSpin
    } else if lines >= 4 {
        ClearKind::Tetris
    } else {
        ClearKind::Normal
    }
}

/// Calculate the complete score of one lock
pub fn calculate_score(table: &ScoreTable, input: ScoreInput) -> ScoreResult {
    let ScoreInput {
        lines,
        level,
        tspin,
        perfect_clear,
        combo,
        last_clear,
    } = input;

    let base = line_score(table, lines, level);
    let spin = if tspin {
        tspin_bonus(table, lines, level)
    } else {
        0
    };

    let qualifies = qualifies_for_b2b(tspin, lines);
    let b2b_applied = qualifies && last_clear.chains_back_to_back();
    let back_to_back_bonus = if b2b_applied { (base + spin) / 2 } else { 0 };

    let perfect = if perfect_clear {
        perfect_clear_bonus(table, lines, level)
    } else {
        0
    };

    let (combo_points, next_combo) = if lines > 0 {
        (combo_bonus(table, combo, level), combo + 1)
    } else {
        (0, 0)
    };

    ScoreResult {
        base,
        tspin_bonus: spin,
        back_to_back_bonus,
        perfect_clear_bonus: perfect,
        combo_bonus: combo_points,
        total: base + spin + back_to_back_bonus + perfect + combo_points,
        qualifies_for_b2b: qualifies,
        b2b_applied,
        next_combo,
        clear_kind: next_clear_kind(last_clear, lines, tspin, b2b_applied),
    }
}
