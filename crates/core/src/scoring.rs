//! Scoring module - points, leveling and tick speed
//!
//! - Every locked piece is worth a flat bonus.
//! - Every cleared row is worth a flat bonus (no multi-line multiplier).
//! - The level goes up by one when cumulative lines reach `level * lines_per_level`.
//!   This is a single check per lock, so one big clear can never skip a level.
//! - The tick interval shrinks by a fixed step per level down to a floor.

use crate::types::{
    BASE_TICK_MS, LINES_PER_LEVEL, LINE_CLEAR_BONUS, LOCK_BONUS, MIN_TICK_MS, TICK_STEP_MS,
};

/// Tunable game rules. `Default` is the canonical rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub lock_bonus: u32,
    pub line_clear_bonus: u32,
    pub lines_per_level: u32,
    pub base_tick_ms: u32,
    pub tick_step_ms: u32,
    pub min_tick_ms: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            lock_bonus: LOCK_BONUS,
            line_clear_bonus: LINE_CLEAR_BONUS,
            lines_per_level: LINES_PER_LEVEL,
            base_tick_ms: BASE_TICK_MS,
            tick_step_ms: TICK_STEP_MS,
            min_tick_ms: MIN_TICK_MS,
        }
    }
}

impl Rules {
    pub fn with_lines_per_level(mut self, lines_per_level: u32) -> Self {
        self.lines_per_level = lines_per_level.max(1);
        self
    }

    /// Points for clearing `rows` rows at once
    pub fn line_clear_score(&self, rows: usize) -> u32 {
        self.line_clear_bonus.saturating_mul(rows as u32)
    }

    /// Level after a lock, given the cumulative line count.
    ///
    /// Advances by at most one step no matter how many thresholds were crossed.
    pub fn next_level(&self, level: u32, total_lines: u32) -> u32 {
        if total_lines >= level.saturating_mul(self.lines_per_level) {
            level + 1
        } else {
            level
        }
    }

    /// Tick interval for a level (1-based), clamped at the floor.
    pub fn tick_interval_ms(&self, level: u32) -> u32 {
        let reduction = level.saturating_sub(1).saturating_mul(self.tick_step_ms);
        self.base_tick_ms
            .saturating_sub(reduction)
            .max(self.min_tick_ms)
    }
}
