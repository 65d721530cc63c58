//! Score, level, combo and back-to-back bookkeeping.

use serde::{Deserialize, Serialize};
use stacker_core::TSpin;

pub const LINES_PER_LEVEL: u32 = 10;
pub const MAX_LEVEL: u32 = 15;
pub const COMBO_BONUS: u32 = 50;
pub const SOFT_DROP_POINTS: u32 = 1;
pub const HARD_DROP_POINTS: u32 = 2;

/// Plain clear points by lines (index 0 unused).
const LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];
/// T-spin points by lines, including the zero-line spin.
const TSPIN_POINTS: [u32; 4] = [400, 800, 1200, 1600];
const TSPIN_MINI_POINTS: [u32; 3] = [100, 200, 400];

/// Running score state for one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: u32,
    /// Last line-clearing lock was a tetris or a T-spin.
    pub back_to_back: bool,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            combo: 0,
            back_to_back: false,
        }
    }
}

/// Base points for a lock before level scaling.
pub fn base_points(lines: u8, tspin: TSpin) -> u32 {
    let lines = lines as usize;
    match tspin {
        TSpin::Mini if lines < TSPIN_MINI_POINTS.len() => TSPIN_MINI_POINTS[lines],
        TSpin::Normal if lines < TSPIN_POINTS.len() => TSPIN_POINTS[lines],
        _ => LINE_POINTS.get(lines).copied().unwrap_or(0),
    }
}

/// Tetrises and T-spins continue a back-to-back chain.
pub fn is_special(lines: u8, tspin: TSpin) -> bool {
    lines == 4 || tspin.is_spin()
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one lock and return the points it earned.
    ///
    /// Lines and level advance first, so a clear that crosses a level
    /// boundary is paid at the new level.
    pub fn apply_score(&mut self, lines: u8, tspin: TSpin) -> u32 {
        if lines > 0 {
            self.lines += lines as u32;
            self.level = (1 + self.lines / LINES_PER_LEVEL).min(MAX_LEVEL);
        }

        let mut points = base_points(lines, tspin) * self.level;
        let special = is_special(lines, tspin);

        if lines > 0 {
            if special && self.back_to_back {
                points = points * 3 / 2;
            }
            self.back_to_back = special;
            self.combo += 1;
            points += COMBO_BONUS * self.combo * self.level;
        } else {
            self.combo = 0;
        }

        self.score += points;
        points
    }

    /// Soft drops pay per cell, hard drops double that.
    pub fn add_drop_points(&mut self, cells: u32, hard: bool) -> u32 {
        let per_cell = if hard {
            HARD_DROP_POINTS
        } else {
            SOFT_DROP_POINTS
        };
        let points = cells * per_cell;
        self.score += points;
        points
    }
}
