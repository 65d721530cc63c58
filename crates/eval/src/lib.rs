//! stacker eval crate - heuristics for board evaluation.
//!
//! A position is scored as a weighted sum of structural features of the
//! board left behind by a lock, plus rewards for what the lock achieved.

use serde::{Deserialize, Serialize};
use stacker_core::{Board, BoardWithHeights, TSpin};

/// How well depths are turned into a feature value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WellScoring {
    /// Sum of depths
    Linear,
    /// Sum of depth * (depth + 1) / 2, favouring one deep well
    #[default]
    Triangular,
}

impl WellScoring {
    fn score(self, depth: u8) -> f32 {
        let d = depth as f32;
        match self {
            WellScoring::Linear => d,
            WellScoring::Triangular => d * (d + 1.0) / 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub height: f32,
    pub lines: f32,
    pub holes: f32,
    pub bumpiness: f32,
    pub wells: f32,
    pub tspin: f32,
    pub combo: f32,
    pub perfect_clear: f32,
    pub well_scoring: WellScoring,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            height: -0.51,
            lines: 0.76,
            holes: -0.9,
            bumpiness: -0.18,
            wells: 0.02,
            tspin: 1.0,
            combo: 0.2,
            perfect_clear: 5.0,
            well_scoring: WellScoring::Triangular,
        }
    }
}

impl EvalWeights {
    /// Height, lines, holes and bumpiness only, the four-feature set the
    /// other weights are tuned around.
    pub fn classic() -> Self {
        Self {
            height: -0.51,
            lines: 0.76,
            holes: -0.36,
            bumpiness: -0.18,
            wells: 0.0,
            tspin: 0.0,
            combo: 0.0,
            perfect_clear: 0.0,
            well_scoring: WellScoring::Linear,
        }
    }

    /// Scale the four core weights, leaving the bonus weights alone.
    pub fn scaled(mut self, lines: f32, height: f32, holes: f32, bumpiness: f32) -> Self {
        self.lines *= lines;
        self.height *= height;
        self.holes *= holes;
        self.bumpiness *= bumpiness;
        self
    }
}

/// What the lock that produced the board did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalContext {
    pub lines_cleared: u8,
    pub tspin: TSpin,
    /// Combo counter after the lock.
    pub combo: u32,
}

/// Raw feature values, before weighting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Features {
    pub aggregate_height: f32,
    pub holes: f32,
    pub bumpiness: f32,
    pub wells: f32,
    pub lines: f32,
    pub tspin: f32,
    pub combo: f32,
    pub perfect_clear: f32,
}

impl Features {
    pub fn extract(board: &Board, ctx: &EvalContext, wells: WellScoring) -> Self {
        let bh = BoardWithHeights::new(board);
        let lines = ctx.lines_cleared as f32;
        let tspin = match ctx.tspin {
            TSpin::None => 0.0,
            TSpin::Mini => 0.5 * lines,
            TSpin::Normal => lines,
        };
        Self {
            aggregate_height: bh.aggregate_height() as f32,
            holes: bh.holes() as f32,
            bumpiness: bh.bumpiness() as f32,
            wells: bh.well_depths().iter().map(|&d| wells.score(d)).sum(),
            lines,
            tspin,
            combo: ctx.combo as f32,
            perfect_clear: if board.is_empty() { 1.0 } else { 0.0 },
        }
    }

    pub fn weighted(&self, weights: &EvalWeights) -> f32 {
        self.aggregate_height * weights.height
            + self.holes * weights.holes
            + self.bumpiness * weights.bumpiness
            + self.wells * weights.wells
            + self.lines * weights.lines
            + self.tspin * weights.tspin
            + self.combo * weights.combo
            + self.perfect_clear * weights.perfect_clear
    }
}

/// Score the board left by a lock. Higher is better.
pub fn evaluate(board: &Board, ctx: &EvalContext, weights: &EvalWeights) -> f32 {
    Features::extract(board, ctx, weights.well_scoring).weighted(weights)
}
