//! Planner configuration and named difficulty presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stacker_eval::EvalWeights;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty {0:?}, expected easy, medium, hard or expert")]
    UnknownDifficulty(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Pieces searched, the current one included.
    pub depth: usize,
    /// Nodes kept after each depth.
    pub beam_width: usize,
    pub weights: EvalWeights,
    /// Also consider T placements finished by a rotation.
    pub spins: bool,
    /// Also weigh putting the current piece on hold.
    pub hold: bool,
    /// Expand beam nodes on the rayon pool when built with `parallel`.
    pub parallel: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Difficulty::Medium.config()
    }
}

impl PlannerConfig {
    pub fn new(depth: usize, beam_width: usize) -> Self {
        Self {
            depth: depth.max(1),
            beam_width: beam_width.max(1),
            ..Self::default()
        }
    }

    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_spins(mut self, spins: bool) -> Self {
        self.spins = spins;
        self
    }

    pub fn with_hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

/// Per-feature multipliers applied to the default weights.
struct WeightScale {
    lines: f32,
    height: f32,
    holes: f32,
    bumpiness: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn beam_width(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
            Difficulty::Expert => 16,
        }
    }

    pub fn depth(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// Spin finishes are searched above easy.
    pub fn advanced(self) -> bool {
        self != Difficulty::Easy
    }

    fn scale(self) -> WeightScale {
        let (lines, height, holes, bumpiness) = match self {
            Difficulty::Easy => (0.6, 0.5, 0.4, 0.3),
            Difficulty::Medium => (0.7, 0.6, 0.6, 0.5),
            Difficulty::Hard => (0.8, 0.7, 0.8, 0.7),
            Difficulty::Expert => (1.0, 0.9, 1.0, 0.9),
        };
        WeightScale {
            lines,
            height,
            holes,
            bumpiness,
        }
    }

    pub fn weights(self) -> EvalWeights {
        let s = self.scale();
        EvalWeights::default().scaled(s.lines, s.height, s.holes, s.bumpiness)
    }

    pub fn config(self) -> PlannerConfig {
        PlannerConfig {
            depth: self.depth(),
            beam_width: self.beam_width(),
            weights: self.weights(),
            spins: self.advanced(),
            hold: true,
            parallel: true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
