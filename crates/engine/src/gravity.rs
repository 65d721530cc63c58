//! Gravity and lock delay timing.
//!
//! Fall speed is expressed as milliseconds per row and shrinks geometrically
//! with the level.

use serde::{Deserialize, Serialize};

/// Timing configuration for a live game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityConfig {
    /// Milliseconds per row at level 1 (0 = no gravity)
    pub initial_gravity_ms: f32,
    /// Interval multiplier applied per level above 1
    pub gravity_factor: f32,
    /// Lock delay in milliseconds
    pub lock_delay_ms: u32,
    /// Maximum lock delay resets allowed
    pub max_move_resets: u8,
    /// Pieces shown in the preview queue
    pub preview_len: usize,
}

impl GravityConfig {
    /// Standard play: 800 ms per row, 15% faster each level.
    pub fn standard() -> Self {
        Self {
            initial_gravity_ms: 800.0,
            gravity_factor: 0.85,
            lock_delay_ms: 500,
            max_move_resets: 15,
            preview_len: 5,
        }
    }

    /// No gravity - pieces only move on input.
    pub fn gravity_off() -> Self {
        Self {
            initial_gravity_ms: 0.0,
            ..Self::standard()
        }
    }

    pub fn has_gravity(&self) -> bool {
        self.initial_gravity_ms > 0.0
    }

    /// Milliseconds per row at `level` (levels start at 1).
    pub fn gravity_interval_ms(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as i32;
        self.initial_gravity_ms * self.gravity_factor.powi(steps)
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self::standard()
    }
}
