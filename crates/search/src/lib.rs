//! stacker search crate - beam search planner and the autopilot that plays it.

mod autopilot;
mod beam;
mod config;

pub use autopilot::{Autopilot, StepOutcome};
pub use beam::{BeamSearch, SearchResult};
pub use config::{ConfigError, Difficulty, PlannerConfig};
