//! stacker-engine - game rules and simulation.
//!
//! Provides SRS rotation with kicks, movement, T-spin detection, line
//! resolution, scoring, the 7-bag, placement enumeration and the live game.

pub mod apply;
pub mod bag;
pub mod collision;
pub mod game;
pub mod gravity;
pub mod kicks;
pub mod move_list;
pub mod movegen;
pub mod movement;
pub mod scoring;

pub use apply::{apply_move, lock_and_resolve, LockResult};
pub use bag::SevenBag;
pub use collision::{collides, drop_distance, hard_drop_y, is_grounded};
pub use game::{Game, GameSnapshot, LockOutcome};
pub use gravity::GravityConfig;
pub use kicks::get_kicks;
pub use move_list::{MoveList, MAX_MOVES};
pub use movegen::{enumerate, enumerate_with_spins};
pub use movement::{
    detect_tspin, try_drop, try_move, try_rotate, try_rotate_180, try_rotate_to, RotationResult,
};
pub use scoring::ScoreTracker;
