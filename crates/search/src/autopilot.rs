//! Plan-then-execute driver: plays the planner's choice through the same
//! input calls a human controller would use.

use stacker_core::{ActivePiece, Move, Rotation};
use stacker_engine::{Game, LockOutcome};
use tracing::{debug, warn};

use crate::beam::BeamSearch;
use crate::config::{Difficulty, PlannerConfig};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// The planned placement was played out.
    Placed { planned: Move, lock: LockOutcome },
    /// The inputs could not reach the planned placement; the piece locked
    /// wherever they left it.
    Diverged { planned: Move, lock: LockOutcome },
    /// Nowhere to go; the piece was locked where it stood.
    ForcedLock(LockOutcome),
    /// No active piece to play.
    GameOver,
}

impl StepOutcome {
    pub fn lock(&self) -> Option<&LockOutcome> {
        match self {
            StepOutcome::Placed { lock, .. }
            | StepOutcome::Diverged { lock, .. }
            | StepOutcome::ForcedLock(lock) => Some(lock),
            StepOutcome::GameOver => None,
        }
    }
}

pub struct Autopilot {
    planner: BeamSearch,
}

impl Autopilot {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            planner: BeamSearch::new(config),
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(difficulty.config())
    }

    pub fn planner(&self) -> &BeamSearch {
        &self.planner
    }

    /// Plan for the active piece with the visible preview as lookahead,
    /// hold if that line wins, then play the first move of the best line.
    pub fn step(&self, game: &mut Game) -> StepOutcome {
        if game.is_game_over() {
            return StepOutcome::GameOver;
        }
        let Some(active) = game.active().copied() else {
            return StepOutcome::GameOver;
        };

        let planned = if game.can_hold() {
            self.planner.search_with_hold(
                game.board(),
                game.scoring(),
                active.piece,
                game.hold_piece(),
                game.preview(),
            )
        } else {
            self.planner
                .search(game.board(), game.scoring(), active.piece, game.preview())
        };

        match planned {
            Some(result) => {
                if result.hold && !game.hold() {
                    warn!(piece = %active.piece, "hold rejected");
                }
                execute(game, &result.mv)
            }
            None => {
                warn!(piece = %active.piece, "no placement, locking in place");
                match game.lock_piece() {
                    Some(lock) => StepOutcome::ForcedLock(lock),
                    None => StepOutcome::GameOver,
                }
            }
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

/// Rotate, shift and drop the active piece toward `mv`. Spin finishes drop
/// in their approach state and take the final turn on the ground.
fn execute(game: &mut Game, mv: &Move) -> StepOutcome {
    let (rotation, x) = match mv.approach {
        Some(a) => (a.rotation, a.x),
        None => (mv.rotation, mv.x),
    };

    rotate_to(game, rotation);
    shift_to(game, x);

    let (landed, lock) = match mv.approach {
        None => (game.ghost(), game.hard_drop()),
        Some(approach) => {
            while game.soft_drop() {}
            if !game.rotate(approach.dir) {
                debug!(dir = ?approach.dir, "spin finish rejected");
            }
            (game.active().copied(), game.lock_piece())
        }
    };

    let Some(lock) = lock else {
        return StepOutcome::GameOver;
    };
    match landed {
        Some(piece) if lands_on(&piece, mv) => StepOutcome::Placed { planned: *mv, lock },
        landed => {
            warn!(
                piece = %mv.piece,
                planned_rotation = ?mv.rotation,
                planned_x = mv.x,
                planned_y = mv.y,
                landed = ?landed.map(|p| (p.rotation, p.x, p.y)),
                "planned placement not reached"
            );
            StepOutcome::Diverged { planned: *mv, lock }
        }
    }
}

fn lands_on(piece: &ActivePiece, mv: &Move) -> bool {
    piece.piece == mv.piece && piece.rotation == mv.rotation && piece.x == mv.x && piece.y == mv.y
}

/// Turn the shortest way round.
fn rotate_to(game: &mut Game, target: Rotation) {
    let Some(current) = game.active().map(|p| p.rotation) else {
        return;
    };
    let turned = match current.quarter_turns_to(target) {
        0 => true,
        1 => game.rotate_cw(),
        2 => game.rotate_180(),
        _ => game.rotate_ccw(),
    };
    if !turned {
        debug!(from = ?current, to = ?target, "rotation blocked");
    }
}

fn shift_to(game: &mut Game, target: i8) {
    while let Some(x) = game.active().map(|p| p.x) {
        let moved = match x.cmp(&target) {
            std::cmp::Ordering::Less => game.move_right(),
            std::cmp::Ordering::Greater => game.move_left(),
            std::cmp::Ordering::Equal => return,
        };
        if !moved {
            debug!(x, target, "shift blocked");
            return;
        }
    }
}
