//! Placement enumeration for a piece on a board.
//!
//! Every rotation state is tried at every column offset and hard-dropped
//! from the top row. Rotation here is geometric: kicks only come into play
//! for spin finishes, which need an actual rotation at the landing spot.

use crate::collision::{hard_drop_y, is_grounded};
use crate::move_list::MoveList;
use crate::movement::{detect_tspin, try_rotate};
use stacker_core::{ActivePiece, Approach, Board, Move, Piece, RotateDir};

/// Leftmost anchor worth trying; every shape has a cell within 3 of its box edge.
const MIN_X: i8 = -3;

/// All hard-drop placements of `piece`, no duplicates by (rotation, x, y).
/// An empty list means the piece has nowhere to go.
pub fn enumerate(board: &Board, piece: Piece) -> MoveList {
    let mut moves = MoveList::new();

    for &rotation in piece.distinct_rotations() {
        for x in MIN_X..Board::WIDTH as i8 {
            let start = ActivePiece::new(piece, rotation, x, 0);
            if !board.is_valid_placement(&start) {
                continue;
            }
            let y = hard_drop_y(board, &start);
            moves.push(Move::new(piece, rotation, x, y));
        }
    }

    moves
}

/// Like [`enumerate`], plus T placements finished by one kicked rotation at
/// the landing spot that score as a T-spin. A spin finish that ends on a
/// plain placement replaces it.
pub fn enumerate_with_spins(board: &Board, piece: Piece) -> MoveList {
    let mut moves = enumerate(board, piece);
    if piece != Piece::T {
        return moves;
    }

    let plain = moves.clone();
    for landing in &plain {
        let resting = landing.to_piece();
        for dir in [RotateDir::Cw, RotateDir::Ccw] {
            let Some(result) = try_rotate(board, &resting, dir) else {
                continue;
            };
            let spun = result.piece;
            if !is_grounded(board, &spun) || !detect_tspin(board, &spun).is_spin() {
                continue;
            }
            moves.upsert(Move::new(piece, spun.rotation, spun.x, spun.y).with_approach(Approach {
                rotation: landing.rotation,
                x: landing.x,
                dir,
            }));
        }
    }

    moves
}
