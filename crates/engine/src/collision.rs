//! collision helpers - walls, floor, other blocks

use stacker_core::{ActivePiece, Board};

/// does piece collide with anything?
#[inline(always)]
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    !board.is_valid_placement(piece)
}

/// Resting on the stack or floor: one row lower would collide.
#[inline]
pub fn is_grounded(board: &Board, piece: &ActivePiece) -> bool {
    collides(board, &piece.shifted(0, 1))
}

/// Landing anchor y of a hard drop: the largest y reachable by falling
/// from the piece's current position.
#[inline]
pub fn hard_drop_y(board: &Board, piece: &ActivePiece) -> i8 {
    let mut probe = *piece;
    while board.is_valid_placement(&probe.shifted(0, 1)) {
        probe.y += 1;
    }
    probe.y
}

/// Rows the piece would fall on a hard drop.
pub fn drop_distance(board: &Board, piece: &ActivePiece) -> u8 {
    (hard_drop_y(board, piece) - piece.y) as u8
}
