use crate::movement::detect_tspin;
use serde::{Deserialize, Serialize};
use stacker_core::{ActivePiece, Board, Move, TSpin};

/// What a single lock did to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockResult {
    pub lines_cleared: u8,
    pub tspin: TSpin,
    /// Board is completely empty after the clear.
    pub perfect_clear: bool,
}

/// Lock `piece` into the grid, classify the T-spin and remove full rows.
///
/// The spin is classified against the board before the piece is written,
/// so the piece's own cells never count as corners.
pub fn lock_and_resolve(board: &mut Board, piece: &ActivePiece) -> LockResult {
    let tspin = detect_tspin(board, piece);
    board.place(piece);
    let lines_cleared = board.clear_lines();
    LockResult {
        lines_cleared,
        tspin,
        perfect_clear: lines_cleared > 0 && board.is_empty(),
    }
}

/// Apply a move to a copy of the board and return the resulting board and lock result.
pub fn apply_move(board: &Board, mv: &Move) -> (Board, LockResult) {
    let mut next = board.clone();
    let result = lock_and_resolve(&mut next, &mv.to_piece());
    (next, result)
}
