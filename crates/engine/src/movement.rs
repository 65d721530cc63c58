//! Rotation and movement logic with kick application.

use crate::collision::collides;
use crate::kicks::get_kicks;
use stacker_core::{ActivePiece, Board, Piece, RotateDir, Rotation, TSpin};

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub piece: ActivePiece,
    /// 0 when the piece turned in place, otherwise 1-based index into the kick table.
    pub kick_index: usize,
}

/// Try to rotate a piece a quarter turn, applying kicks if necessary.
/// Returns None if rotation is not possible.
pub fn try_rotate(board: &Board, piece: &ActivePiece, dir: RotateDir) -> Option<RotationResult> {
    let to = match dir {
        RotateDir::Cw => piece.rotation.cw(),
        RotateDir::Ccw => piece.rotation.ccw(),
    };
    try_rotate_to(board, piece, to)
}

/// Try 180 rotation (SRS+ feature)
pub fn try_rotate_180(board: &Board, piece: &ActivePiece) -> Option<RotationResult> {
    try_rotate_to(board, piece, piece.rotation.flip())
}

/// Try to rotate to a specific rotation state.
/// The first kick offset whose rotated shape fits wins.
pub fn try_rotate_to(board: &Board, piece: &ActivePiece, to: Rotation) -> Option<RotationResult> {
    let turned = ActivePiece {
        rotation: to,
        rotated_last: true,
        ..*piece
    };

    // First try without kicks
    if !collides(board, &turned) {
        return Some(RotationResult {
            piece: turned,
            kick_index: 0,
        });
    }

    let kicks = get_kicks(piece.piece, piece.rotation, to);
    for (i, &(dx, dy)) in kicks.iter().enumerate() {
        let kicked = ActivePiece {
            x: turned.x + dx,
            y: turned.y + dy,
            ..turned
        };
        if !collides(board, &kicked) {
            return Some(RotationResult {
                piece: kicked,
                kick_index: i + 1, // +1 because index 0 is no-kick
            });
        }
    }

    None
}

/// Try to translate a piece; the moved piece loses its rotation flag.
pub fn try_move(board: &Board, piece: &ActivePiece, dx: i8, dy: i8) -> Option<ActivePiece> {
    let moved = piece.shifted(dx, dy);
    if collides(board, &moved) {
        None
    } else {
        Some(moved)
    }
}

/// Try to move piece down one row (soft drop)
pub fn try_drop(board: &Board, piece: &ActivePiece) -> Option<ActivePiece> {
    try_move(board, piece, 0, 1)
}

/// Corners around the T centre (box cell (1, 1)): top-left, top-right,
/// bottom-left, bottom-right.
fn t_corners(piece: &ActivePiece) -> [(i8, i8); 4] {
    let (x, y) = (piece.x, piece.y);
    [(x, y), (x + 2, y), (x, y + 2), (x + 2, y + 2)]
}

/// Indices of the two corners on the side the T's point faces.
fn front_corners(rotation: Rotation) -> [usize; 2] {
    match rotation {
        Rotation::North => [0, 1],
        Rotation::East => [1, 3],
        Rotation::South => [2, 3],
        Rotation::West => [0, 2],
    }
}

/// Detect T-spin using the 3-corner rule.
///
/// Only a T whose last successful action was a rotation qualifies. With at
/// least three blocked corners it is a full T-spin when both front corners
/// are blocked and a mini otherwise. Corners outside the grid count as blocked.
pub fn detect_tspin(board: &Board, piece: &ActivePiece) -> TSpin {
    if piece.piece != Piece::T || !piece.rotated_last {
        return TSpin::None;
    }

    let corners = t_corners(piece);
    let blocked = corners.map(|(cx, cy)| board.is_blocked(cx, cy));
    let filled = blocked.iter().filter(|&&b| b).count();
    if filled < 3 {
        return TSpin::None;
    }

    let front_filled = front_corners(piece.rotation)
        .iter()
        .filter(|&&i| blocked[i])
        .count();
    if front_filled == 2 {
        TSpin::Normal
    } else {
        TSpin::Mini
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rotation() {
        let board = Board::new();
        let piece = ActivePiece::new(Piece::T, Rotation::North, 4, 5);
        let r = try_rotate(&board, &piece, RotateDir::Cw).expect("free rotation");
        assert_eq!(r.piece.rotation, Rotation::East);
        assert_eq!(r.kick_index, 0); // No kick needed
        assert!(r.piece.rotated_last);
    }

    #[test]
    fn test_wall_kick() {
        let board = Board::new();
        // vertical I hugging the left wall must kick to turn flat
        let piece = ActivePiece::new(Piece::I, Rotation::West, -1, 5);
        assert!(!collides(&board, &piece));
        let r = try_rotate(&board, &piece, RotateDir::Cw).expect("kicked rotation");
        assert_eq!(r.piece.rotation, Rotation::North);
        assert!(r.kick_index > 0);
        assert!(!collides(&board, &r.piece));
    }

    #[test]
    fn test_failed_rotation_returns_none() {
        let mut board = Board::new();
        for y in 0..Board::HEIGHT {
            for x in 0..Board::WIDTH {
                if x != 4 {
                    board.set(x, y, Some(Piece::L));
                }
            }
        }
        // vertical I in the only open column can never turn flat
        let piece = ActivePiece::new(Piece::I, Rotation::East, 2, 10);
        assert!(!collides(&board, &piece));
        assert!(try_rotate(&board, &piece, RotateDir::Cw).is_none());
        assert!(try_rotate(&board, &piece, RotateDir::Ccw).is_none());
    }

    #[test]
    fn test_move_left() {
        let board = Board::new();
        let piece = ActivePiece::new(Piece::T, Rotation::North, 4, 0);
        let moved = try_move(&board, &piece, -1, 0).expect("room to move");
        assert_eq!(moved.x, 3);
    }

    #[test]
    fn test_move_blocked() {
        let board = Board::new();
        let piece = ActivePiece::new(Piece::T, Rotation::North, 0, 0);
        assert_eq!(try_move(&board, &piece, -1, 0), None);
    }

    #[test]
    fn test_180_rotation() {
        let board = Board::new();
        let piece = ActivePiece::new(Piece::T, Rotation::North, 4, 5);
        let r = try_rotate_180(&board, &piece).expect("free rotation");
        assert_eq!(r.piece.rotation, Rotation::South);
    }

    #[test]
    fn test_no_tspin_without_rotation() {
        let board = Board::new();
        let piece = ActivePiece::new(Piece::T, Rotation::South, -1, 17);
        assert_eq!(detect_tspin(&board, &piece), TSpin::None);
    }

    #[test]
    fn test_tspin_double_slot() {
        let board = Board::from_rows(&[
            "...JJJJJJJ",
            "J...JJJJJJ",
            "JJ.JJJJJJJ",
        ])
        .expect("valid rows");
        let mut piece = ActivePiece::new(Piece::T, Rotation::South, 1, 17);
        assert!(!collides(&board, &piece));
        piece.rotated_last = true;
        assert_eq!(detect_tspin(&board, &piece), TSpin::Normal);
    }

    #[test]
    fn test_tspin_mini_one_front_open() {
        let mut board = Board::new();
        board.set(0, 18, Some(Piece::Z));
        // floor blocks both back corners, only the left front corner is filled
        let mut piece = ActivePiece::new(Piece::T, Rotation::North, 0, 18);
        assert!(!collides(&board, &piece));
        piece.rotated_last = true;
        assert_eq!(detect_tspin(&board, &piece), TSpin::Mini);
    }

    #[test]
    fn test_two_corners_is_not_a_spin() {
        let board = Board::new();
        let mut piece = ActivePiece::new(Piece::T, Rotation::North, 4, 18);
        piece.rotated_last = true;
        assert_eq!(detect_tspin(&board, &piece), TSpin::None);
    }

    #[test]
    fn test_non_t_never_spins() {
        let board = Board::new();
        let mut piece = ActivePiece::new(Piece::S, Rotation::North, 0, 18);
        piece.rotated_last = true;
        assert_eq!(detect_tspin(&board, &piece), TSpin::None);
    }
}
