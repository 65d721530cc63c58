//! Move candidates and T-spin kinds.

use crate::{ActivePiece, Piece, Rotation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum TSpin {
    #[default]
    None,
    Mini,
    Normal,
}

impl TSpin {
    pub fn is_spin(self) -> bool {
        self != TSpin::None
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum RotateDir {
    Cw,
    Ccw,
}

/// How a spin-finished placement is reached: drop in `rotation` at `x`,
/// then rotate once in `dir` after touching down.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Approach {
    pub rotation: Rotation,
    pub x: i8,
    pub dir: RotateDir,
}

/// A final resting placement proposed by the enumerator.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Set when the placement is finished by a rotation rather than a drop.
    pub approach: Option<Approach>,
}

impl Move {
    pub const ZERO: Self = Self {
        piece: Piece::I,
        rotation: Rotation::North,
        x: 0,
        y: 0,
        approach: None,
    };

    pub fn new(piece: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
            approach: None,
        }
    }

    pub fn with_approach(mut self, approach: Approach) -> Self {
        self.approach = Some(approach);
        self
    }

    /// Whether the last action before locking is a rotation.
    pub fn rotated(&self) -> bool {
        self.approach.is_some()
    }

    /// The piece instance this move locks.
    pub fn to_piece(&self) -> ActivePiece {
        ActivePiece {
            piece: self.piece,
            rotation: self.rotation,
            x: self.x,
            y: self.y,
            rotated_last: self.rotated(),
        }
    }

    /// Same final placement, ignoring how it was reached.
    pub fn same_placement(&self, other: &Move) -> bool {
        self.rotation == other.rotation && self.x == other.x && self.y == other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_new() {
        let m = Move::new(Piece::T, Rotation::North, 4, 0);
        assert_eq!(m.piece, Piece::T);
        assert_eq!(m.rotation, Rotation::North);
        assert_eq!(m.x, 4);
        assert_eq!(m.y, 0);
        assert!(!m.rotated());
        assert!(!m.to_piece().rotated_last);
    }

    #[test]
    fn test_move_with_approach() {
        let m = Move::new(Piece::T, Rotation::South, 5, 17).with_approach(Approach {
            rotation: Rotation::East,
            x: 5,
            dir: RotateDir::Cw,
        });
        assert!(m.rotated());
        assert!(m.to_piece().rotated_last);
        assert!(m.same_placement(&Move::new(Piece::T, Rotation::South, 5, 17)));
    }
}
