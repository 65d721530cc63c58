//! Piece types, rotation states and SRS box shapes.
//!
//! Shapes are expressed as (dx, dy) offsets from the top-left corner of the
//! piece's SRS bounding box, with y growing downward like the grid.

use serde::{Deserialize, Serialize};

use crate::ParseError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Rotation state as 0..4, clockwise from spawn.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Number of clockwise quarter turns needed to get from `self` to `target`.
    pub fn quarter_turns_to(self, target: Rotation) -> usize {
        (target.index() + 4 - self.index()) % 4
    }
}

type Shape = [(i8, i8); 4];

const I_SHAPES: [Shape; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_SHAPE: Shape = [(1, 0), (2, 0), (1, 1), (2, 1)];

const T_SHAPES: [Shape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [Shape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: [Shape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_SHAPES: [Shape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [Shape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    /// Mino offsets for this piece at the given rotation.
    pub fn minos(self, rot: Rotation) -> [(i8, i8); 4] {
        let idx = rot.index();
        match self {
            Piece::I => I_SHAPES[idx],
            Piece::O => O_SHAPE,
            Piece::T => T_SHAPES[idx],
            Piece::S => S_SHAPES[idx],
            Piece::Z => Z_SHAPES[idx],
            Piece::J => J_SHAPES[idx],
            Piece::L => L_SHAPES[idx],
        }
    }

    /// Rotation states worth enumerating; O looks the same in all four.
    pub fn distinct_rotations(self) -> &'static [Rotation] {
        match self {
            Piece::O => &Rotation::ALL[..1],
            _ => &Rotation::ALL,
        }
    }

    pub fn spawn_x(self) -> i8 {
        3
    }

    pub fn spawn_y(self) -> i8 {
        0
    }

    pub fn letter(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::T => 'T',
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::J => 'J',
            Piece::L => 'L',
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'I' => Ok(Piece::I),
            'O' => Ok(Piece::O),
            'T' => Ok(Piece::T),
            'S' => Ok(Piece::S),
            'Z' => Ok(Piece::Z),
            'J' => Ok(Piece::J),
            'L' => Ok(Piece::L),
            other => Err(ParseError::UnknownPiece(other)),
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A piece instance on (or above) the grid.
///
/// `rotated_last` records whether the most recent successful state change
/// was a rotation; T-spin classification depends on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub rotated_last: bool,
}

impl ActivePiece {
    pub fn new(piece: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
            rotated_last: false,
        }
    }

    pub fn spawn(piece: Piece) -> Self {
        Self::new(piece, Rotation::North, piece.spawn_x(), piece.spawn_y())
    }

    /// Absolute grid cells covered by the piece.
    #[inline]
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.piece
            .minos(self.rotation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Translated copy; a translation clears the rotation flag.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            rotated_last: false,
            ..*self
        }
    }
}
