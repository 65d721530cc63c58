//! board representation - dense 10x20 grid of piece letters
//! row occupancy bitmasks kept alongside for fast full-row and collision checks

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ActivePiece, ParseError, Piece};

/// A grid cell: empty, or the type of the piece that was locked there.
pub type Cell = Option<Piece>;

/// 10x20 playfield. Row 0 is the top row, row 19 the floor row.
/// Cells above the top (y < 0) are outside the grid and never collide.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    cells: [[Cell; Board::WIDTH]; Board::HEIGHT],
    rows: [u16; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [[None; Board::WIDTH]; Board::HEIGHT],
            rows: [0; Board::HEIGHT],
        }
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;
    pub const FULL_ROW: u16 = (1 << Board::WIDTH) - 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Is the in-bounds cell filled?
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        (self.rows[y] >> x) & 1 == 1
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y][x] = cell;
        match cell {
            Some(_) => self.rows[y] |= 1 << x,
            None => self.rows[y] &= !(1 << x),
        }
    }

    /// Collision test for a single cell in signed coordinates.
    /// Side walls and the floor collide; the space above the grid does not.
    #[inline]
    pub fn collides_at(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= Self::WIDTH as i8 || y >= Self::HEIGHT as i8 {
            return true;
        }
        y >= 0 && self.get(x as usize, y as usize)
    }

    /// Like [`Board::collides_at`] but the space above the grid counts too.
    #[inline]
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        y < 0 || self.collides_at(x, y)
    }

    /// True iff every cell of the piece is inside the side walls, above the
    /// floor, and (when on the grid) over an empty cell.
    pub fn is_valid_placement(&self, piece: &ActivePiece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| !self.collides_at(x, y))
    }

    /// Write the piece's on-grid cells. Cells above the top are dropped.
    pub fn place(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            if x >= 0 && y >= 0 && x < Self::WIDTH as i8 && y < Self::HEIGHT as i8 {
                self.set(x as usize, y as usize, Some(piece.piece));
            }
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y] == Self::FULL_ROW
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.rows[y] == 0
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }

    /// Remove every full row, scanning bottom to top. After a removal the
    /// same index is checked again since the rows above have shifted down.
    pub fn clear_lines(&mut self) -> u8 {
        let mut cleared = 0u8;
        let mut y = Self::HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.cells.copy_within(0..row, 1);
                self.rows.copy_within(0..row, 1);
                self.cells[0] = [None; Self::WIDTH];
                self.rows[0] = 0;
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Occupancy bitmask of row `y`, bit x set when column x is filled.
    #[inline]
    pub fn row(&self, y: usize) -> u16 {
        self.rows[y]
    }

    #[inline]
    pub fn rows(&self) -> &[u16; Board::HEIGHT] {
        &self.rows
    }

    /// Build a board from text rows aligned to the floor: the last string is
    /// row 19. `.` is empty, piece letters fill.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ParseError> {
        if rows.len() > Self::HEIGHT {
            return Err(ParseError::TooManyRows {
                count: rows.len(),
                max: Self::HEIGHT,
            });
        }
        let mut board = Board::new();
        let offset = Self::HEIGHT - rows.len();
        for (i, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let width = text.chars().count();
            if width != Self::WIDTH {
                return Err(ParseError::RowWidth {
                    row: i,
                    width,
                    expected: Self::WIDTH,
                });
            }
            for (x, c) in text.chars().enumerate() {
                if c != '.' {
                    board.set(x, offset + i, Some(Piece::try_from(c)?));
                }
            }
        }
        Ok(board)
    }

    /// All rows as text, top row first.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.map_or('.', Piece::letter)).collect())
            .collect()
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows: Vec<String> = Vec::deserialize(deserializer)?;
        Board::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rotation;

    const FLOOR: usize = Board::HEIGHT - 1;

    #[test]
    fn test_set_get() {
        let mut b = Board::new();
        b.set(5, 10, Some(Piece::T));
        assert!(b.get(5, 10));
        assert!(!b.get(4, 10));
        assert_eq!(b.cell(5, 10), Some(Piece::T));
        b.set(5, 10, None);
        assert!(b.is_empty());
    }

    #[test]
    fn test_clear_single_line() {
        let mut b = Board::new();
        for x in 0..Board::WIDTH {
            b.set(x, FLOOR, Some(Piece::L));
        }
        b.set(5, FLOOR - 1, Some(Piece::T));
        assert_eq!(b.clear_lines(), 1);
        // the row above shifts down onto the floor
        assert_eq!(b.cell(5, FLOOR), Some(Piece::T));
        assert!(b.is_row_empty(0));
        assert_eq!(b.row(FLOOR), 1 << 5);
    }

    #[test]
    fn test_clear_adjacent_lines_rechecks_same_row() {
        let mut b = Board::new();
        for x in 0..Board::WIDTH {
            b.set(x, FLOOR, Some(Piece::I));
            b.set(x, FLOOR - 1, Some(Piece::I));
        }
        b.set(3, FLOOR - 2, Some(Piece::J));
        assert_eq!(b.clear_lines(), 2);
        assert!(b.get(3, FLOOR));
        assert_eq!(b.row(FLOOR), 1 << 3);
    }

    #[test]
    fn test_clear_split_lines() {
        let b = Board::from_rows(&[
            "IIIIIIIIII",
            "O.........",
            "IIIIIIIIII",
        ]);
        let mut b = b.expect("valid rows");
        assert_eq!(b.clear_lines(), 2);
        assert_eq!(b.cell(0, FLOOR), Some(Piece::O));
        assert!(b.is_row_empty(FLOOR - 1));
    }

    #[test]
    fn test_row_full() {
        let mut b = Board::new();
        for x in 0..Board::WIDTH {
            b.set(x, 5, Some(Piece::S));
        }
        assert!(b.is_row_full(5));
        assert!(!b.is_row_full(4));
    }

    #[test]
    fn test_collision_rules() {
        let mut b = Board::new();
        b.set(4, FLOOR, Some(Piece::Z));
        assert!(b.collides_at(-1, 5));
        assert!(b.collides_at(Board::WIDTH as i8, 5));
        assert!(b.collides_at(0, Board::HEIGHT as i8));
        assert!(b.collides_at(4, FLOOR as i8));
        assert!(!b.collides_at(4, -2));
        assert!(b.is_blocked(4, -2));
    }

    #[test]
    fn test_valid_placement_above_top() {
        let b = Board::new();
        let piece = ActivePiece::new(Piece::I, Rotation::East, 3, -3);
        assert!(b.is_valid_placement(&piece));
        let out_left = ActivePiece::new(Piece::I, Rotation::North, -1, 5);
        assert!(!b.is_valid_placement(&out_left));
    }

    #[test]
    fn test_place_skips_cells_above_grid() {
        let mut b = Board::new();
        b.place(&ActivePiece::new(Piece::I, Rotation::East, 0, -2));
        assert!(b.get(2, 0));
        assert!(b.get(2, 1));
        assert_eq!(b.rows().iter().map(|r| r.count_ones()).sum::<u32>(), 2);
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(
            Board::from_rows(&["...."]),
            Err(ParseError::RowWidth {
                row: 0,
                width: 4,
                expected: Board::WIDTH
            })
        );
        assert_eq!(
            Board::from_rows(&["....Q....."]),
            Err(ParseError::UnknownPiece('Q'))
        );
        let too_many = vec![".........."; Board::HEIGHT + 1];
        assert!(matches!(
            Board::from_rows(&too_many),
            Err(ParseError::TooManyRows { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let board = Board::from_rows(&["..T.......", ".TTT.OO..I"]).expect("valid rows");
        let json = serde_json::to_string(&board).expect("serialize");
        let back: Board = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(board, back);
        assert_eq!(back.cell(9, FLOOR), Some(Piece::I));
    }
}
