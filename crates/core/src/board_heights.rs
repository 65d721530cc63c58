//! Board with precomputed column heights for fast evaluation

use crate::Board;

/// Board wrapper with cached column heights.
/// Height is the distance from the floor to the top of the column's highest
/// filled cell, 0 for an empty column.
#[derive(Clone, Debug)]
pub struct BoardWithHeights<'a> {
    board: &'a Board,
    heights: [u8; Board::WIDTH],
}

impl<'a> BoardWithHeights<'a> {
    pub fn new(board: &'a Board) -> Self {
        let mut heights = [0u8; Board::WIDTH];
        for (x, height) in heights.iter_mut().enumerate() {
            *height = Self::compute_height(board, x);
        }
        Self { board, heights }
    }

    fn compute_height(board: &Board, x: usize) -> u8 {
        (0..Board::HEIGHT)
            .find(|&y| board.get(x, y))
            .map_or(0, |y| (Board::HEIGHT - y) as u8)
    }

    #[inline(always)]
    pub fn height(&self, x: usize) -> u8 {
        self.heights[x]
    }

    #[inline(always)]
    pub fn max_height(&self) -> u8 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    pub fn aggregate_height(&self) -> u32 {
        self.heights.iter().map(|&h| h as u32).sum()
    }

    /// Sum of height differences between neighbouring columns
    pub fn bumpiness(&self) -> u32 {
        self.heights
            .windows(2)
            .map(|w| (w[0] as i32 - w[1] as i32).unsigned_abs())
            .sum()
    }

    /// Empty cells with at least one filled cell above them in the column
    pub fn holes(&self) -> u32 {
        let mut holes = 0u32;
        for x in 0..Board::WIDTH {
            let top = Board::HEIGHT - self.heights[x] as usize;
            for y in top..Board::HEIGHT {
                if !self.board.get(x, y) {
                    holes += 1;
                }
            }
        }
        holes
    }

    /// How far each column sits below its neighbours. Interior columns use
    /// the lower neighbour, edge columns their single neighbour.
    pub fn well_depths(&self) -> [u8; Board::WIDTH] {
        let mut depths = [0u8; Board::WIDTH];
        for (x, depth) in depths.iter_mut().enumerate() {
            let left = if x == 0 { None } else { Some(self.heights[x - 1]) };
            let right = self.heights.get(x + 1).copied();
            let rim = match (left, right) {
                (Some(l), Some(r)) => l.min(r),
                (Some(l), None) => l,
                (None, Some(r)) => r,
                (None, None) => 0,
            };
            *depth = rim.saturating_sub(self.heights[x]);
        }
        depths
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        self.board
    }

    #[inline(always)]
    pub fn heights(&self) -> &[u8; Board::WIDTH] {
        &self.heights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Piece;

    #[test]
    fn test_empty_board_heights() {
        let board = Board::new();
        let bh = BoardWithHeights::new(&board);
        for x in 0..Board::WIDTH {
            assert_eq!(bh.height(x), 0);
        }
        assert_eq!(bh.max_height(), 0);
        assert_eq!(bh.bumpiness(), 0);
        assert_eq!(bh.holes(), 0);
    }

    #[test]
    fn test_single_cell_height() {
        let mut board = Board::new();
        board.set(5, 16, Some(Piece::T));
        let bh = BoardWithHeights::new(&board);
        assert_eq!(bh.height(5), 4);
        assert_eq!(bh.max_height(), 4);
        assert_eq!(bh.aggregate_height(), 4);
        // the three empty cells under it are holes
        assert_eq!(bh.holes(), 3);
    }

    #[test]
    fn test_bumpiness() {
        // Column heights: [1, 3, 1, 3, 1, 3, 1, 3, 1, 3]
        let board = Board::from_rows(&[
            ".L.L.L.L.L",
            ".L.L.L.L.L",
            "LLLLLLLLLL",
        ])
        .expect("valid rows");
        let bh = BoardWithHeights::new(&board);
        assert_eq!(bh.bumpiness(), 18);
    }

    #[test]
    fn test_well_depths() {
        let board = Board::from_rows(&[
            "J.JJJJJJ.J",
            "J.JJJJJJ.J",
            "JJJJJJJJ.J",
        ])
        .expect("valid rows");
        let bh = BoardWithHeights::new(&board);
        let wells = bh.well_depths();
        assert_eq!(wells[1], 2);
        assert_eq!(wells[8], 3);
        assert_eq!(wells[0], 0);
        assert_eq!(wells[4], 0);
    }
}
