use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use stacker_core::Piece;

/// 7-bag randomizer: every run of seven draws is a permutation of all pieces.
#[derive(Clone, Debug)]
pub struct SevenBag {
    rng: StdRng,
    pieces: Vec<Piece>,
}

impl SevenBag {
    /// Bag seeded from OS entropy.
    pub fn new() -> Self {
        Self::seeded(rand::random::<u64>())
    }

    /// Bag with a fixed sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pieces: Vec::with_capacity(Piece::ALL.len()),
        }
    }

    pub fn next_piece(&mut self) -> Piece {
        if let Some(piece) = self.pieces.pop() {
            return piece;
        }
        let mut fresh = Piece::ALL;
        fresh.shuffle(&mut self.rng);
        // the rest is drawn from the back
        self.pieces.extend(fresh[1..].iter().rev());
        fresh[0]
    }

    /// Next piece without consuming it, `None` when the current bag is spent.
    pub fn peek(&self) -> Option<Piece> {
        self.pieces.last().copied()
    }

    /// Pieces left in the current bag.
    pub fn remaining(&self) -> usize {
        self.pieces.len()
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new()
    }
}
