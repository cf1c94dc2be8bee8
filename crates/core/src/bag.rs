//! Bag module - 7-bag random piece generation
//!
//! Each bag holds one of each piece kind in shuffled order. Pieces are drawn
//! until the bag is empty, then a fresh bag is shuffled. Any 7 draws starting
//! at a bag boundary therefore contain every kind exactly once.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index of the next piece to hand out; 7 means exhausted
    index: usize,
    rng: StdRng,
}

impl Bag {
    /// Create a bag seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a deterministic bag
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            bag: PieceKind::ALL,
            // Starts exhausted so the first draw shuffles.
            index: PieceKind::ALL.len(),
            rng,
        }
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.index = 0;
    }

    /// Draw the next piece, refilling the bag when it runs out
    pub fn next(&mut self) -> PieceKind {
        if self.index >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.index];
        self.index += 1;
        kind
    }

    /// Pieces left before the next refill
    pub fn remaining(&self) -> usize {
        self.bag.len() - self.index
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}
