//! RNG module - 7-bag random piece generation
//!
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled with
//! Fisher-Yates. Pieces are drawn until the bag is empty, then a new bag is
//! shuffled. The random source is injectable through [`RandomSource`]; the
//! default [`SimpleRng`] is a seeded LCG so games are reproducible.

use crate::types::PieceKind;

/// Source of randomness for the bag shuffle
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Value in `[0, max)`; `max` must be non-zero
    ///
    /// Raw values in the top `u32::MAX % max + 1` slots are redrawn so every
    /// result is equally likely. A source stuck in that zone never returns.
    fn next_range(&mut self, max: u32) -> u32 {
        let zone = u32::MAX - u32::MAX % max;
        loop {
            let value = self.next_u32();
            if value < zone {
                return value % max;
            }
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state (usable as a seed to replay from here)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of an LCG cycle quickly; hand out the high half.
        self.state.rotate_left(16)
    }
}

/// Shuffle a slice using Fisher-Yates
pub fn shuffle<T>(rng: &mut impl RandomSource, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_range((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag<R = SimpleRng> {
    /// Current bag; `bag[bag_index..]` are still to be drawn
    bag: [PieceKind; 7],
    bag_index: usize,
    rng: R,
}

impl PieceBag<SimpleRng> {
    /// Create a bag driven by a seeded [`SimpleRng`]
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> PieceBag<R> {
    /// Create an empty bag; the first draw shuffles a fresh permutation
    pub fn with_source(rng: R) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: 7,
            rng,
        }
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        shuffle(&mut self.rng, &mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece, reshuffling only when the bag is exhausted
    pub fn next_piece(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces left in the current bag, in draw order
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    /// Throw away the current bag; the next draw starts a fresh one
    pub fn reset(&mut self) {
        self.bag_index = self.bag.len();
    }
}

impl Default for PieceBag<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
