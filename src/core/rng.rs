//! Deterministic random number generation.
//!
//! A game owns one seed. Every consumer of randomness (the deck shuffle,
//! the starting seat, a random player, a lookahead clone) takes its own
//! named stream derived from that seed, so adding or removing one consumer
//! never shifts the numbers another one sees.
//!
//! ```
//! use virus_engine::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut deck = rng.for_context("deck");
//! let mut deck_again = GameRng::new(42).for_context("deck");
//! assert_eq!(deck.gen_range_usize(0..1000), deck_again.gen_range_usize(0..1000));
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the stream for a named purpose.
    ///
    /// Depends only on this stream's seed and `context`, never on how many
    /// numbers were drawn so far, and is the same on every platform.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
