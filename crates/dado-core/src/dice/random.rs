//! Random sources for the roll engine.
//!
//! The engine only asks for "a number between 1 and N". Production code uses
//! [`SeededRandom`] (a `StdRng` seeded from OS entropy); tests use a fixed
//! seed or a [`SequenceRandom`] that replays predetermined values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed die faces.
pub trait RandomSource {
    /// Draws an integer in `[1, sides]`. Callers never pass `sides == 0`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

/// Non-cryptographic PRNG backed by `rand::rngs::StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Seeds from process entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream for tests and replays.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Values are clamped into `[1, sides]` of each request, so a sequence
/// written for a d20 stays valid when replayed against a d6.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Always returns the same value.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for SequenceRandom {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let value = if self.values.is_empty() {
            1
        } else {
            self.values[self.index % self.values.len()]
        };
        self.index += 1;
        value.clamp(1, sides)
    }
}
