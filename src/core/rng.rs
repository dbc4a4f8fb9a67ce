//! Seeded randomness for dice throws and AI tie-breaks.
//!
//! A session keeps its dice and its AI on separate context streams, so an AI
//! tie-break never shifts the next dice throw.
//!
//! ```
//! use ancient_games::core::{Dice, GameRng};
//!
//! let rng = GameRng::new(42);
//! let mut dice = rng.for_context("dice");
//! let roll = Dice::SENET.throw(&mut dice);
//! assert!((1..=5).contains(&roll));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// ChaCha8 stream that remembers the seed it was built from.
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

    /// Derive a named stream. Same seed and name, same stream, on any
    /// toolchain.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// True with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Uniform in `[0, 1)`.
    pub fn gen_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}

/// A throw of binary sticks (or tetrahedral dice): each stick shows a mark
/// with probability 1/2 and the throw is the number of marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    /// Number of two-faced sticks thrown together.
    pub sticks: u8,
    /// Value a throw of zero marks is read as, if not zero itself.
    pub zero_as: Option<u8>,
}

impl Dice {
    /// Ur: four tetrahedral dice, 0..=4, binomially distributed.
    pub const UR: Dice = Dice { sticks: 4, zero_as: None };

    /// Senet: four throwing sticks, no marks counts as 5.
    pub const SENET: Dice = Dice { sticks: 4, zero_as: Some(5) };

    pub fn throw(&self, rng: &mut GameRng) -> u8 {
        let marks = (0..self.sticks).filter(|_| rng.gen_bool(0.5)).count() as u8;
        match (marks, self.zero_as) {
            (0, Some(value)) => value,
            _ => marks,
        }
    }

    /// Whether `value` is a possible result of a throw.
    #[must_use]
    pub fn can_show(&self, value: u8) -> bool {
        match self.zero_as {
            Some(zero) => value == zero || (1..=self.sticks).contains(&value),
            None => value <= self.sticks,
        }
    }
}
