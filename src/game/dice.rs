//! Random draws used by resource collection.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random rolls.
///
/// The engine never touches an RNG directly, so tests can script exact rolls.
pub trait Dice {
    /// A roll uniformly distributed in `[0, upper)`.
    ///
    /// `upper` is always positive and finite when called by the engine.
    fn below(&mut self, upper: f64) -> f64;

    /// A percentage roll in `[0, 100)`.
    fn percent(&mut self) -> f64 {
        self.below(100.0)
    }
}

/// Reproducible dice backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct SeededDice {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededDice {
    /// Create dice from a seed. The same seed yields the same rolls.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The seed these dice were created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for SeededDice {
    fn below(&mut self, upper: f64) -> f64 {
        if upper <= 0.0 || !upper.is_finite() {
            return 0.0;
        }
        self.rng.random_range(0.0..upper)
    }
}
