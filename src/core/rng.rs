//! Deterministic dice.
//!
//! The engine never rolls by itself: it consumes values handed to it. `Dice`
//! is the roller front ends use to produce those values.
//!
//! ## Key Features
//!
//! - **Uniform**: faces 1 through 6 with equal probability
//! - **Deterministic**: same seed produces the identical roll sequence
//! - **Replayable**: a session reset reseeds with the configured seed
//!
//! ```
//! use ludo_engine::core::Dice;
//!
//! let mut dice = Dice::new(42);
//! let mut again = Dice::new(42);
//!
//! let roll = dice.roll();
//! assert!((1..=6).contains(&roll));
//! assert_eq!(roll, again.roll());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::piece::MAX_DIE_FACE;

/// Seeded six-sided die.
///
/// Uses ChaCha8 for speed while keeping a well-distributed sequence.
#[derive(Clone, Debug)]
pub struct Dice {
    inner: ChaCha8Rng,
    seed: u64,
}

impl Dice {
    /// Create a die with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a die seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Roll once. Always in `1..=6`.
    pub fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=MAX_DIE_FACE)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
