//! Seedable RNG for board setup.
//!
//! The same seed always scatters Daily Doubles onto the same cells, so a host
//! can reproduce a board from its seed alone.

use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used when randomizing a board.
#[derive(Clone, Debug)]
pub struct BoardRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BoardRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Pick `amount` distinct indices from `0..length`.
    ///
    /// `amount` is capped at `length`. The order of the result is random.
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.inner, length, amount.min(length)).into_vec()
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> BoardRngState {
        BoardRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &BoardRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}
