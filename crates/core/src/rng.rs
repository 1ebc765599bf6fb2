//! Seeded random stream threaded through generation and monster decisions.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Clone)]
pub struct DungeonRng {
    inner: ChaCha8Rng,
}

impl DungeonRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform-ish value in `0..bound`; a zero bound yields 0.
    pub fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.inner.next_u64() % bound as u64) as usize
    }

    pub fn range_inclusive(&mut self, min_value: u32, max_value: u32) -> u32 {
        debug_assert!(min_value <= max_value);
        let span = u64::from(max_value - min_value) + 1;
        min_value + (self.inner.next_u64() % span) as u32
    }

    pub fn coin_flip(&mut self) -> bool {
        self.inner.next_u64() & 1 == 1
    }
}
