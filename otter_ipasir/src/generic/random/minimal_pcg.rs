//! A simple pseudorandom number generator.
//!
//! Specifically, a translation of the *really* minimal C PCG32 implementation from <https://www.pcg-random.org/>, implementing [RngCore].
//!
//! Each [context](crate::context) owns a source of rng, seeded from the `otter.seed` option.
//! Decisions use the rng when `otter.random_decision_bias` or `otter.polarity_lean` ask for it, and so a fixed seed gives a reproducible solve.

use rand::SeedableRng;
use rand_core::{impls, RngCore};

/// State and increment
#[derive(Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = ((old_state >> 18) ^ old_state) >> 27;
        let rot = (old_state >> 59) as u32;
        (xorshifted as u32).rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        /// Odd, as required of the increment, and otherwise arbitrary.
        const INCREMENT: u64 = 1442695040888963407;
        let mut rng = Self {
            state: 0,
            inc: INCREMENT,
        };
        rng.next_u32();
        rng.state = rng.state.wrapping_add(u64::from_le_bytes(seed));
        rng.next_u32();
        rng
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = MinimalPCG32::from_seed(73u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(73u64.to_le_bytes());
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seed_different_stream() {
        let mut a = MinimalPCG32::from_seed(2u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(73u64.to_le_bytes());
        let a_stream = (0..8).map(|_| a.next_u32()).collect::<Vec<_>>();
        let b_stream = (0..8).map(|_| b.next_u32()).collect::<Vec<_>>();
        assert_ne!(a_stream, b_stream);
    }
}
