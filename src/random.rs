//! Uniform integer sources for the trial driver.
//!
//! The estimator only needs "a uniformly distributed integer in
//! `[low, high_exclusive)`". [`UniformSource`] names that capability; every
//! [`rand::Rng`] provides it, and tests can supply scripted sources.
//!
//! # Reproducibility
//!
//! [`seeded_rng`] builds a `StdRng` from a fixed seed. [`trial_rng`] derives
//! an independent stream per trial index so parallel runs give the same
//! results as sequential ones for the same seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Capability: produce a uniformly distributed integer in `[low, high_exclusive)`
pub trait UniformSource {
    fn uniform(&mut self, low: usize, high_exclusive: usize) -> usize;
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn uniform(&mut self, low: usize, high_exclusive: usize) -> usize {
        self.gen_range(low..high_exclusive)
    }
}

/// Creates a deterministic generator for a fixed seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates the generator for one trial of a seeded run.
///
/// The trial index is mixed into the seed with a SplitMix64 step, so nearby
/// seeds and indices still give unrelated streams.
pub fn trial_rng(seed: u64, trial: usize) -> StdRng {
    let mut z = seed.wrapping_add((trial as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    StdRng::seed_from_u64(z ^ (z >> 31))
}

/// Creates a generator seeded from the operating system.
pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}
