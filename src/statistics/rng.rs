//! Deterministic per-task random number generators.
//!
//! Monte Carlo replicates run independently (and, with the `parallel`
//! feature, on different threads). Each replicate gets its own generator
//! derived from one base seed and the replicate's index, so the estimate
//! depends only on the base seed and never on scheduling.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Counter-based RNG seed generation using SplitMix64.
///
/// This is a stateless PRF that generates deterministic, well-distributed
/// seeds from a base seed and counter. Using this instead of simple addition
/// avoids sequential correlation between neighbouring replicates.
///
/// # Arguments
///
/// * `base_seed` - Base random seed
/// * `counter` - Task counter (0, 1, 2, ...)
#[inline]
pub fn counter_rng_seed(base_seed: u64, counter: u64) -> u64 {
    // SplitMix64: https://xoshiro.di.unimi.it/splitmix64.c
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generator for task `counter` under `base_seed`.
#[inline]
pub fn task_rng(base_seed: u64, counter: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(base_seed, counter))
}
