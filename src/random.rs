//! Random number generator construction.
//!
//! Every stochastic operation in the crate takes its RNG as an argument.
//! This module only decides how a concrete generator is built from a seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seeded generator. The same seed always yields the same stream.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from fresh entropy when `None`.
pub fn create_rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
