//! Tournament sampling.
//!
//! A tournament draws `sample_size` members from the population being
//! evolved; the fittest of the sample becomes a parent. [`Sampling`]
//! decides whether a member may be drawn more than once.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::error::{EvolveError, Result};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How members are drawn into a tournament sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sampling {
    /// Each draw is uniform over the whole population; repeats allowed.
    ///
    /// Works for any sample size, including one larger than the population.
    #[default]
    WithReplacement,

    /// Draws are distinct members.
    ///
    /// The sample size must not exceed the population size.
    WithoutReplacement,
}

impl Sampling {
    /// Draws `sample_size` member indices from a population of
    /// `population_size`.
    ///
    /// # Errors
    /// - [`EvolveError::EmptyPopulation`] if `population_size` is zero.
    /// - [`EvolveError::SampleLargerThanPopulation`] when drawing without
    ///   replacement and `sample_size > population_size`.
    pub fn draw<R: Rng>(
        &self,
        population_size: usize,
        sample_size: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        self.check(population_size, sample_size)?;
        let indices = match self {
            Sampling::WithReplacement => (0..sample_size)
                .map(|_| rng.random_range(0..population_size))
                .collect(),
            Sampling::WithoutReplacement => {
                rand::seq::index::sample(rng, population_size, sample_size).into_vec()
            }
        };
        Ok(indices)
    }

    /// Checks that a sample of `sample_size` can be drawn from a population
    /// of `population_size`.
    pub fn check(&self, population_size: usize, sample_size: usize) -> Result<()> {
        if population_size == 0 {
            return Err(EvolveError::EmptyPopulation);
        }
        if *self == Sampling::WithoutReplacement && sample_size > population_size {
            return Err(EvolveError::SampleLargerThanPopulation {
                sample_size,
                population_size,
            });
        }
        Ok(())
    }
}
