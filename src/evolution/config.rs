//! Engine configuration.
//!
//! [`EngineConfig`] holds the tunables of one generation step.

use super::operators::{Crossover, Mutation};
use super::selection::Sampling;
use crate::error::{EvolveError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the [`EvolutionEngine`](super::EvolutionEngine).
///
/// # Defaults
///
/// ```
/// use tsp_evolve::evolution::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.sample_size, 10);
/// assert_eq!(config.mutation_rate, 0.01);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_evolve::evolution::{EngineConfig, Mutation, Sampling};
///
/// let config = EngineConfig::default()
///     .with_sample_size(5)
///     .with_mutation_rate(0.05)
///     .with_sampling(Sampling::WithoutReplacement)
///     .with_mutation(Mutation::Invert);
/// assert!(config.validate().is_ok());
/// ```
///
/// Builders store values as given; out-of-range values are reported by
/// [`validate`](Self::validate), which the engine calls on construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Number of candidates drawn into each tournament.
    pub sample_size: usize,

    /// Probability of mutating a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether tournament draws may repeat a candidate.
    pub sampling: Sampling,

    /// How two parent tours are combined.
    pub crossover: Crossover,

    /// How a child tour is perturbed when mutation fires.
    pub mutation: Mutation,

    /// Whether to build children in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` cargo feature. Results are the
    /// same either way for a given RNG state.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_size: 10,
            mutation_rate: 0.01,
            sampling: Sampling::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            parallel: false,
        }
    }
}

impl EngineConfig {
    /// Sets the tournament sample size.
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament sampling mode.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Enables or disables parallel child creation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// A sample size larger than the population can only be detected once
    /// the population is known; see [`Sampling::check`].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolveError::InvalidMutationRate {
                rate: self.mutation_rate,
            });
        }
        if self.sample_size == 0 {
            return Err(EvolveError::InvalidSampleSize {
                size: self.sample_size,
            });
        }
        Ok(())
    }
}
