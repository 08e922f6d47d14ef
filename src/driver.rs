//! End-to-end run: random towns, a random initial population, a fixed
//! number of generations.
//!
//! The driver owns everything the core leaves to its caller: the town
//! generation policy, the population size, the generation count and the
//! seed. It reports the distances of the first and last populations.

use crate::candidate::Candidate;
use crate::error::{EvolveError, Result};
use crate::evolution::{EngineConfig, EvolutionEngine, Sampling};
use crate::population::{Population, PopulationStats};
use crate::random::create_rng_from;
use crate::town::TownSet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Parameters of a full run.
///
/// # Examples
///
/// ```
/// use tsp_evolve::driver::DriverConfig;
///
/// let config = DriverConfig::default()
///     .with_town_count(8)
///     .with_population_size(20)
///     .with_generations(50)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverConfig {
    /// Number of random towns.
    pub town_count: usize,

    /// Town coordinates are integers drawn from `[0, coordinate_bound)`.
    pub coordinate_bound: u32,

    /// Number of candidates in every generation.
    pub population_size: usize,

    /// Number of times the population is evolved.
    ///
    /// The initial population is generation 1, so the final population is
    /// generation `generations + 1`.
    pub generations: usize,

    /// Tunables passed to the [`EvolutionEngine`].
    pub engine: EngineConfig,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            town_count: 10,
            coordinate_bound: 100,
            population_size: 50,
            generations: 1000,
            engine: EngineConfig::default(),
            seed: None,
        }
    }
}

impl DriverConfig {
    pub fn with_town_count(mut self, n: usize) -> Self {
        self.town_count = n;
        self
    }

    pub fn with_coordinate_bound(mut self, bound: u32) -> Self {
        self.coordinate_bound = bound;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Shorthand for setting the engine's tournament sample size.
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.engine.sample_size = n;
        self
    }

    /// Shorthand for setting the engine's mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.engine.mutation_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration, including the engine tunables against
    /// the population size.
    pub fn validate(&self) -> Result<()> {
        if self.town_count == 0 {
            return Err(EvolveError::EmptyTownSet);
        }
        if self.coordinate_bound == 0 {
            return Err(EvolveError::InvalidCoordinateBound);
        }
        if self.population_size == 0 {
            return Err(EvolveError::InvalidPopulationSize);
        }
        if self.generations == 0 {
            return Err(EvolveError::InvalidGenerations);
        }
        self.engine.validate()?;
        if self.engine.sampling == Sampling::WithoutReplacement {
            self.engine
                .sampling
                .check(self.population_size, self.engine.sample_size)?;
        }
        Ok(())
    }
}

/// Outcome of [`Driver::run`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverReport {
    /// The towns of this run.
    pub towns: TownSet,

    /// Distance of every candidate in generation 1.
    pub initial_distances: Vec<f64>,

    /// Distance of every candidate in the final generation.
    pub final_distances: Vec<f64>,

    /// Shortest tour seen in any generation.
    pub best: Candidate,

    /// Best distance of each generation; index 0 is generation 1.
    pub best_history: Vec<f64>,

    /// Number of evolve steps performed.
    pub generations: usize,
}

/// Runs the genetic algorithm end to end.
pub struct Driver;

impl Driver {
    /// Runs with the given configuration.
    pub fn run(config: &DriverConfig) -> Result<DriverReport> {
        Self::run_with_observer(config, |_, _| {})
    }

    /// Runs with the given configuration, calling `observer` with the
    /// generation number and its distance summary for generation 1 and
    /// after every evolve step.
    pub fn run_with_observer<F>(config: &DriverConfig, mut observer: F) -> Result<DriverReport>
    where
        F: FnMut(usize, &PopulationStats),
    {
        config.validate()?;

        let mut rng = create_rng_from(config.seed);
        let towns = TownSet::random(config.town_count, config.coordinate_bound, &mut rng)?;
        let engine = EvolutionEngine::new(towns.clone(), config.engine.clone())?;

        let mut population = Population::random(&towns, config.population_size, &mut rng)?;
        let initial_distances = population.distances();
        let stats = population.stats()?;
        info!(
            towns = towns.len(),
            population = population.size(),
            generations = config.generations,
            best = stats.best,
            "initial population"
        );
        observer(1, &stats);

        let mut best = population.fittest()?.clone();
        let mut best_history = Vec::with_capacity(config.generations + 1);
        best_history.push(stats.best);

        for gen in 2..=config.generations + 1 {
            population = engine.evolve(&population, &mut rng)?;

            let stats = population.stats()?;
            debug!(
                generation = gen,
                best = stats.best,
                mean = stats.mean,
                worst = stats.worst,
                "generation complete"
            );
            observer(gen, &stats);

            let gen_best = population.fittest()?;
            if gen_best.distance() < best.distance() {
                best = gen_best.clone();
            }
            best_history.push(stats.best);
        }

        info!(
            best = best.distance(),
            final_best = best_history.last().copied().unwrap_or(f64::NAN),
            "run complete"
        );

        Ok(DriverReport {
            towns,
            initial_distances,
            final_distances: population.distances(),
            best,
            best_history,
            generations: config.generations,
        })
    }
}
