//! Generation step.
//!
//! [`EvolutionEngine`] produces the next population from the current one:
//! tournament → crossover → mutation, once per child, then publishes all
//! children together as a new [`Population`].

use super::config::EngineConfig;
use crate::candidate::Candidate;
use crate::error::{EvolveError, Result};
use crate::population::Population;
use crate::random::create_rng;
use crate::town::TownSet;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

/// Evolves populations of tours over a fixed [`TownSet`].
///
/// The engine keeps no population state between calls: each
/// [`evolve`](Self::evolve) reads only the population it is handed.
///
/// # Usage
///
/// ```
/// use tsp_evolve::evolution::{EngineConfig, EvolutionEngine};
/// use tsp_evolve::population::Population;
/// use tsp_evolve::random::create_rng;
/// use tsp_evolve::town::TownSet;
///
/// let mut rng = create_rng(42);
/// let towns = TownSet::random(10, 100, &mut rng).unwrap();
/// let engine = EvolutionEngine::new(towns.clone(), EngineConfig::default()).unwrap();
///
/// let mut population = Population::random(&towns, 50, &mut rng).unwrap();
/// for _ in 0..20 {
///     population = engine.evolve(&population, &mut rng).unwrap();
/// }
/// assert_eq!(population.size(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    towns: TownSet,
    config: EngineConfig,
}

impl EvolutionEngine {
    /// Creates an engine, rejecting invalid tunables up front.
    ///
    /// # Errors
    /// [`EvolveError::InvalidMutationRate`] or
    /// [`EvolveError::InvalidSampleSize`]; see [`EngineConfig::validate`].
    pub fn new(towns: TownSet, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { towns, config })
    }

    pub fn towns(&self) -> &TownSet {
        &self.towns
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produces the next generation, of the same size as `population`.
    ///
    /// One seed per child is drawn from `rng` in order, and each child is
    /// built from its own generator. The outcome therefore depends only on
    /// `population` and the state of `rng`, whether or not children are
    /// built in parallel.
    ///
    /// # Errors
    /// - [`EvolveError::EmptyPopulation`] if `population` has no members.
    /// - [`EvolveError::TownCountMismatch`] if its tours do not cover this
    ///   engine's towns.
    /// - [`EvolveError::TownSetMismatch`] if a member's distance was measured
    ///   on a different town set of the same size.
    /// - [`EvolveError::SampleLargerThanPopulation`] when sampling without
    ///   replacement from too small a population.
    #[instrument(level = "debug", skip_all, fields(size = population.size()))]
    pub fn evolve<R: Rng>(&self, population: &Population, rng: &mut R) -> Result<Population> {
        self.check_population(population)?;

        let seeds: Vec<u64> = (0..population.size()).map(|_| rng.random()).collect();
        let children = self.create_children(population, &seeds)?;

        Ok(Population::with_members(children))
    }

    #[cfg(feature = "parallel")]
    fn create_children(&self, population: &Population, seeds: &[u64]) -> Result<Vec<Candidate>> {
        if self.config.parallel {
            return seeds
                .par_iter()
                .map(|&seed| self.create_child(population, &mut create_rng(seed)))
                .collect();
        }
        self.create_children_sequential(population, seeds)
    }

    #[cfg(not(feature = "parallel"))]
    fn create_children(&self, population: &Population, seeds: &[u64]) -> Result<Vec<Candidate>> {
        self.create_children_sequential(population, seeds)
    }

    fn create_children_sequential(
        &self,
        population: &Population,
        seeds: &[u64],
    ) -> Result<Vec<Candidate>> {
        seeds
            .iter()
            .map(|&seed| self.create_child(population, &mut create_rng(seed)))
            .collect()
    }

    /// Builds one child from `population`.
    ///
    /// 1. Two independent tournaments; the fittest of each is a parent.
    /// 2. Crossover of the two parent tours.
    /// 3. With probability `mutation_rate`, one mutation.
    /// 4. Distance and fitness computed for the final tour.
    pub fn create_child<R: Rng>(&self, population: &Population, rng: &mut R) -> Result<Candidate> {
        let sample1 = self.create_sample(population, rng)?;
        let sample2 = self.create_sample(population, rng)?;
        let parent1 = sample1.fittest()?;
        let parent2 = sample2.fittest()?;

        let mut tour = self
            .config
            .crossover
            .apply(parent1.tour(), parent2.tour(), rng);
        self.mutate(&mut tour, rng);

        Candidate::from_tour(&self.towns, tour)
    }

    /// Draws a tournament sample of `sample_size` members from `population`.
    pub fn create_sample<R: Rng>(&self, population: &Population, rng: &mut R) -> Result<Population> {
        let members = population.members();
        let indices = self
            .config
            .sampling
            .draw(members.len(), self.config.sample_size, rng)?;
        Ok(Population::with_members(
            indices.into_iter().map(|i| members[i].clone()).collect(),
        ))
    }

    /// Mutates `tour` with probability `mutation_rate`. Returns whether the
    /// mutation fired.
    pub(crate) fn mutate<R: Rng>(&self, tour: &mut Vec<usize>, rng: &mut R) -> bool {
        if !rng.random_bool(self.config.mutation_rate) {
            return false;
        }
        self.config.mutation.apply(tour, rng);
        true
    }

    fn check_population(&self, population: &Population) -> Result<()> {
        if population.is_empty() {
            return Err(EvolveError::EmptyPopulation);
        }
        let expected = self.towns.len();
        if let Some(c) = population.iter().find(|c| c.tour().len() != expected) {
            return Err(EvolveError::TownCountMismatch {
                expected,
                found: c.tour().len(),
            });
        }
        // Same towns and same tour always reproduce the stored distance bit for bit.
        for (index, c) in population.iter().enumerate() {
            let measured = self.towns.tour_distance(c.tour());
            if measured != c.distance() {
                return Err(EvolveError::TownSetMismatch {
                    index,
                    reported: c.distance(),
                    measured,
                });
            }
        }
        self.config
            .sampling
            .check(population.size(), self.config.sample_size)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::{Crossover, Mutation, Sampling};
    use crate::town::Town;

    fn square() -> TownSet {
        TownSet::new(vec![
            Town::new(0.0, 0.0),
            Town::new(10.0, 0.0),
            Town::new(10.0, 10.0),
            Town::new(0.0, 10.0),
        ])
        .unwrap()
    }

    fn engine(towns: &TownSet, config: EngineConfig) -> EvolutionEngine {
        EvolutionEngine::new(towns.clone(), config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let towns = square();
        assert_eq!(
            EvolutionEngine::new(towns.clone(), EngineConfig::default().with_mutation_rate(1.01))
                .unwrap_err(),
            EvolveError::InvalidMutationRate { rate: 1.01 }
        );
        assert_eq!(
            EvolutionEngine::new(towns, EngineConfig::default().with_sample_size(0)).unwrap_err(),
            EvolveError::InvalidSampleSize { size: 0 }
        );
    }

    #[test]
    fn test_evolve_preserves_size() {
        let mut rng = create_rng(42);
        let towns = TownSet::random(12, 100, &mut rng).unwrap();
        let engine = engine(&towns, EngineConfig::default());
        for size in [1, 2, 3, 10, 50] {
            let pop = Population::random(&towns, size, &mut rng).unwrap();
            let next = engine.evolve(&pop, &mut rng).unwrap();
            assert_eq!(next.size(), size);
        }
    }

    #[test]
    fn test_evolve_children_are_valid_tours() {
        let mut rng = create_rng(7);
        let towns = TownSet::random(15, 100, &mut rng).unwrap();
        let engine = engine(&towns, EngineConfig::default().with_mutation_rate(0.5));
        let mut pop = Population::random(&towns, 30, &mut rng).unwrap();
        for _ in 0..20 {
            pop = engine.evolve(&pop, &mut rng).unwrap();
            for c in pop.iter() {
                let mut sorted = c.tour().to_vec();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..15).collect::<Vec<_>>());
                assert_eq!(towns.tour_distance(c.tour()), c.distance());
            }
        }
    }

    #[test]
    fn test_evolve_empty_population() {
        let mut rng = create_rng(42);
        let engine = engine(&square(), EngineConfig::default());
        assert_eq!(
            engine.evolve(&Population::with_members(vec![]), &mut rng),
            Err(EvolveError::EmptyPopulation)
        );
    }

    #[test]
    fn test_evolve_town_count_mismatch() {
        let mut rng = create_rng(42);
        let other = TownSet::random(6, 100, &mut rng).unwrap();
        let pop = Population::random(&other, 5, &mut rng).unwrap();
        let engine = engine(&square(), EngineConfig::default());
        assert_eq!(
            engine.evolve(&pop, &mut rng),
            Err(EvolveError::TownCountMismatch {
                expected: 4,
                found: 6
            })
        );
    }

    #[test]
    fn test_evolve_rejects_population_from_other_towns() {
        let towns = square();
        let stretched = TownSet::new(vec![
            Town::new(0.0, 0.0),
            Town::new(20.0, 0.0),
            Town::new(20.0, 20.0),
            Town::new(0.0, 20.0),
        ])
        .unwrap();
        let foreign = Candidate::from_tour(&stretched, vec![0, 1, 2, 3]).unwrap();
        let own = Candidate::from_tour(&towns, vec![0, 2, 1, 3]).unwrap();
        let pop = Population::with_members(vec![own, foreign]);

        let mut rng = create_rng(42);
        let engine = engine(&towns, EngineConfig::default());
        assert_eq!(
            engine.evolve(&pop, &mut rng),
            Err(EvolveError::TownSetMismatch {
                index: 1,
                reported: 80.0,
                measured: 40.0
            })
        );
    }

    #[test]
    fn test_evolve_sample_larger_than_population() {
        let mut rng = create_rng(42);
        let towns = square();
        let pop = Population::random(&towns, 5, &mut rng).unwrap();

        let strict = engine(
            &towns,
            EngineConfig::default().with_sampling(Sampling::WithoutReplacement),
        );
        assert_eq!(
            strict.evolve(&pop, &mut rng),
            Err(EvolveError::SampleLargerThanPopulation {
                sample_size: 10,
                population_size: 5
            })
        );

        let lenient = engine(&towns, EngineConfig::default());
        assert_eq!(lenient.evolve(&pop, &mut rng).unwrap().size(), 5);
    }

    #[test]
    fn test_sample_draws_from_given_population() {
        let mut rng = create_rng(42);
        let towns = square();
        let engine = engine(&towns, EngineConfig::default().with_sample_size(6));
        let only = Candidate::from_tour(&towns, vec![2, 3, 0, 1]).unwrap();
        let pop = Population::with_members(vec![only.clone(); 3]);

        let sample = engine.create_sample(&pop, &mut rng).unwrap();
        assert_eq!(sample.size(), 6);
        assert!(sample.iter().all(|c| *c == only));
    }

    #[test]
    fn test_zero_mutation_rate_never_mutates() {
        let mut rng = create_rng(42);
        let engine = engine(&square(), EngineConfig::default().with_mutation_rate(0.0));
        let original = vec![3, 1, 0, 2];
        for _ in 0..5000 {
            let mut tour = original.clone();
            assert!(!engine.mutate(&mut tour, &mut rng));
            assert_eq!(tour, original);
        }
    }

    #[test]
    fn test_full_mutation_rate_swaps_exactly_once() {
        let mut rng = create_rng(42);
        let towns = TownSet::random(10, 100, &mut rng).unwrap();
        let engine = engine(&towns, EngineConfig::default().with_mutation_rate(1.0));
        let original: Vec<usize> = (0..10).collect();
        let mut noop_swaps = 0;
        for _ in 0..1000 {
            let mut tour = original.clone();
            assert!(engine.mutate(&mut tour, &mut rng));
            let changed = tour.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert!(changed == 0 || changed == 2, "changed {changed} positions");
            if changed == 0 {
                noop_swaps += 1;
            }
        }
        // Coinciding indices happen about 1 time in 10.
        assert!(noop_swaps > 0 && noop_swaps < 300, "noop swaps: {noop_swaps}");
    }

    #[test]
    fn test_zero_mutation_clones_uniform_population() {
        let mut rng = create_rng(42);
        let towns = TownSet::random(9, 100, &mut rng).unwrap();
        let engine = engine(&towns, EngineConfig::default().with_mutation_rate(0.0));
        let only = Candidate::random(&towns, &mut rng).unwrap();
        let pop = Population::with_members(vec![only.clone(); 8]);
        for _ in 0..10 {
            let next = engine.evolve(&pop, &mut rng).unwrap();
            assert!(next.iter().all(|c| *c == only));
        }
    }

    #[test]
    fn test_optimal_square_population_stays_optimal() {
        let mut rng = create_rng(42);
        let towns = square();
        let engine = engine(&towns, EngineConfig::default().with_mutation_rate(0.0));
        let optimal = Candidate::from_tour(&towns, vec![0, 1, 2, 3]).unwrap();
        let pop = Population::with_members(vec![optimal; 10]);
        let next = engine.evolve(&pop, &mut rng).unwrap();
        for c in next.iter() {
            assert_eq!(c.distance(), 40.0);
            assert_eq!(c.fitness(), 1.0 / 40.0);
        }
    }

    #[test]
    fn test_same_seed_reproducible() {
        let run = |seed: u64| {
            let mut rng = create_rng(seed);
            let towns = TownSet::random(10, 100, &mut rng).unwrap();
            let engine = engine(&towns, EngineConfig::default().with_mutation_rate(0.2));
            let mut pop = Population::random(&towns, 30, &mut rng).unwrap();
            for _ in 0..25 {
                pop = engine.evolve(&pop, &mut rng).unwrap();
            }
            pop
        };
        assert_eq!(run(99), run(99));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let run = |parallel: bool| {
            let mut rng = create_rng(5);
            let towns = TownSet::random(10, 100, &mut rng).unwrap();
            let engine = engine(
                &towns,
                EngineConfig::default()
                    .with_mutation_rate(0.3)
                    .with_parallel(parallel),
            );
            let mut pop = Population::random(&towns, 40, &mut rng).unwrap();
            for _ in 0..10 {
                pop = engine.evolve(&pop, &mut rng).unwrap();
            }
            pop
        };
        assert_eq!(run(true), run(false));
    }

    #[test]
    fn test_all_operator_combinations() {
        let mut rng = create_rng(11);
        let towns = TownSet::random(12, 100, &mut rng).unwrap();
        for crossover in [Crossover::SinglePoint, Crossover::Segment] {
            for mutation in [Mutation::Swap, Mutation::Insert, Mutation::Invert] {
                let engine = engine(
                    &towns,
                    EngineConfig::default()
                        .with_crossover(crossover)
                        .with_mutation(mutation)
                        .with_mutation_rate(0.5),
                );
                let mut pop = Population::random(&towns, 20, &mut rng).unwrap();
                for _ in 0..10 {
                    pop = engine.evolve(&pop, &mut rng).unwrap();
                }
                assert_eq!(pop.size(), 20, "{crossover:?}/{mutation:?}");
            }
        }
    }

    #[test]
    fn test_best_distance_improves_on_average() {
        let trials = 10;
        let mut initial_total = 0.0;
        let mut final_total = 0.0;
        for seed in 0..trials {
            let mut rng = create_rng(seed);
            let towns = TownSet::random(12, 100, &mut rng).unwrap();
            let engine = engine(&towns, EngineConfig::default());
            let mut pop = Population::random(&towns, 50, &mut rng).unwrap();
            initial_total += pop.fittest().unwrap().distance();
            for _ in 0..100 {
                pop = engine.evolve(&pop, &mut rng).unwrap();
            }
            final_total += pop.fittest().unwrap().distance();
        }
        assert!(
            final_total <= initial_total,
            "mean best distance grew: {} -> {}",
            initial_total / trials as f64,
            final_total / trials as f64
        );
    }
}
