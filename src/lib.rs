//! Genetic-algorithm approximation of the Traveling Salesman Problem.
//!
//! Given a fixed set of towns on the plane, the crate searches for a short
//! closed tour visiting each town once:
//!
//! - **Towns** ([`town`]): points and the fixed set a tour must cover.
//! - **Candidates** ([`candidate`]): one tour with its distance and
//!   fitness (`1 / distance`).
//! - **Populations** ([`population`]): ordered candidates with a fittest
//!   query.
//! - **Evolution** ([`evolution`]): tournament selection, ordered
//!   crossover and mutation producing the next population.
//! - **Driver** ([`driver`]): random towns, a random initial population,
//!   a fixed number of generations, before/after distances.
//!
//! Randomness is always passed in, so a seeded generator from [`random`]
//! makes every run reproducible.
//!
//! # Example
//!
//! ```
//! use tsp_evolve::driver::{Driver, DriverConfig};
//!
//! let config = DriverConfig::default().with_generations(50).with_seed(7);
//! let report = Driver::run(&config).unwrap();
//! assert_eq!(report.final_distances.len(), config.population_size);
//! ```

pub mod candidate;
pub mod driver;
pub mod error;
pub mod evolution;
pub mod population;
pub mod random;
pub mod town;

pub use error::{EvolveError, Result};
