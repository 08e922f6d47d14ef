//! Genetic evolution of TSP tours.
//!
//! [`EvolutionEngine`] turns one [`Population`](crate::population::Population)
//! into the next: every child comes from two tournament winners, an ordered
//! crossover and, with probability `mutation_rate`, one mutation.
//!
//! # Key Types
//!
//! - [`EngineConfig`]: Tournament size, mutation rate, operator choices
//! - [`EvolutionEngine`]: Produces the next generation
//! - [`Sampling`]: How tournament samples are drawn
//! - [`Crossover`] / [`Mutation`]: Permutation-preserving operators
//!
//! # Submodules
//!
//! - [`operators`]: Permutation crossover and mutation operators on town-index tours
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod engine;
pub mod operators;
mod selection;

pub use config::EngineConfig;
pub use engine::EvolutionEngine;
pub use operators::{Crossover, Mutation};
pub use selection::Sampling;
