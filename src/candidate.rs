//! A candidate solution: one closed tour over every town.

use crate::error::{EvolveError, Result};
use crate::town::{Town, TownSet};
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A visiting order over the whole [`TownSet`] together with its length.
///
/// The tour is stored as town indices and is always a permutation of
/// `0..towns.len()`. `distance` and `fitness` are computed once at
/// construction and cannot drift from the tour, since a `Candidate` has no
/// mutators: crossover and mutation build new candidates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    tour: Vec<usize>,
    distance: f64,
    fitness: f64,
}

impl Candidate {
    /// Builds a candidate from an explicit visiting order.
    ///
    /// # Errors
    /// - [`EvolveError::InvalidTour`] if `tour` is not a permutation of
    ///   `0..towns.len()`.
    /// - [`EvolveError::UndefinedFitness`] if the closed tour has zero
    ///   length (a single town, or every town at the same point), or a
    ///   length too large to represent.
    pub fn from_tour(towns: &TownSet, tour: Vec<usize>) -> Result<Self> {
        validate_permutation(&tour, towns.len())?;

        let distance = towns.tour_distance(&tour);
        if !(distance > 0.0 && distance.is_finite()) {
            return Err(EvolveError::UndefinedFitness { towns: towns.len() });
        }

        Ok(Self {
            tour,
            distance,
            fitness: 1.0 / distance,
        })
    }

    /// Builds a candidate visiting the towns in a uniformly random order.
    pub fn random<R: Rng>(towns: &TownSet, rng: &mut R) -> Result<Self> {
        let mut tour: Vec<usize> = (0..towns.len()).collect();
        tour.shuffle(rng);
        Self::from_tour(towns, tour)
    }

    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Closed-tour length.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// `1 / distance`; higher is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Resolves the tour indices to towns, in visiting order.
    ///
    /// # Panics
    /// Panics if `towns` is not the set this candidate was built from.
    pub fn towns_in_order<'a>(&'a self, towns: &'a TownSet) -> impl Iterator<Item = &'a Town> {
        self.tour.iter().map(move |&i| &towns.as_slice()[i])
    }

    pub fn into_tour(self) -> Vec<usize> {
        self.tour
    }
}

/// Checks that `tour` visits each of `0..n` exactly once.
fn validate_permutation(tour: &[usize], n: usize) -> Result<()> {
    if tour.len() != n {
        return Err(EvolveError::invalid_tour(
            n,
            format!("tour has {} stops", tour.len()),
        ));
    }
    let mut seen = vec![false; n];
    for &town in tour {
        if town >= n {
            return Err(EvolveError::invalid_tour(
                n,
                format!("town index {town} out of range"),
            ));
        }
        if seen[town] {
            return Err(EvolveError::invalid_tour(
                n,
                format!("town {town} visited twice"),
            ));
        }
        seen[town] = true;
    }
    Ok(())
}
