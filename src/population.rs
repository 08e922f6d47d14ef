//! An ordered collection of candidates.
//!
//! A [`Population`] is built in one of two ways: [`Population::random`]
//! for a fresh generation of shuffled tours, or [`Population::with_members`]
//! for an already-assembled list (the next generation, or a tournament
//! sample). Its size is always the number of members it holds.

use crate::candidate::Candidate;
use crate::error::{EvolveError, Result};
use crate::town::TownSet;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered list of candidates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Population {
    members: Vec<Candidate>,
}

/// Distance summary of one population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PopulationStats {
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
}

impl Population {
    /// Creates `size` candidates, each an independent uniform shuffle of
    /// `towns`.
    ///
    /// # Errors
    /// [`EvolveError::InvalidPopulationSize`] if `size` is zero, or any error from
    /// [`Candidate::random`].
    pub fn random<R: Rng>(towns: &TownSet, size: usize, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(EvolveError::InvalidPopulationSize);
        }
        let members = (0..size)
            .map(|_| Candidate::random(towns, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { members })
    }

    /// Wraps an existing member list as-is.
    pub fn with_members(members: Vec<Candidate>) -> Self {
        Self { members }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.members.iter()
    }

    pub fn into_members(self) -> Vec<Candidate> {
        self.members
    }

    /// Returns the member with the shortest tour.
    ///
    /// Single linear scan; on ties the earliest member wins.
    ///
    /// # Errors
    /// [`EvolveError::EmptyPopulation`] if there are no members.
    pub fn fittest(&self) -> Result<&Candidate> {
        let (first, rest) = self
            .members
            .split_first()
            .ok_or(EvolveError::EmptyPopulation)?;
        Ok(rest.iter().fold(first, |best, c| {
            if c.distance() < best.distance() {
                c
            } else {
                best
            }
        }))
    }

    /// Tour distance of every member, in member order.
    pub fn distances(&self) -> Vec<f64> {
        self.members.iter().map(Candidate::distance).collect()
    }

    /// Best, mean and worst tour distance.
    ///
    /// # Errors
    /// [`EvolveError::EmptyPopulation`] if there are no members.
    pub fn stats(&self) -> Result<PopulationStats> {
        let best = self.fittest()?.distance();
        let (sum, worst) = self
            .members
            .iter()
            .map(Candidate::distance)
            .fold((0.0, f64::NEG_INFINITY), |(sum, worst), d| {
                (sum + d, worst.max(d))
            });
        Ok(PopulationStats {
            best,
            mean: sum / self.members.len() as f64,
            worst,
        })
    }
}
