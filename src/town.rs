//! Towns and the fixed set of towns a tour must visit.
//!
//! A [`Town`] is a point on the plane. A [`TownSet`] is the canonical,
//! ordered universe of towns for one run; a town's identity is its index
//! in the set, so two towns with identical coordinates are still distinct
//! stops on a tour.

use crate::error::{EvolveError, Result};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point on the Cartesian plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Town {
    x: f64,
    y: f64,
}

impl Town {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Town) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The ordered set of towns every candidate tour is a permutation of.
///
/// # Examples
///
/// ```
/// use tsp_evolve::town::{Town, TownSet};
///
/// let towns = TownSet::new(vec![Town::new(0.0, 0.0), Town::new(3.0, 4.0)]).unwrap();
/// assert_eq!(towns.len(), 2);
/// assert_eq!(towns.distance(0, 1), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TownSet {
    towns: Vec<Town>,
}

impl TownSet {
    /// Wraps a list of towns.
    ///
    /// # Errors
    /// - [`EvolveError::EmptyTownSet`] if the list is empty.
    /// - [`EvolveError::NonFiniteCoordinate`] if any coordinate is NaN or
    ///   infinite.
    pub fn new(towns: Vec<Town>) -> Result<Self> {
        if towns.is_empty() {
            return Err(EvolveError::EmptyTownSet);
        }
        if let Some(index) = towns
            .iter()
            .position(|t| !(t.x.is_finite() && t.y.is_finite()))
        {
            return Err(EvolveError::NonFiniteCoordinate { index });
        }
        Ok(Self { towns })
    }

    /// Generates `count` towns whose coordinates are uniform random
    /// integers in `[0, bound)` on both axes.
    pub fn random<R: Rng>(count: usize, bound: u32, rng: &mut R) -> Result<Self> {
        if bound == 0 {
            return Err(EvolveError::InvalidCoordinateBound);
        }
        let towns = (0..count)
            .map(|_| {
                let x = rng.random_range(0..bound);
                let y = rng.random_range(0..bound);
                Town::new(f64::from(x), f64::from(y))
            })
            .collect();
        Self::new(towns)
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }

    /// Always `false`: a `TownSet` cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Town> {
        self.towns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Town> {
        self.towns.iter()
    }

    pub fn as_slice(&self) -> &[Town] {
        &self.towns
    }

    /// Distance between the towns at indices `a` and `b`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.towns[a].distance_to(&self.towns[b])
    }

    /// Length of the closed tour visiting `tour` in order and returning
    /// from the last town to the first.
    ///
    /// # Panics
    /// Panics if an index in `tour` is out of range.
    pub fn tour_distance(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let legs: f64 = tour.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        legs + self.distance(tour[tour.len() - 1], tour[0])
    }
}
