//! Permutation operators on town-index tours.
//!
//! Every operator here takes tours that are permutations of `0..n` and
//! returns (or leaves behind) a permutation of `0..n`, so a child built
//! from two parents always visits every town exactly once.
//!
//! # Crossover Operators
//!
//! - [`single_point_order_crossover`]: head from parent1, tail in parent2's order
//! - [`segment_order_crossover`] (OX): Davis (1985) two-cut variant
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: Exchange two random positions, O(1)
//! - [`insert_mutation`]: Remove and reinsert at random position, O(n)
//! - [`invert_mutation`]: Reverse a random segment (2-opt), O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Crossover strategy used to combine two parent tours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossover {
    /// Cut point `k` drawn uniformly from `[0, n)`: positions `< k` come from
    /// parent1, the rest are parent2's remaining towns in parent2's order.
    #[default]
    SinglePoint,

    /// Davis order crossover: a random segment from parent1, the remaining
    /// towns from parent2 starting after the segment and wrapping around.
    Segment,
}

impl Crossover {
    /// Produces one child tour from two parent tours.
    ///
    /// # Panics
    /// Panics if the parents have different lengths or are empty.
    pub fn apply<R: Rng>(&self, parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
        match self {
            Crossover::SinglePoint => {
                let point = single_point_cut(parent1.len(), rng);
                single_point_order_crossover(parent1, parent2, point)
            }
            Crossover::Segment => segment_order_crossover(parent1, parent2, rng),
        }
    }
}

/// Mutation applied to a child tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mutation {
    /// Swap the towns at two independently drawn indices.
    #[default]
    Swap,
    /// Move one town to another position.
    Insert,
    /// Reverse the order of a random segment.
    Invert,
}

impl Mutation {
    pub fn apply<R: Rng>(&self, tour: &mut Vec<usize>, rng: &mut R) {
        match self {
            Mutation::Swap => swap_mutation(tour, rng),
            Mutation::Insert => insert_mutation(tour, rng),
            Mutation::Invert => invert_mutation(tour, rng),
        }
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point ordered crossover.
///
/// Positions `0..point` are copied from `parent1`. Positions `point..n`
/// receive the towns not yet in the child, in the order they appear in
/// `parent2`. With `point == 0` the child equals `parent2`.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or `point > n`.
pub fn single_point_order_crossover(parent1: &[usize], parent2: &[usize], point: usize) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(point <= n, "crossover point out of range");

    let mut child = Vec::with_capacity(n);
    let mut placed = vec![false; n];

    for &town in &parent1[..point] {
        child.push(town);
        placed[town] = true;
    }
    child.extend(parent2.iter().copied().filter(|&town| !placed[town]));

    child
}

/// Order Crossover (OX) with a random segment.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]` from parent1
/// 2. Copy segment to child at the same positions
/// 3. Fill remaining positions with towns from parent2, in their original
///    order starting after `end`, skipping towns already present
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn segment_order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return parent1.to_vec();
    }

    let (start, end) = random_segment(n, rng);
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    for i in start..=end {
        child[i] = parent1[i];
        in_segment[parent1[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let town = parent2[(end + 1 + offset) % n];
        if !in_segment[town] {
            child[pos] = town;
            pos = (pos + 1) % n;
        }
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange the towns at two independently drawn positions.
///
/// The positions may coincide, in which case the tour is unchanged.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n == 0 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    tour.swap(i, j);
}

/// Insert mutation: remove a town and reinsert it at a random position.
///
/// # Complexity
/// O(n) due to array shifting
pub fn insert_mutation<R: Rng>(tour: &mut Vec<usize>, rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let from = rng.random_range(0..n);
    let town = tour.remove(from);
    let to = rng.random_range(0..n);
    tour.insert(to, town);
}

/// Invert mutation: reverse a random segment (2-opt move).
///
/// # Complexity
/// O(n) worst case for segment reversal
pub fn invert_mutation<R: Rng>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    tour[start..=end].reverse();
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a crossover cut uniformly from `[0, n)`.
fn single_point_cut<R: Rng>(n: usize, rng: &mut R) -> usize {
    rng.random_range(0..n)
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
