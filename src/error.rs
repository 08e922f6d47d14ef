//! Error type shared by every fallible operation in the crate.

/// Errors raised while building towns, candidates, populations, or while
/// configuring and running the evolution engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolveError {
    #[error("UndefinedFitness: tour over {towns} town(s) has zero or non-finite length")]
    UndefinedFitness { towns: usize },

    #[error("EmptyPopulation: population has no candidates")]
    EmptyPopulation,

    #[error("EmptyTownSet: at least one town is required")]
    EmptyTownSet,

    #[error("NonFiniteCoordinate: town {index} has a NaN or infinite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("InvalidCoordinateBound: coordinate bound must be positive")]
    InvalidCoordinateBound,

    #[error("InvalidTour: not a permutation of {expected} towns, {reason}")]
    InvalidTour { expected: usize, reason: String },

    #[error("TownCountMismatch: expected tours over {expected} towns, found {found}")]
    TownCountMismatch { expected: usize, found: usize },

    #[error(
        "TownSetMismatch: candidate {index} reports distance {reported}, tour measures {measured} on these towns"
    )]
    TownSetMismatch {
        index: usize,
        reported: f64,
        measured: f64,
    },

    #[error("InvalidMutationRate: rate must be within [0, 1], got {rate}")]
    InvalidMutationRate { rate: f64 },

    #[error("InvalidSampleSize: sample size must be at least 1, got {size}")]
    InvalidSampleSize { size: usize },

    #[error(
        "SampleLargerThanPopulation: cannot draw {sample_size} distinct candidates from {population_size}"
    )]
    SampleLargerThanPopulation {
        sample_size: usize,
        population_size: usize,
    },

    #[error("InvalidPopulationSize: population size must be at least 1")]
    InvalidPopulationSize,

    #[error("InvalidGenerations: generation count must be at least 1")]
    InvalidGenerations,
}

impl EvolveError {
    pub(crate) fn invalid_tour(expected: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTour {
            expected,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvolveError>;
