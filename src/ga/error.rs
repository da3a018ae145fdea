//! Structural precondition failures.

use super::selection::Selection;

/// Errors rejected at configuration validation or engine construction.
///
/// Once a [`GeneticAlgorithm`](super::GeneticAlgorithm) has been built,
/// advancing it cannot fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("population size {size} is below the minimum of {minimum} required by {selection} selection")]
    PopulationTooSmall {
        size: usize,
        minimum: usize,
        selection: Selection,
    },
    #[error("elite count {elite_count} must be less than population size {population_size}")]
    EliteCountTooLarge {
        elite_count: usize,
        population_size: usize,
    },
    #[error("mutation rate {0} must be a finite value in [0, 1]")]
    InvalidMutationRate(f64),
    #[error("initial population has {actual} genomes, at least {minimum} are required")]
    InitialPopulationTooSmall { actual: usize, minimum: usize },
}
