//! Genetic Algorithm engine.
//!
//! A generic, domain-agnostic generational GA. Users supply a [`Genome`]
//! type that knows its own fitness, how to recombine with another genome,
//! and how to mutate; the engine handles elitism, selection, survivor
//! choice, and termination.
//!
//! # Core Traits
//!
//! - [`Genome`]: A candidate solution that maintains its own fitness
//! - [`PopulationObserver`]: Receives each completed generation
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (population size, elites, mutation rate)
//! - [`Selection`]: Roulette, ranked, or truncation selection
//! - [`GeneticAlgorithm`]: Owns the population and advances generations
//! - [`FitnessHistory`], [`CsvFitnessLogger`]: Ready-made observers
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod error;
mod observer;
mod partial_select;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use error::GaError;
pub use observer::{
    CsvFitnessLogger, FitnessHistory, FitnessSummary, FnObserver, PopulationObserver,
    FITNESS_CSV_HEADERS,
};
pub use partial_select::{fittest_index, partial_select, partial_select_by};
pub use runner::GeneticAlgorithm;
pub use selection::{Selection, UnknownSelection};
pub use types::{compare_fitness, Genome, MaybeSend};
