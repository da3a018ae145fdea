//! Domain-agnostic generational genetic algorithm.
//!
//! Given a population of candidate solutions ("genomes") that each know
//! their own fitness, the engine repeatedly selects, recombines, and mutates
//! them to produce fitter populations:
//!
//! - **Genome contract**: [`ga::Genome`] — fitness, size, compare,
//!   crossover, mutate.
//! - **Partial select**: randomized quickselect that moves the top-K
//!   genomes to the front in expected linear time.
//! - **Selection**: roulette, rank-weighted, and truncation strategies.
//! - **Engine**: [`ga::GeneticAlgorithm`] — elitism, survivor selection,
//!   early stopping, and per-generation observers.
//!
//! Supporting modules provide a seeded random source ([`random`]),
//! `.properties` configuration ([`properties`]), and an example OneMax
//! genome ([`bitstring`]).
//!
//! # Architecture
//!
//! The engine is single-threaded and fully reproducible: every random draw
//! comes from one generator supplied at construction. It contains no
//! domain-specific concepts; genome types are defined by consumers.

pub mod bitstring;
pub mod ga;
pub mod properties;
pub mod random;
