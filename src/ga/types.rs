//! Core trait definitions for the GA framework.
//!
//! [`Genome`] is the contract between the generic engine and a
//! domain-specific candidate solution. The engine never computes fitness
//! itself: a genome owns its fitness value and refreshes it whenever its
//! content changes.

use rand::Rng;
use std::cmp::Ordering;

/// Compares two fitness values, higher is better.
///
/// Incomparable values (NaN) are treated as equal so that partitioning and
/// sorting never panic.
pub fn compare_fitness(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// A candidate solution in the GA population.
///
/// Higher fitness is considered better (maximization). Implementors keep
/// fitness in a field that is set at construction and recomputed by
/// [`mutate`](Genome::mutate); the engine only ever reads it.
///
/// # Caller obligations
///
/// The engine does not check that `crossover` and `mutate` preserve
/// [`size`](Genome::size) or refresh fitness. Violating either leaves the
/// run's behavior unspecified.
///
/// # Implementing
///
/// ```ignore
/// struct Weights {
///     genes: Vec<f64>,
///     fitness: f64,
/// }
///
/// impl Genome for Weights {
///     fn fitness(&self) -> f64 { self.fitness }
///     fn size(&self) -> usize { self.genes.len() }
///     fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> [Self; 2] { /* ... */ }
///     fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) { /* ... */ }
/// }
/// ```
pub trait Genome: Sized {
    /// Returns the last computed fitness.
    ///
    /// Must be stable between mutations.
    fn fitness(&self) -> f64;

    /// Returns the fixed dimensionality chosen at construction.
    fn size(&self) -> usize;

    /// Total order by fitness; ties are equal regardless of content.
    fn compare(&self, other: &Self) -> Ordering {
        compare_fitness(self.fitness(), other.fitness())
    }

    /// Recombines `self` and `other` into two offspring.
    ///
    /// Neither parent is modified. All randomness must come from `rng`.
    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> [Self; 2];

    /// Perturbs the genome in place, each locus changing with probability
    /// `rate`, then recomputes fitness.
    fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R);
}

/// Thread-safety bound on genomes, `Send` only with the `parallel` feature.
///
/// Sequential builds accept any genome type, including ones holding `Rc`
/// or `Cell` state.
#[cfg(feature = "parallel")]
pub trait MaybeSend: Send {}

#[cfg(feature = "parallel")]
impl<T: Send> MaybeSend for T {}

/// Thread-safety bound on genomes, `Send` only with the `parallel` feature.
///
/// Sequential builds accept any genome type, including ones holding `Rc`
/// or `Cell` state.
#[cfg(not(feature = "parallel"))]
pub trait MaybeSend {}

#[cfg(not(feature = "parallel"))]
impl<T> MaybeSend for T {}
