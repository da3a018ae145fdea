//! Selection strategies for the GA.
//!
//! A strategy consumes the current population and emits offspring produced
//! by [`Genome::crossover`]. Offspring are returned in pairs until at least
//! the requested count exists; the engine mutates them and keeps the
//! fittest survivors.
//!
//! All strategies assume **maximization** (higher fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use super::partial_select::partial_select_by;
use super::types::{compare_fitness, Genome};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use generic_ga::ga::Selection;
///
/// let sel: Selection = "Ranked".parse().unwrap();
/// assert_eq!(sel, Selection::Ranked);
///
/// // Unknown names fall back to truncation.
/// assert_eq!(Selection::from_name_or_default("tournament"), Selection::Truncation);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Selection {
    /// Uniformly random pairs of distinct parents.
    ///
    /// Despite the name, draws are not weighted by fitness: selection
    /// pressure comes only from elitism and survivor truncation around it.
    ///
    /// # Complexity
    /// O(1) per pair
    Roulette,

    /// Rank-weighted selection.
    ///
    /// The population is sorted ascending by fitness and rank `r` (0-based,
    /// `n - 1` fittest) is drawn with probability `(r + 1) / (n(n+1)/2)`.
    ///
    /// # Complexity
    /// O(n log n) per generation (sort), O(1) per pair
    Ranked,

    /// Keep the fittest half, then pair uniformly among it.
    ///
    /// # Complexity
    /// Expected O(n) per generation (partial select), O(1) per pair
    #[default]
    Truncation,
}

impl Selection {
    /// Smallest population this strategy can draw two distinct parents from.
    pub fn min_population(self) -> usize {
        match self {
            Selection::Roulette | Selection::Ranked => 2,
            // halved before pairing
            Selection::Truncation => 4,
        }
    }

    /// Parses a strategy name, falling back to [`Selection::Truncation`]
    /// with a warning when the name is empty or unknown.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!(
                "invalid or blank selection method {:?}, truncation will be used",
                name.trim()
            );
            Selection::Truncation
        })
    }

    /// Produces at least `count` offspring from `population`.
    ///
    /// Offspring come in pairs, so an odd `count` yields one extra.
    /// The population itself is not modified.
    ///
    /// # Panics
    /// Panics if `population` is smaller than
    /// [`min_population`](Self::min_population); the engine rejects such
    /// configurations at construction.
    pub fn select<G: Genome, R: Rng>(&self, population: &[G], count: usize, rng: &mut R) -> Vec<G> {
        assert!(
            population.len() >= self.min_population(),
            "{self} selection needs at least {} genomes, got {}",
            self.min_population(),
            population.len()
        );

        let parents: Vec<&G> = population.iter().collect();
        match self {
            Selection::Roulette => roulette(&parents, count, rng),
            Selection::Ranked => ranked(parents, count, rng),
            Selection::Truncation => truncation(parents, count, rng),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Selection::Roulette => "roulette",
            Selection::Ranked => "ranked",
            Selection::Truncation => "truncation",
        };
        f.write_str(name)
    }
}

/// Error returned when a selection method name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection method {0:?}")]
pub struct UnknownSelection(pub String);

impl FromStr for Selection {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roulette" => Ok(Selection::Roulette),
            "ranked" => Ok(Selection::Ranked),
            "truncation" => Ok(Selection::Truncation),
            _ => Err(UnknownSelection(s.trim().to_string())),
        }
    }
}

/// Makes a second index distinct from `first`.
///
/// `second` must have been drawn from a range one shorter than the first,
/// so bumping it past a collision keeps it in bounds.
fn distinct_from(first: usize, second: usize) -> usize {
    if second == first {
        second + 1
    } else {
        second
    }
}

/// Maps a uniform draw in `[0, n(n+1)/2)` to a triangularly distributed
/// rank in `[0, n)`.
fn rank_from_draw(x: usize) -> usize {
    ((2.0 * x as f64 + 0.25).sqrt() - 0.5) as usize
}

/// Uniform pairing over `parents`.
fn roulette<G: Genome, R: Rng>(parents: &[&G], count: usize, rng: &mut R) -> Vec<G> {
    let n = parents.len();
    let mut children = Vec::with_capacity(count + 1);

    while children.len() < count {
        let first = rng.random_range(0..n);
        let second = distinct_from(first, rng.random_range(0..n - 1));
        children.extend(parents[first].crossover(parents[second], rng));
    }

    children
}

/// Rank-weighted pairing.
fn ranked<G: Genome, R: Rng>(mut parents: Vec<&G>, count: usize, rng: &mut R) -> Vec<G> {
    parents.sort_by(|a, b| compare_fitness(a.fitness(), b.fitness()));

    let n = parents.len();
    let first_range = n * (n + 1) / 2;
    // as if the first parent had been removed
    let second_range = n * (n - 1) / 2;
    let mut children = Vec::with_capacity(count + 1);

    while children.len() < count {
        let first = rank_from_draw(rng.random_range(0..first_range)).min(n - 1);
        let second = rank_from_draw(rng.random_range(0..second_range)).min(n - 2);
        let second = distinct_from(first, second);
        children.extend(parents[first].crossover(parents[second], rng));
    }

    children
}

/// Uniform pairing over the fittest half.
fn truncation<G: Genome, R: Rng>(mut parents: Vec<&G>, count: usize, rng: &mut R) -> Vec<G> {
    let num_parents = parents.len() / 2;
    partial_select_by(&mut parents, num_parents, rng, |a, b| a.compare(b));
    parents.truncate(num_parents);
    roulette(&parents, count, rng)
}
