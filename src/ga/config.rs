//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of a run. It is read once when the
//! engine is built and never changes afterwards.

use super::error::GaError;
use super::selection::Selection;
use crate::properties::ConfigSource;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use generic_ga::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.elite_count, 1);
/// assert_eq!(config.selection, Selection::Truncation);
/// assert!(config.fitness_threshold.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use generic_ga::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_elite_count(4)
///     .with_selection(Selection::Ranked)
///     .with_mutation_rate(0.02)
///     .with_fitness_threshold(1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of genomes in every population after the first generation.
    pub population_size: usize,

    /// Number of fittest genomes carried over unchanged each generation.
    ///
    /// Must be less than `population_size`.
    pub elite_count: usize,

    /// Per-locus mutation probability (0.0–1.0).
    ///
    /// What a locus is, and how it changes, is up to the genome type.
    pub mutation_rate: f64,

    /// Stop early once the fittest genome reaches this fitness.
    ///
    /// `None` never stops early.
    pub fitness_threshold: Option<f64>,

    /// Selection strategy for producing offspring.
    pub selection: Selection,

    /// Whether to mutate offspring in parallel.
    ///
    /// Only honoured with the `parallel` feature. Parallel runs are
    /// reproducible but draw a different random sequence than sequential
    /// ones.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            elite_count: 1,
            mutation_rate: 0.1,
            fitness_threshold: None,
            selection: Selection::default(),
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Key for the population size.
    pub const POPULATION_SIZE_KEY: &'static str = "population.size";
    /// Key for the elite count.
    pub const ELITE_COUNT_KEY: &'static str = "elite.count";
    /// Key for the mutation rate.
    pub const MUTATION_RATE_KEY: &'static str = "mutation.rate";
    /// Key for the early-stopping fitness threshold.
    pub const FITNESS_THRESHOLD_KEY: &'static str = "fitness.threshold";
    /// Key for the selection method name.
    pub const SELECTION_METHOD_KEY: &'static str = "selection.method";

    /// Builds a configuration from string-typed key/value pairs.
    ///
    /// Missing or unparseable numeric values fall back to the defaults with
    /// a warning; a missing threshold disables early stopping; an unknown
    /// selection name falls back to truncation. Structural problems such as
    /// an elite count larger than the population are left for
    /// [`validate`](Self::validate).
    pub fn from_source<S: ConfigSource>(source: &S) -> Self {
        let defaults = Self::default();

        let population_size = source
            .parsed::<usize>(Self::POPULATION_SIZE_KEY)
            .unwrap_or_else(|| {
                log::warn!(
                    "{} was not set, default of {} will be used",
                    Self::POPULATION_SIZE_KEY,
                    defaults.population_size
                );
                defaults.population_size
            });

        let elite_count = source
            .parsed::<usize>(Self::ELITE_COUNT_KEY)
            .unwrap_or_else(|| {
                log::warn!(
                    "{} was not set, default of {} will be used",
                    Self::ELITE_COUNT_KEY,
                    defaults.elite_count
                );
                defaults.elite_count
            });

        let mutation_rate = source
            .parsed::<f64>(Self::MUTATION_RATE_KEY)
            .filter(|rate| (0.0..=1.0).contains(rate))
            .unwrap_or_else(|| {
                log::warn!(
                    "{} was not set to a value in [0, 1], default of {} will be used",
                    Self::MUTATION_RATE_KEY,
                    defaults.mutation_rate
                );
                defaults.mutation_rate
            });

        let fitness_threshold = source
            .parsed::<f64>(Self::FITNESS_THRESHOLD_KEY)
            .filter(|t| !t.is_nan());
        if fitness_threshold.is_none() {
            log::warn!(
                "{} was not set, the algorithm will not stop early",
                Self::FITNESS_THRESHOLD_KEY
            );
        }

        let selection =
            Selection::from_name_or_default(source.get(Self::SELECTION_METHOD_KEY).unwrap_or(""));

        Self {
            population_size,
            elite_count,
            mutation_rate,
            fitness_threshold,
            selection,
            ..defaults
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the early-stopping fitness threshold.
    pub fn with_fitness_threshold(mut self, threshold: f64) -> Self {
        self.fitness_threshold = Some(threshold);
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Enables or disables parallel mutation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of freshly bred genomes in every generation.
    pub fn surviving_children(&self) -> usize {
        self.population_size.saturating_sub(self.elite_count)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        let minimum = self.selection.min_population();
        if self.population_size < minimum {
            return Err(GaError::PopulationTooSmall {
                size: self.population_size,
                minimum,
                selection: self.selection,
            });
        }
        if self.elite_count >= self.population_size {
            return Err(GaError::EliteCountTooLarge {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}
