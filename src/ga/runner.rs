//! GA generation engine.
//!
//! [`GeneticAlgorithm`] owns one population and advances it a generation at
//! a time: elitism → selection → mutation → survivor selection → notify
//! observers.

use super::config::GaConfig;
use super::error::GaError;
use super::observer::{FnObserver, PopulationObserver};
use super::partial_select::{fittest_index, partial_select};
use super::types::{compare_fitness, Genome, MaybeSend};
use rand::rngs::StdRng;
use rand::Rng;
use std::cmp::Ordering;

/// Generational genetic algorithm over genomes of type `G`.
///
/// All randomness is drawn from the single source `R` supplied at
/// construction, in a fixed order per generation, so two engines built from
/// the same configuration, population, and seed evolve identically.
///
/// Observers may borrow from the caller for `'a`.
///
/// # Usage
///
/// ```
/// use generic_ga::bitstring::BitString;
/// use generic_ga::ga::{FitnessHistory, GaConfig, GeneticAlgorithm, Genome};
/// use generic_ga::random::create_rng;
///
/// let mut rng = create_rng(27);
/// let population: Vec<BitString> = (0..20).map(|_| BitString::random(16, &mut rng)).collect();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_mutation_rate(0.05)
///     .with_fitness_threshold(1.0);
///
/// let mut history = FitnessHistory::new();
/// let mut ga = GeneticAlgorithm::new(config, population, rng)
///     .unwrap()
///     .with_observer(&mut history);
/// let best = ga.run(200).fitness();
/// let generations = ga.generation();
/// drop(ga);
///
/// assert!(best > 0.5);
/// assert_eq!(history.summaries().len(), generations);
/// ```
pub struct GeneticAlgorithm<'a, G: Genome, R: Rng = StdRng> {
    config: GaConfig,
    population: Vec<G>,
    generation: usize,
    rng: R,
    observers: Vec<Box<dyn PopulationObserver<G> + 'a>>,
}

impl<'a, G: Genome + MaybeSend, R: Rng> GeneticAlgorithm<'a, G, R> {
    /// Builds an engine around an initial population.
    ///
    /// The initial population may differ in size from
    /// `config.population_size`; every later generation has exactly that
    /// size.
    pub fn new(config: GaConfig, population: Vec<G>, rng: R) -> Result<Self, GaError> {
        config.validate()?;

        let minimum = config.selection.min_population().max(config.elite_count);
        if population.len() < minimum {
            return Err(GaError::InitialPopulationTooSmall {
                actual: population.len(),
                minimum,
            });
        }

        log::debug!(
            "created GA: population {}, elites {}, mutation rate {}, {} selection",
            config.population_size,
            config.elite_count,
            config.mutation_rate,
            config.selection
        );

        Ok(Self {
            config,
            population,
            generation: 0,
            rng,
            observers: Vec::new(),
        })
    }

    /// Registers an observer, builder style.
    pub fn with_observer<O: PopulationObserver<G> + 'a>(mut self, observer: O) -> Self {
        self.add_observer(observer);
        self
    }

    /// Registers an observer notified after every generation.
    pub fn add_observer<O: PopulationObserver<G> + 'a>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Registers a closure observer, builder style.
    ///
    /// ```
    /// use generic_ga::bitstring::BitString;
    /// use generic_ga::ga::{GaConfig, GeneticAlgorithm};
    /// use generic_ga::random::create_rng;
    ///
    /// let mut rng = create_rng(3);
    /// let population: Vec<BitString> = (0..8).map(|_| BitString::random(8, &mut rng)).collect();
    /// let mut seen = Vec::new();
    /// let mut ga = GeneticAlgorithm::new(GaConfig::default().with_population_size(8), population, rng)
    ///     .unwrap()
    ///     .with_observer_fn(|pop, generation| seen.push((pop.len(), generation)));
    /// ga.run(2);
    /// drop(ga);
    /// assert_eq!(seen, vec![(8, 1), (8, 2)]);
    /// ```
    pub fn with_observer_fn<F>(self, f: F) -> Self
    where
        F: FnMut(&[G], usize) + 'a,
    {
        self.with_observer(FnObserver(f))
    }

    /// Registers a closure notified after every generation.
    pub fn add_observer_fn<F>(&mut self, f: F)
    where
        F: FnMut(&[G], usize) + 'a,
    {
        self.add_observer(FnObserver(f));
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current population, in no meaningful order.
    pub fn population(&self) -> &[G] {
        &self.population
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The fittest genome of the current population.
    pub fn fittest(&self) -> &G {
        &self.population[fittest_index(&self.population)]
    }

    /// Consumes the engine and returns its population.
    pub fn into_population(self) -> Vec<G> {
        self.population
    }

    /// Whether the fittest genome has reached the fitness threshold.
    ///
    /// A NaN best fitness counts as reached, so a run with a broken fitness
    /// function stops instead of spinning through its whole budget.
    pub fn threshold_reached(&self) -> bool {
        self.config.fitness_threshold.is_some_and(|threshold| {
            compare_fitness(self.fittest().fitness(), threshold) != Ordering::Less
        })
    }

    /// Advances the population by one generation.
    ///
    /// The `elite_count` fittest genomes move into the next population
    /// untouched; the rest is filled with the fittest mutated offspring.
    pub fn advance(&mut self) {
        let elite_count = self.config.elite_count;
        let survivors = self.config.surviving_children();

        partial_select(&mut self.population, elite_count, &mut self.rng);

        let mut children =
            self.config
                .selection
                .select(&self.population, self.config.population_size, &mut self.rng);
        self.mutate_all(&mut children);
        partial_select(&mut children, survivors, &mut self.rng);
        children.truncate(survivors);

        let mut next = std::mem::take(&mut self.population);
        next.truncate(elite_count);
        next.append(&mut children);

        self.population = next;
        self.generation += 1;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "generation {}: best fitness {}",
                self.generation,
                self.fittest().fitness()
            );
        }

        for observer in &mut self.observers {
            observer.observe(&self.population, self.generation);
        }
    }

    /// Advances up to `generations` times, stopping early once the fitness
    /// threshold is reached. Returns the fittest genome.
    pub fn run(&mut self, generations: usize) -> &G {
        let start = self.generation;
        for _ in 0..generations {
            if self.threshold_reached() {
                log::info!(
                    "fitness threshold reached at generation {}",
                    self.generation
                );
                break;
            }
            self.advance();
        }

        log::info!(
            "ran {} generations (total {}), best fitness {}",
            self.generation - start,
            self.generation,
            self.fittest().fitness()
        );
        self.fittest()
    }

    #[cfg(feature = "parallel")]
    fn mutate_all(&mut self, children: &mut [G]) {
        use crate::random::create_rng;
        use rayon::prelude::*;

        let rate = self.config.mutation_rate;
        if self.config.parallel {
            let seeds: Vec<u64> = children.iter().map(|_| self.rng.random()).collect();
            children
                .par_iter_mut()
                .zip(seeds.into_par_iter())
                .for_each(|(child, seed)| child.mutate(rate, &mut create_rng(seed)));
        } else {
            for child in children.iter_mut() {
                child.mutate(rate, &mut self.rng);
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn mutate_all(&mut self, children: &mut [G]) {
        let rate = self.config.mutation_rate;
        for child in children.iter_mut() {
            child.mutate(rate, &mut self.rng);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstring::BitString;
    use crate::ga::{FitnessHistory, Selection};
    use crate::random::create_rng;

    /// Genome that tracks its identity and how often it was mutated.
    #[derive(Debug, Clone, PartialEq)]
    struct Tracked {
        id: u64,
        fitness: f64,
        mutations: u32,
    }

    impl Genome for Tracked {
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn size(&self) -> usize {
            1
        }
        fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> [Self; 2] {
            let child = |fitness: f64, id: u64| Tracked {
                id,
                fitness,
                mutations: 0,
            };
            let w: f64 = rng.random();
            [
                child(w * self.fitness + (1.0 - w) * other.fitness, rng.random()),
                child((1.0 - w) * self.fitness + w * other.fitness, rng.random()),
            ]
        }
        fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
            self.mutations += 1;
            if rng.random_bool(rate) {
                self.fitness += rng.random_range(-0.05..0.05);
            }
        }
    }

    fn tracked_population(n: usize) -> Vec<Tracked> {
        (0..n)
            .map(|i| Tracked {
                id: i as u64,
                fitness: i as f64 / n as f64,
                mutations: 0,
            })
            .collect()
    }

    fn bit_population(n: usize, len: usize, rng: &mut StdRng) -> Vec<BitString> {
        (0..n).map(|_| BitString::random(len, rng)).collect()
    }

    fn sorted_fitness<G: Genome>(population: &[G]) -> Vec<f64> {
        let mut values: Vec<f64> = population.iter().map(|g| g.fitness()).collect();
        values.sort_by(|a, b| b.partial_cmp(a).unwrap());
        values
    }

    #[test]
    fn test_population_size_is_constant() {
        for selection in [Selection::Roulette, Selection::Ranked, Selection::Truncation] {
            let config = GaConfig::default()
                .with_population_size(11)
                .with_elite_count(2)
                .with_selection(selection);
            // initial population larger than the configured size
            let mut ga = GeneticAlgorithm::new(config, tracked_population(15), create_rng(1)).unwrap();
            for _ in 0..10 {
                ga.advance();
                assert_eq!(ga.population().len(), 11, "{selection}");
            }
            assert_eq!(ga.generation(), 10);
        }
    }

    #[test]
    fn test_elites_carried_over_unmutated() {
        let config = GaConfig::default()
            .with_population_size(12)
            .with_elite_count(3)
            .with_mutation_rate(1.0);
        let mut ga = GeneticAlgorithm::new(config, tracked_population(12), create_rng(42)).unwrap();

        for _ in 0..20 {
            let mut before = ga.population().to_vec();
            before.sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap());
            let elites = &before[..3];

            ga.advance();

            for elite in elites {
                let carried = ga
                    .population()
                    .iter()
                    .find(|g| g.id == elite.id)
                    .expect("elite missing from next generation");
                assert_eq!(carried, elite);
            }
            let elite_ids: Vec<u64> = elites.iter().map(|e| e.id).collect();
            let fresh: Vec<&Tracked> = ga
                .population()
                .iter()
                .filter(|g| !elite_ids.contains(&g.id))
                .collect();
            assert_eq!(fresh.len(), 9);
            assert!(fresh.iter().all(|g| g.mutations == 1));
        }
    }

    #[test]
    fn test_best_fitness_never_decreases_with_elitism() {
        let mut rng = create_rng(5);
        let population = bit_population(30, 24, &mut rng);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_elite_count(1)
            .with_mutation_rate(0.2);

        let mut history = FitnessHistory::new();
        let mut ga = GeneticAlgorithm::new(config, population, rng)
            .unwrap()
            .with_observer(&mut history);
        ga.run(40);
        drop(ga);

        for window in history.max_fitness().windows(2) {
            assert!(window[1] >= window[0], "{} < {}", window[1], window[0]);
        }
    }

    #[test]
    fn test_zero_elites() {
        let config = GaConfig::default()
            .with_population_size(8)
            .with_elite_count(0)
            .with_selection(Selection::Roulette);
        let mut ga = GeneticAlgorithm::new(config, tracked_population(8), create_rng(2)).unwrap();
        ga.advance();
        assert_eq!(ga.population().len(), 8);
        assert!(ga.population().iter().all(|g| g.mutations == 1));
    }

    #[test]
    fn test_run_zero_is_noop() {
        let config = GaConfig::default().with_population_size(6);
        let population = tracked_population(6);
        let mut ga = GeneticAlgorithm::new(config, population.clone(), create_rng(9)).unwrap();

        let best = ga.run(0).clone();

        assert_eq!(ga.generation(), 0);
        assert_eq!(ga.population(), &population[..]);
        assert_eq!(best.id, 5);
    }

    #[test]
    fn test_threshold_already_met_stops_immediately() {
        let config = GaConfig::default()
            .with_population_size(6)
            .with_fitness_threshold(0.0);
        let mut ga = GeneticAlgorithm::new(config, tracked_population(6), create_rng(9)).unwrap();

        assert!(ga.threshold_reached());
        ga.run(50);
        assert_eq!(ga.generation(), 0);
    }

    #[test]
    fn test_threshold_stops_early() {
        let mut rng = create_rng(27);
        let population = bit_population(40, 12, &mut rng);
        let config = GaConfig::default()
            .with_population_size(40)
            .with_elite_count(2)
            .with_mutation_rate(0.05)
            .with_fitness_threshold(1.0);
        let mut ga = GeneticAlgorithm::new(config, population, rng).unwrap();

        let best = ga.run(10_000).fitness();

        assert_eq!(best, 1.0);
        assert!(ga.generation() < 10_000);
        assert!(ga.threshold_reached());
    }

    #[test]
    fn test_no_threshold_runs_full_budget() {
        let config = GaConfig::default().with_population_size(6);
        let mut ga = GeneticAlgorithm::new(config, tracked_population(6), create_rng(3)).unwrap();
        assert!(!ga.threshold_reached());
        ga.run(25);
        assert_eq!(ga.generation(), 25);
    }

    #[test]
    fn test_nan_fitness_stops_at_threshold_check() {
        let population: Vec<Tracked> = (0..6)
            .map(|i| Tracked {
                id: i,
                fitness: f64::NAN,
                mutations: 0,
            })
            .collect();
        let config = GaConfig::default()
            .with_population_size(6)
            .with_fitness_threshold(1.0);
        let mut ga = GeneticAlgorithm::new(config, population, create_rng(3)).unwrap();

        assert!(ga.threshold_reached());
        ga.run(10);
        assert_eq!(ga.generation(), 0);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let run = |seed: u64| {
            let mut rng = create_rng(seed);
            let population = bit_population(20, 32, &mut rng);
            let config = GaConfig::default()
                .with_population_size(20)
                .with_elite_count(2)
                .with_selection(Selection::Ranked)
                .with_mutation_rate(0.05);
            let mut ga = GeneticAlgorithm::new(config, population, rng).unwrap();
            ga.run(15);
            ga.into_population()
        };

        assert_eq!(run(11), run(11));
        assert_ne!(run(11), run(12));
    }

    #[test]
    fn test_observers_see_every_generation() {
        let mut history = FitnessHistory::new();
        let mut second = FitnessHistory::new();
        let config = GaConfig::default().with_population_size(8);
        let mut ga = GeneticAlgorithm::new(config, tracked_population(8), create_rng(4))
            .unwrap()
            .with_observer(&mut history);
        ga.add_observer(&mut second);
        ga.run(5);
        drop(ga);

        let generations: Vec<usize> = history.summaries().iter().map(|s| s.generation).collect();
        assert_eq!(generations, vec![1, 2, 3, 4, 5]);
        assert_eq!(second.summaries(), history.summaries());
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        let config = GaConfig::default().with_population_size(8);
        let mut ga = GeneticAlgorithm::new(config, tracked_population(10), create_rng(4))
            .unwrap()
            .with_observer_fn(|population, generation| seen.push((population.len(), generation)));
        let mut calls = 0;
        ga.add_observer_fn(|_, _| calls += 1);
        ga.run(3);
        drop(ga);

        assert_eq!(seen, vec![(8, 1), (8, 2), (8, 3)]);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_onemax_convergence() {
        let mut rng = create_rng(42);
        let population = bit_population(50, 20, &mut rng);
        let initial_best = sorted_fitness(&population)[0];
        let config = GaConfig::default()
            .with_population_size(50)
            .with_elite_count(2)
            .with_mutation_rate(0.02);
        let mut ga = GeneticAlgorithm::new(config, population, rng).unwrap();

        let best = ga.run(100).fitness();

        assert!(best >= initial_best);
        assert!(best >= 0.9, "expected near-optimal OneMax, got {best}");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_elite_count(4);
        let err = GeneticAlgorithm::new(config, tracked_population(4), create_rng(1))
            .err()
            .unwrap();
        assert!(matches!(err, GaError::EliteCountTooLarge { .. }));
    }

    #[test]
    fn test_rejects_small_initial_population() {
        let config = GaConfig::default().with_population_size(10);
        let err = GeneticAlgorithm::new(config, tracked_population(3), create_rng(1))
            .err()
            .unwrap();
        assert_eq!(
            err,
            GaError::InitialPopulationTooSmall {
                actual: 3,
                minimum: 4
            }
        );

        let err = GeneticAlgorithm::<Tracked>::new(GaConfig::default(), Vec::new(), create_rng(1))
            .err()
            .unwrap();
        assert!(matches!(err, GaError::InitialPopulationTooSmall { actual: 0, .. }));
    }

    #[test]
    fn test_fittest_does_not_reorder() {
        let config = GaConfig::default().with_population_size(5);
        let population = tracked_population(5);
        let ga = GeneticAlgorithm::new(config, population.clone(), create_rng(1)).unwrap();
        assert_eq!(ga.fittest().id, 4);
        assert_eq!(ga.population(), &population[..]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_mutation_is_deterministic() {
        let run = || {
            let mut rng = create_rng(8);
            let population = bit_population(30, 32, &mut rng);
            let config = GaConfig::default()
                .with_population_size(30)
                .with_parallel(true);
            let mut ga = GeneticAlgorithm::new(config, population, rng).unwrap();
            ga.run(10);
            ga.into_population()
        };
        assert_eq!(run(), run());
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_non_send_genome() {
        use std::rc::Rc;

        #[derive(Debug)]
        struct Shared(Rc<f64>);

        impl Genome for Shared {
            fn fitness(&self) -> f64 {
                *self.0
            }
            fn size(&self) -> usize {
                1
            }
            fn crossover<R: Rng>(&self, other: &Self, _rng: &mut R) -> [Self; 2] {
                [Shared(Rc::clone(&self.0)), Shared(Rc::clone(&other.0))]
            }
            fn mutate<R: Rng>(&mut self, _rate: f64, _rng: &mut R) {}
        }

        let population: Vec<Shared> = (0..6).map(|i| Shared(Rc::new(i as f64))).collect();
        let config = GaConfig::default().with_population_size(6);
        let mut ga = GeneticAlgorithm::new(config, population, create_rng(6)).unwrap();
        ga.advance();

        assert_eq!(ga.generation(), 1);
        assert_eq!(ga.population().len(), 6);
        assert_eq!(ga.fittest().fitness(), 5.0);
    }
}
