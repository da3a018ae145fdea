//! Per-generation population observers.
//!
//! After every completed generation the engine hands the new population and
//! its generation number to each registered [`PopulationObserver`].
//! Observers only get shared access, so they cannot alter the population.

use super::types::Genome;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Receives a snapshot of each completed generation.
///
/// Implemented for `&mut O` so a caller can lend an observer to the engine
/// and read it back once the engine is dropped. Wrap closures in
/// [`FnObserver`].
pub trait PopulationObserver<G> {
    /// Called once per generation, after the population was replaced.
    fn observe(&mut self, population: &[G], generation: usize);
}

impl<G, O> PopulationObserver<G> for &mut O
where
    O: PopulationObserver<G> + ?Sized,
{
    fn observe(&mut self, population: &[G], generation: usize) {
        (**self).observe(population, generation)
    }
}

impl<G, O> PopulationObserver<G> for Box<O>
where
    O: PopulationObserver<G> + ?Sized,
{
    fn observe(&mut self, population: &[G], generation: usize) {
        (**self).observe(population, generation)
    }
}

/// Adapts a `FnMut(&[G], usize)` closure into an observer.
pub struct FnObserver<F>(pub F);

impl<G, F> PopulationObserver<G> for FnObserver<F>
where
    F: FnMut(&[G], usize),
{
    fn observe(&mut self, population: &[G], generation: usize) {
        (self.0)(population, generation)
    }
}

/// Aggregate fitness statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessSummary {
    pub generation: usize,
    pub max: f64,
    pub mean: f64,
    pub min: f64,
}

impl FitnessSummary {
    /// Computes the summary of `population`.
    ///
    /// An empty population yields NaN statistics.
    pub fn of<G: Genome>(population: &[G], generation: usize) -> Self {
        if population.is_empty() {
            return Self {
                generation,
                max: f64::NAN,
                mean: f64::NAN,
                min: f64::NAN,
            };
        }

        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        let mut total = 0.0;
        for genome in population {
            let f = genome.fitness();
            max = max.max(f);
            min = min.min(f);
            total += f;
        }

        Self {
            generation,
            max,
            mean: total / population.len() as f64,
            min,
        }
    }
}

/// Collects a [`FitnessSummary`] for every generation it observes.
#[derive(Debug, Clone, Default)]
pub struct FitnessHistory {
    summaries: Vec<FitnessSummary>,
}

impl FitnessHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summaries in observation order.
    pub fn summaries(&self) -> &[FitnessSummary] {
        &self.summaries
    }

    /// Best fitness of each observed generation.
    pub fn max_fitness(&self) -> Vec<f64> {
        self.summaries.iter().map(|s| s.max).collect()
    }
}

impl<G: Genome> PopulationObserver<G> for FitnessHistory {
    fn observe(&mut self, population: &[G], generation: usize) {
        self.summaries.push(FitnessSummary::of(population, generation));
    }
}

/// Column names written by [`CsvFitnessLogger`].
pub const FITNESS_CSV_HEADERS: [&str; 4] = ["Generation", "Max Fitness", "Avg Fitness", "Min Fitness"];

/// Writes one CSV row of fitness statistics per generation.
///
/// Write errors cannot be returned from
/// [`observe`](PopulationObserver::observe); they are logged and the first
/// one is reported by [`flush`](Self::flush) or
/// [`into_inner`](Self::into_inner).
pub struct CsvFitnessLogger<W: Write> {
    writer: csv::Writer<W>,
    error: Option<csv::Error>,
}

impl CsvFitnessLogger<File> {
    /// Creates (or truncates) `path` and writes the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, csv::Error> {
        let path = path.as_ref();
        log::debug!("logging population fitness to {}", path.display());
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvFitnessLogger<W> {
    /// Wraps `writer` and writes the header row.
    pub fn from_writer(writer: W) -> Result<Self, csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(FITNESS_CSV_HEADERS)?;
        Ok(Self {
            writer,
            error: None,
        })
    }

    /// Flushes buffered rows, reporting any earlier write failure.
    pub fn flush(&mut self) -> Result<(), csv::Error> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W, csv::Error> {
        self.flush()?;
        self.writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))
    }

    fn write_summary(&mut self, summary: &FitnessSummary) -> Result<(), csv::Error> {
        self.writer.write_record([
            summary.generation.to_string(),
            summary.max.to_string(),
            summary.mean.to_string(),
            summary.min.to_string(),
        ])
    }
}

impl<G: Genome, W: Write> PopulationObserver<G> for CsvFitnessLogger<W> {
    fn observe(&mut self, population: &[G], generation: usize) {
        let summary = FitnessSummary::of(population, generation);
        if let Err(err) = self.write_summary(&summary) {
            log::error!("failed to log generation {generation}: {err}");
            self.error.get_or_insert(err);
        }
    }
}
