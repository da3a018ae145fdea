//! Generic GA CLI - evolve OneMax bit strings from `.properties` files.

use std::error::Error;
use std::path::{Path, PathBuf};

use generic_ga::{
    bitstring::BitString,
    ga::{CsvFitnessLogger, GaConfig, GeneticAlgorithm, Genome},
    properties::{ConfigSource, Properties},
    random::create_rng,
};

/// Run parameters read from the second properties file.
struct RunSettings {
    genome_length: usize,
    population_size: usize,
    generations: usize,
    seed: u64,
    logs_path: Option<PathBuf>,
}

impl RunSettings {
    fn from_source<S: ConfigSource>(source: &S) -> Self {
        fn value_or<S: ConfigSource, T: std::str::FromStr + std::fmt::Display>(
            source: &S,
            key: &str,
            default: T,
        ) -> T {
            source.parsed(key).unwrap_or_else(|| {
                log::warn!("{key} was not set, default of {default} will be used");
                default
            })
        }

        Self {
            genome_length: value_or(source, "genome.length", 64),
            population_size: value_or(source, "population.size", 100),
            generations: value_or(source, "generations", 100),
            seed: value_or(source, "seed", 0),
            logs_path: source
                .get("logs.path")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Name to show in usage text; `argv[0]` may be absent.
fn program_name(args: &[String]) -> &str {
    args.first().map_or("generic-ga", String::as_str)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        let program = program_name(&args);
        eprintln!("Usage: {program} <ga.properties> <run.properties>");
        eprintln!();
        eprintln!("Evolve random bit strings towards all ones.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  ga.properties   population.size, elite.count, mutation.rate,");
        eprintln!("                  fitness.threshold, selection.method");
        eprintln!("  run.properties  genome.length, population.size, generations,");
        eprintln!("                  seed, logs.path (optional)");
        std::process::exit(1);
    }

    if let Err(e) = run(Path::new(&args[1]), Path::new(&args[2])) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(ga_config_path: &Path, run_config_path: &Path) -> Result<(), Box<dyn Error>> {
    let config = GaConfig::from_source(&Properties::load(ga_config_path)?);
    let settings = RunSettings::from_source(&Properties::load(run_config_path)?);

    let mut rng = create_rng(settings.seed);
    let population: Vec<BitString> = (0..settings.population_size)
        .map(|_| BitString::random(settings.genome_length, &mut rng))
        .collect();

    let mut csv_logger = match &settings.logs_path {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file = dir.join(format!("Seed{}_PopulationFitness.csv", settings.seed));
            Some(CsvFitnessLogger::create(file)?)
        }
        None => None,
    };

    let mut ga = GeneticAlgorithm::new(config, population, rng)?;
    if let Some(logger) = csv_logger.as_mut() {
        ga.add_observer(logger);
    }

    ga.run(settings.generations);
    let fittest = ga.fittest();
    println!("Generation: {}", ga.generation());
    println!("{}", fittest);
    println!("{}", fittest.fitness());
    drop(ga);

    if let Some(mut logger) = csv_logger {
        logger.flush()?;
    }

    Ok(())
}
