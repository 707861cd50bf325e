use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use percolate::{SimulationConfig, ThresholdEstimator};

/// Parse a strictly positive count
fn parse_positive(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|e| format!("Invalid number '{s}': {e}"))?;
    if value == 0 {
        return Err("Must enter a value greater than 0".to_string());
    }
    Ok(value)
}

/// percolate - Monte Carlo estimate of the site percolation threshold
///
/// Opens random sites on an n-by-n grid until the top row connects to the
/// bottom row, repeats for the requested number of trials and reports the
/// mean threshold with a 95% confidence interval.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Size of the n-by-n grid
    #[clap(value_name = "GRID_SIZE", value_parser = parse_positive)]
    grid_size: usize,

    /// Number of independent trials
    #[clap(value_name = "TRIALS", value_parser = parse_positive)]
    trials: usize,

    /// Seed for a reproducible run
    #[clap(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of threads for running trials
    #[clap(short = 't', long = "threads", default_value = "1", value_parser = parse_positive)]
    threads: usize,

    /// Log progress to stderr
    #[clap(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let mut config = SimulationConfig::new(args.grid_size, args.trials).with_threads(args.threads);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let stats = ThresholdEstimator::run(&config).with_context(|| {
        format!(
            "Failed to estimate threshold for n = {} and trials = {}",
            args.grid_size, args.trials
        )
    })?;

    println!("mean                    = {}", stats.mean());
    println!("stddev                  = {}", stats.stddev());
    println!(
        "95% confidence interval = [{}, {}]",
        stats.confidence_low(),
        stats.confidence_high()
    );

    Ok(())
}
