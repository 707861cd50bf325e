/// Monte Carlo estimation of the percolation threshold
///
/// Each trial opens uniformly random sites on a fresh n×n grid until it
/// percolates and records the fraction of open sites at that moment. The
/// estimator aggregates those fractions into a mean, a sample standard
/// deviation and a 95% confidence interval for the mean.
use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

use crate::error::{PercolationError, Result};
use crate::grid::PercolationGrid;
use crate::random::{entropy_rng, trial_rng, UniformSource};
use crate::stats;

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub grid_size: usize,
    pub trials: usize,
    /// Fixed seed for reproducible runs; drawn from OS entropy when `None`
    pub seed: Option<u64>,
    /// Worker threads; 1 runs every trial on the calling thread
    pub threads: usize,
}

impl SimulationConfig {
    pub fn new(grid_size: usize, trials: usize) -> Self {
        SimulationConfig {
            grid_size,
            trials,
            seed: None,
            threads: 1,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.grid_size, self.trials)?;
        if self.threads == 0 {
            return Err(PercolationError::invalid_argument(
                "Thread count must be greater than 0. You entered threads = 0.",
            ));
        }
        Ok(())
    }
}

fn validate_dimensions(n: usize, trials: usize) -> Result<()> {
    if n == 0 || trials == 0 {
        return Err(PercolationError::invalid_argument(format!(
            "Must enter a value greater than 0. You entered n = {n} and trials = {trials}."
        )));
    }
    Ok(())
}

/// Run one trial on a fresh n×n grid and return the open fraction at the
/// moment the grid first percolates
pub fn run_trial<R: UniformSource + ?Sized>(n: usize, rng: &mut R) -> Result<f64> {
    let mut grid = PercolationGrid::new(n)?;
    while !grid.percolates() {
        let row = rng.uniform(1, n + 1);
        let col = rng.uniform(1, n + 1);
        grid.open(row, col)?;
    }
    Ok(grid.number_of_open_sites() as f64 / (n * n) as f64)
}

#[derive(Debug, Clone)]
pub struct ThresholdEstimator {
    grid_size: usize,
    results: Vec<f64>,
    mean: f64,
    stddev: f64,
}

impl ThresholdEstimator {
    /// Run `trials` independent trials on n×n grids, drawing every site from
    /// the single stream `rng`
    pub fn new<R: UniformSource + ?Sized>(n: usize, trials: usize, rng: &mut R) -> Result<Self> {
        validate_dimensions(n, trials)?;
        let mut results = Vec::with_capacity(trials);
        for trial in 0..trials {
            let fraction = run_trial(n, rng)?;
            debug!("trial {trial}: threshold {fraction:.6}");
            results.push(fraction);
        }
        Self::from_results(n, results)
    }

    /// Run a configured simulation.
    ///
    /// Every trial gets its own generator derived from the run seed and the
    /// trial index, so a seeded run yields the same results for any thread count.
    pub fn run(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| entropy_rng().gen());
        let n = config.grid_size;
        info!(
            "running {} trials on a {n}x{n} grid (seed {seed}, {} threads)",
            config.trials, config.threads
        );

        let trial = |index: usize| -> Result<f64> {
            let fraction = run_trial(n, &mut trial_rng(seed, index))?;
            debug!("trial {index}: threshold {fraction:.6}");
            Ok(fraction)
        };

        let results = if config.threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()
                .map_err(|e| {
                    PercolationError::invalid_argument(format!("Failed to build thread pool: {e}"))
                })?;
            pool.install(|| {
                (0..config.trials)
                    .into_par_iter()
                    .map(trial)
                    .collect::<Result<Vec<f64>>>()
            })?
        } else {
            (0..config.trials).map(trial).collect::<Result<Vec<f64>>>()?
        };

        let estimator = Self::from_results(n, results)?;
        info!(
            "mean threshold {:.6}, stddev {:.6}",
            estimator.mean(),
            estimator.stddev()
        );
        Ok(estimator)
    }

    /// Aggregate thresholds that were computed elsewhere. Every value must lie
    /// in `(0, 1]`.
    pub fn from_results(n: usize, results: Vec<f64>) -> Result<Self> {
        validate_dimensions(n, results.len())?;
        if let Some(bad) = results.iter().find(|&&x| !(x > 0.0 && x <= 1.0)) {
            return Err(PercolationError::invalid_argument(format!(
                "Trial threshold {bad} is outside (0, 1]"
            )));
        }
        let mean = stats::mean(&results);
        let stddev = stats::sample_stddev(&results);
        Ok(ThresholdEstimator {
            grid_size: n,
            results,
            mean,
            stddev,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn trial_count(&self) -> usize {
        self.results.len()
    }

    /// Per-trial open fractions, in trial order
    pub fn trial_results(&self) -> &[f64] {
        &self.results
    }

    /// Sample mean of the percolation threshold
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of the percolation threshold.
    ///
    /// `NaN` for a single trial, and the confidence bounds follow suit.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Low endpoint of the 95% confidence interval
    pub fn confidence_low(&self) -> f64 {
        self.mean - stats::confidence_half_width(self.stddev, self.trial_count())
    }

    /// High endpoint of the 95% confidence interval
    pub fn confidence_high(&self) -> f64 {
        self.mean + stats::confidence_half_width(self.stddev, self.trial_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    /// Replays a fixed list of draws, wrapping around when exhausted
    struct Scripted {
        draws: Vec<usize>,
        next: usize,
    }

    impl UniformSource for Scripted {
        fn uniform(&mut self, low: usize, high_exclusive: usize) -> usize {
            let value = self.draws[self.next % self.draws.len()];
            self.next += 1;
            assert!(value >= low && value < high_exclusive);
            value
        }
    }

    #[test]
    fn test_rejects_non_positive_arguments() {
        let mut rng = seeded_rng(1);
        let err = ThresholdEstimator::new(0, 5, &mut rng).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Must enter a value greater than 0. You entered n = 0 and trials = 5."
        );
        assert!(ThresholdEstimator::new(5, 0, &mut rng).is_err());
        assert!(ThresholdEstimator::run(&SimulationConfig::new(3, 2).with_threads(0)).is_err());
    }

    #[test]
    fn test_scripted_trial() {
        // Opens (1,1), (2,2), then (1,2) on a 2×2 grid: 3 of 4 sites
        let mut source = Scripted {
            draws: vec![1, 1, 2, 2, 1, 2],
            next: 0,
        };
        let fraction = run_trial(2, &mut source).unwrap();
        assert_eq!(fraction, 0.75);
        assert_eq!(source.next, 6);
    }

    #[test]
    fn test_repeated_draws_are_harmless() {
        let mut source = Scripted {
            draws: vec![1, 1, 1, 1, 1, 1],
            next: 0,
        };
        assert_eq!(run_trial(1, &mut source).unwrap(), 1.0);
    }

    #[test]
    fn test_statistics_are_stable() {
        let mut rng = seeded_rng(2024);
        let est = ThresholdEstimator::new(20, 100, &mut rng).unwrap();
        assert_eq!(est.trial_count(), 100);
        assert_eq!(est.grid_size(), 20);
        assert!(est.trial_results().iter().all(|&x| x > 0.0 && x <= 1.0));
        assert!(est.mean() > 0.0 && est.mean() < 1.0);
        assert!(est.stddev() >= 0.0);
        assert!(est.confidence_low() <= est.mean());
        assert!(est.mean() <= est.confidence_high());
        assert_eq!(est.mean(), est.mean());
        assert_eq!(est.confidence_high(), est.confidence_high());
    }

    #[test]
    fn test_interval_normalized_by_trial_count() {
        let est = ThresholdEstimator::from_results(50, vec![0.5, 0.6, 0.7, 0.6]).unwrap();
        let half = 1.96 * est.stddev() / 2.0;
        assert!((est.confidence_low() - (est.mean() - half)).abs() < 1e-12);
        assert!((est.confidence_high() - (est.mean() + half)).abs() < 1e-12);
    }

    #[test]
    fn test_single_trial_stddev_is_nan() {
        let est = ThresholdEstimator::from_results(4, vec![0.5]).unwrap();
        assert_eq!(est.mean(), 0.5);
        assert!(est.stddev().is_nan());
        assert!(est.confidence_low().is_nan());
    }

    #[test]
    fn test_from_results_rejects_bad_fractions() {
        assert!(ThresholdEstimator::from_results(4, vec![]).is_err());
        assert!(ThresholdEstimator::from_results(4, vec![0.5, 0.0]).is_err());
        assert!(ThresholdEstimator::from_results(4, vec![1.5]).is_err());
        assert!(ThresholdEstimator::from_results(4, vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_seeded_run_independent_of_threads() {
        let config = SimulationConfig::new(10, 16).with_seed(99);
        let sequential = ThresholdEstimator::run(&config).unwrap();
        let parallel = ThresholdEstimator::run(&config.clone().with_threads(4)).unwrap();
        assert_eq!(sequential.trial_results(), parallel.trial_results());
        assert_eq!(sequential.mean(), parallel.mean());
    }
}
