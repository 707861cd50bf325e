// Library exports for percolate
pub mod disjoint_set;
pub mod error;
pub mod estimator;
pub mod grid;
pub mod random;
pub mod stats;

pub use disjoint_set::DisjointSet;
pub use error::{PercolationError, Result};
pub use estimator::{run_trial, SimulationConfig, ThresholdEstimator};
pub use grid::PercolationGrid;
pub use random::UniformSource;
