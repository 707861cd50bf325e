//! Summary statistics over per-trial percolation thresholds
//!
//! Variance uses Welford's running update to avoid the cancellation of the
//! `E[X²] − E[X]²` form.

/// z-score of the two-sided 95% normal confidence interval
pub const CONFIDENCE_95: f64 = 1.96;

/// Arithmetic mean, `NaN` for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample standard deviation with Bessel's correction (divides by `len - 1`).
///
/// Undefined for fewer than two observations; returns `NaN` in that case.
pub fn sample_stddev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }
    let mut running_mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in data.iter().enumerate() {
        let delta = x - running_mean;
        running_mean += delta / (i + 1) as f64;
        m2 += delta * (x - running_mean);
    }
    (m2 / (data.len() - 1) as f64).sqrt()
}

/// Half-width of the 95% confidence interval of a sample mean over `samples`
/// independent observations
pub fn confidence_half_width(stddev: f64, samples: usize) -> f64 {
    CONFIDENCE_95 * stddev / (samples as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < 1e-15);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_sample_stddev() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((sample_stddev(&v) - expected).abs() < 1e-12);
        assert_eq!(sample_stddev(&[0.5, 0.5, 0.5]), 0.0);
    }

    #[test]
    fn test_single_observation_stddev_is_nan() {
        assert!(sample_stddev(&[0.6]).is_nan());
        assert!(sample_stddev(&[]).is_nan());
    }

    #[test]
    fn test_half_width_scales_with_sample_count() {
        let hw = confidence_half_width(0.1, 100);
        assert!((hw - 0.0196).abs() < 1e-12);
        assert!(confidence_half_width(0.1, 400) < hw);
    }
}
