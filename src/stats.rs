//! Series statistics backed by trueno and aprender
//!
//! Wraps trueno's SIMD vector primitives (variance, stddev) and aprender's
//! DescriptiveStats and Welch t-test behind f64 interfaces. Series are
//! centred in f64 before the f32 conversion. trueno computes population
//! variance (divide by n).

use anyhow::{Context, Result};
use aprender::stats::DescriptiveStats;
use trueno::Vector;

/// Population statistics of a metric series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub sample_size: usize,
}

impl SeriesStats {
    /// Compute statistics for a non-empty series
    ///
    /// The mean is accumulated in f64. trueno sees the centred series, so the
    /// f32 variance keeps its precision when the spread is small next to the
    /// mean (e.g. CPM values near 100).
    pub fn from_series(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            anyhow::bail!("Cannot compute statistics of an empty series");
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let centred = to_vector_shifted(values, mean);
        let variance = centred.variance().context("Failed to compute variance")?;
        let std_dev = centred.stddev().context("Failed to compute standard deviation")?;

        Ok(Self {
            mean,
            variance: f64::from(variance),
            std_dev: f64::from(std_dev),
            sample_size: values.len(),
        })
    }
}

/// Median using aprender's DescriptiveStats (R-7 quantile)
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        anyhow::bail!("Cannot compute median of an empty series");
    }
    let vector = to_vector_shifted(values, 0.0);
    let stats = DescriptiveStats::new(&vector);
    stats
        .quantile(0.5)
        .map(f64::from)
        .map_err(|e| anyhow::anyhow!("Failed to compute median: {}", e))
}

/// Two-tailed p-value of Welch's t-test between two series
///
/// Needs at least 2 samples per series and some variance in at least one of
/// them; returns an error otherwise.
pub fn welch_pvalue(baseline: &[f64], recent: &[f64]) -> Result<f64> {
    if baseline.len() < 2 || recent.len() < 2 {
        anyhow::bail!("Need at least 2 samples per distribution for t-test");
    }

    let baseline_stats = SeriesStats::from_series(baseline)?;
    let recent_stats = SeriesStats::from_series(recent)?;
    if baseline_stats.variance == 0.0 && recent_stats.variance == 0.0 {
        anyhow::bail!("Both distributions are constant");
    }

    // t is shift-invariant; centre both series on the baseline mean
    let shift = baseline_stats.mean;
    let baseline: Vec<f32> = baseline.iter().map(|v| (*v - shift) as f32).collect();
    let recent: Vec<f32> = recent.iter().map(|v| (*v - shift) as f32).collect();

    // Welch's variant: unequal variances
    let result = aprender::stats::hypothesis::ttest_ind(&baseline, &recent, false)
        .context("Failed to compute t-test")?;

    if !result.pvalue.is_finite() {
        anyhow::bail!("t-test produced a non-finite p-value");
    }
    Ok(f64::from(result.pvalue))
}

fn to_vector_shifted(values: &[f64], shift: f64) -> Vector<f32> {
    let samples: Vec<f32> = values.iter().map(|v| (*v - shift) as f32).collect();
    Vector::from_slice(&samples)
}
