// Supporting statistics attached to each scored hypothesis
//
// Variance, standard deviation and sample size describe the targeted metric's
// full series across the whole record set, not just the two windows. For a
// segment hypothesis the series is restricted to that segment value.

use crate::hypothesis::Hypothesis;
use crate::metrics::{metric_series, DerivedRecord};
use crate::stats::SeriesStats;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evidence {
    pub recent_mean: Option<f64>,
    pub baseline_mean: Option<f64>,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    pub sample_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
}

impl Evidence {
    /// Collect evidence for `hypothesis` from the full record set
    pub fn collect(hypothesis: &Hypothesis, records: &[DerivedRecord]) -> Self {
        let comparison = hypothesis.comparison.as_ref();
        let recent_mean = comparison.map(|c| c.recent_mean);
        let baseline_mean = comparison.map(|c| c.baseline_mean);
        let p_value = comparison.and_then(|c| c.p_value);

        let Some(metric) = hypothesis.metric else {
            return Self {
                recent_mean,
                baseline_mean,
                variance: None,
                std_dev: None,
                sample_size: records.len(),
                p_value,
            };
        };

        let series = match &hypothesis.segment {
            Some(segment) => records
                .iter()
                .filter(|r| r.record.segment(segment.dimension) == segment.value)
                .filter_map(|r| r.metric(metric))
                .collect(),
            None => metric_series(records, metric),
        };

        let stats = SeriesStats::from_series(&series)
            .map_err(|e| tracing::debug!(%metric, "No series statistics: {}", e))
            .ok();

        Self {
            recent_mean,
            baseline_mean,
            variance: stats.map(|s| s.variance),
            std_dev: stats.map(|s| s.std_dev),
            sample_size: series.len(),
            p_value,
        }
    }
}
