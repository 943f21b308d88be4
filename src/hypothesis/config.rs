// Threshold configuration for hypothesis generation
//
// Thresholds are expressed in percentage points of change from the baseline
// window mean. Segment thresholds are kept separate from global ones since
// per-segment means are computed over fewer rows and are noisier.

use crate::metrics::Metric;
use crate::record::SegmentDimension;
use serde::{Deserialize, Serialize};

/// Direction of change that should be flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Flag when the metric falls by more than the threshold
    Decline,
    /// Flag when the metric rises by more than the threshold
    Rise,
}

impl Direction {
    /// Whether `delta_pct` crosses `threshold_pct` in this direction
    ///
    /// The comparison is strict: a delta exactly at the threshold is not flagged.
    pub fn crosses(&self, delta_pct: f64, threshold_pct: f64) -> bool {
        match self {
            Direction::Decline => delta_pct < -threshold_pct,
            Direction::Rise => delta_pct > threshold_pct,
        }
    }

    /// Adverse direction for a metric (decline for CTR/ROAS, rise for costs)
    pub fn adverse_for(metric: Metric) -> Self {
        if metric.higher_is_better() {
            Direction::Decline
        } else {
            Direction::Rise
        }
    }
}

/// Whole-dataset threshold for one metric
///
/// # Example TOML
/// ```toml
/// [[metric]]
/// metric = "ctr"
/// direction = "decline"
/// threshold_pct = 10.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricThreshold {
    pub metric: Metric,
    pub direction: Direction,
    pub threshold_pct: f64,
}

impl MetricThreshold {
    pub fn new(metric: Metric, direction: Direction, threshold_pct: f64) -> Self {
        Self {
            metric,
            direction,
            threshold_pct,
        }
    }

    pub fn is_flagged(&self, delta_pct: f64) -> bool {
        self.direction.crosses(delta_pct, self.threshold_pct)
    }
}

/// Per-segment threshold for one dimension and metric
///
/// # Example TOML
/// ```toml
/// [[segment]]
/// dimension = "country"
/// metric = "roas"
/// direction = "decline"
/// threshold_pct = 20.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentThreshold {
    pub dimension: SegmentDimension,
    #[serde(default = "default_segment_metric")]
    pub metric: Metric,
    #[serde(default = "default_segment_direction")]
    pub direction: Direction,
    pub threshold_pct: f64,
}

fn default_segment_metric() -> Metric {
    Metric::Roas
}

fn default_segment_direction() -> Direction {
    Direction::Decline
}

impl SegmentThreshold {
    pub fn new(
        dimension: SegmentDimension,
        metric: Metric,
        direction: Direction,
        threshold_pct: f64,
    ) -> Self {
        Self {
            dimension,
            metric,
            direction,
            threshold_pct,
        }
    }

    pub fn is_flagged(&self, delta_pct: f64) -> bool {
        self.direction.crosses(delta_pct, self.threshold_pct)
    }
}

/// Default global thresholds: CTR/ROAS decline and CPC/CPM rise beyond 10%
pub fn default_metric_thresholds() -> Vec<MetricThreshold> {
    vec![
        MetricThreshold::new(Metric::Ctr, Direction::Decline, 10.0),
        MetricThreshold::new(Metric::Roas, Direction::Decline, 10.0),
        MetricThreshold::new(Metric::Cpc, Direction::Rise, 10.0),
        MetricThreshold::new(Metric::Cpm, Direction::Rise, 10.0),
    ]
}

/// Default segment thresholds: ROAS decline beyond 20% per country/platform/audience
pub fn default_segment_thresholds() -> Vec<SegmentThreshold> {
    [
        SegmentDimension::Country,
        SegmentDimension::Platform,
        SegmentDimension::AudienceType,
    ]
    .into_iter()
    .map(|dimension| SegmentThreshold::new(dimension, Metric::Roas, Direction::Decline, 20.0))
    .collect()
}
