// Windowed-comparison hypothesis generation
//
// Compares the recent window against the immediately preceding baseline
// window, globally per metric and per segment value, and emits a candidate
// hypothesis wherever the percentage delta crosses its configured threshold.
//
// delta_pct = (recent_mean - baseline_mean) / baseline_mean * 100
//
// Undefined metric values are excluded from means. Zero or undefined
// baselines are skipped rather than divided by.

mod config;
mod generator;
mod segment;
mod types;

pub use config::{
    default_metric_thresholds, default_segment_thresholds, Direction, MetricThreshold,
    SegmentThreshold,
};
pub use generator::{compare, HypothesisGenerator};
pub use segment::{group_means, SegmentMean};
pub use types::{Comparison, Hypothesis, HypothesisKind, Impact, SegmentRef, NO_METRIC};
