// Baseline vs. recent hypothesis generation
//
// Emission order: global metrics first, then per-segment comparisons, each
// in configuration order. Exactly one sentinel hypothesis is emitted when
// history is insufficient or when nothing crosses a threshold.

use crate::config::InsightConfig;
use crate::hypothesis::config::{Direction, MetricThreshold, SegmentThreshold};
use crate::hypothesis::segment::{find, group_means};
use crate::hypothesis::types::{Comparison, Hypothesis, HypothesisKind, Impact, SegmentRef};
use crate::metrics::{mean_defined, Metric};
use crate::stats::welch_pvalue;
use crate::window::{WindowPair, WindowSplit};

/// Compares recent and baseline windows against configured thresholds
#[derive(Debug, Clone)]
pub struct HypothesisGenerator {
    metric_thresholds: Vec<MetricThreshold>,
    segment_thresholds: Vec<SegmentThreshold>,
}

impl HypothesisGenerator {
    pub fn new(
        metric_thresholds: Vec<MetricThreshold>,
        segment_thresholds: Vec<SegmentThreshold>,
    ) -> Self {
        Self {
            metric_thresholds,
            segment_thresholds,
        }
    }

    pub fn from_config(config: &InsightConfig) -> Self {
        Self::new(
            config.metric_thresholds.clone(),
            config.segment_thresholds.clone(),
        )
    }

    /// Generate hypotheses for a window split
    ///
    /// Always returns at least one hypothesis.
    pub fn generate(&self, split: &WindowSplit<'_>) -> Vec<Hypothesis> {
        let pair = match split {
            WindowSplit::Pair(pair) => pair,
            WindowSplit::InsufficientHistory {
                available,
                required,
            } => return vec![Hypothesis::insufficient_data(*available, *required)],
        };

        let mut hypotheses = self.global_hypotheses(pair);
        hypotheses.extend(self.segment_hypotheses(pair));

        if hypotheses.is_empty() {
            tracing::info!("No comparison crossed its threshold");
            hypotheses.push(Hypothesis::no_significant_change());
        } else {
            tracing::info!(count = hypotheses.len(), "Generated hypotheses");
        }

        hypotheses
    }

    fn global_hypotheses(&self, pair: &WindowPair<'_>) -> Vec<Hypothesis> {
        let mut hypotheses = Vec::new();

        for threshold in &self.metric_thresholds {
            let metric = threshold.metric;
            let baseline = pair.baseline.series(metric);
            let recent = pair.recent.series(metric);

            let Some(comparison) = compare(&baseline, &recent) else {
                tracing::debug!(%metric, "Skipping metric: no usable baseline or recent mean");
                continue;
            };

            if !threshold.is_flagged(comparison.delta_pct) {
                tracing::debug!(%metric, delta_pct = comparison.delta_pct, "Below threshold");
                continue;
            }

            hypotheses.push(Hypothesis {
                title: global_title(threshold),
                description: describe_change(metric, &comparison, None),
                kind: HypothesisKind::Global,
                metric: Some(metric),
                segment: None,
                impact: Impact::of_change(metric, comparison.delta_pct),
                comparison: Some(comparison),
            });
        }

        hypotheses
    }

    fn segment_hypotheses(&self, pair: &WindowPair<'_>) -> Vec<Hypothesis> {
        let mut hypotheses = Vec::new();

        for threshold in &self.segment_thresholds {
            let metric = threshold.metric;
            let dimension = threshold.dimension;
            let baseline_groups = group_means(&pair.baseline, dimension, metric);
            let recent_groups = group_means(&pair.recent, dimension, metric);

            for baseline in &baseline_groups {
                // Values seen in only one window are not comparable
                let Some(recent) = find(&recent_groups, &baseline.value) else {
                    continue;
                };

                let Some(comparison) = compare(&baseline.series, &recent.series) else {
                    tracing::debug!(%dimension, value = %baseline.value, %metric, "Skipping segment: zero or undefined baseline");
                    continue;
                };

                if !threshold.is_flagged(comparison.delta_pct) {
                    continue;
                }

                let segment = SegmentRef {
                    dimension,
                    value: baseline.value.clone(),
                };
                hypotheses.push(Hypothesis {
                    title: segment_title(threshold, &segment),
                    description: describe_change(metric, &comparison, Some(&segment)),
                    kind: HypothesisKind::Segment,
                    metric: Some(metric),
                    segment: Some(segment),
                    impact: Impact::of_change(metric, comparison.delta_pct),
                    comparison: Some(comparison),
                });
            }
        }

        hypotheses
    }
}

/// Compare two series of defined values
///
/// Returns `None` when either mean is undefined or the baseline mean is zero.
pub fn compare(baseline: &[f64], recent: &[f64]) -> Option<Comparison> {
    let baseline_mean = mean_defined(baseline.iter().copied().map(Some))?;
    let recent_mean = mean_defined(recent.iter().copied().map(Some))?;

    if baseline_mean == 0.0 || !baseline_mean.is_finite() {
        return None;
    }

    Some(Comparison {
        baseline_mean,
        recent_mean,
        delta_pct: (recent_mean - baseline_mean) / baseline_mean * 100.0,
        baseline_samples: baseline.len(),
        recent_samples: recent.len(),
        p_value: welch_pvalue(baseline, recent)
            .map_err(|e| tracing::debug!("t-test unavailable: {}", e))
            .ok(),
    })
}

fn global_title(threshold: &MetricThreshold) -> String {
    if threshold.direction == Direction::Decline {
        format!("{} Drop Detected", threshold.metric.label())
    } else {
        format!("Higher {}", threshold.metric.label())
    }
}

fn segment_title(threshold: &SegmentThreshold, segment: &SegmentRef) -> String {
    let change = if threshold.direction == Direction::Decline {
        format!("{} Drop", threshold.metric.label())
    } else {
        format!("Higher {}", threshold.metric.label())
    };
    format!("{} in {}={}", change, segment.dimension, segment.value)
}

fn describe_change(metric: Metric, comparison: &Comparison, segment: Option<&SegmentRef>) -> String {
    let verb = if comparison.delta_pct < 0.0 {
        "dropped"
    } else {
        "increased"
    };
    let scope = segment
        .map(|s| format!(" for {}={}", s.dimension, s.value))
        .unwrap_or_default();

    format!(
        "{}{} {} from {} to {} ({:+.1}%).",
        metric.label(),
        scope,
        verb,
        metric.format_value(comparison.baseline_mean),
        metric.format_value(comparison.recent_mean),
        comparison.delta_pct
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_delta() {
        let c = compare(&[1.0, 1.0], &[0.5, 0.5]).unwrap();
        assert_eq!(c.delta_pct, -50.0);
        assert_eq!(c.baseline_samples, 2);
        // zero variance on both sides: no t-test
        assert_eq!(c.p_value, None);
    }

    #[test]
    fn test_compare_zero_baseline() {
        assert!(compare(&[0.0, 0.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_compare_undefined_side() {
        assert!(compare(&[], &[1.0]).is_none());
        assert!(compare(&[1.0], &[]).is_none());
    }

    #[test]
    fn test_compare_single_sample_has_no_pvalue() {
        let c = compare(&[2.0], &[1.0]).unwrap();
        assert_eq!(c.p_value, None);
        assert_eq!(c.delta_pct, -50.0);
    }

    #[test]
    fn test_describe_change_text() {
        let c = compare(&[1.0], &[0.5]).unwrap();
        let text = describe_change(Metric::Ctr, &c, None);
        assert_eq!(text, "CTR dropped from 1.00% to 0.50% (-50.0%).");
    }

    #[test]
    fn test_titles() {
        let ctr = MetricThreshold::new(Metric::Ctr, Direction::Decline, 10.0);
        let cpc = MetricThreshold::new(Metric::Cpc, Direction::Rise, 10.0);
        assert_eq!(global_title(&ctr), "CTR Drop Detected");
        assert_eq!(global_title(&cpc), "Higher CPC");
    }
}
