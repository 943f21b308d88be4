use crate::metrics::Metric;
use crate::record::SegmentDimension;
use serde::Serialize;

/// Sentinel metric name for hypotheses that target no metric
pub const NO_METRIC: &str = "none";

/// Which code path produced a hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisKind {
    /// Whole-dataset metric change
    Global,
    /// Change within one segment value
    Segment,
    /// No comparison crossed its threshold
    NoSignificantChange,
    /// Not enough history to compare two windows
    InsufficientData,
}

/// Qualitative effect of the change on campaign performance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Negative,
    Positive,
    Neutral,
}

impl Impact {
    /// Impact of a signed change in `metric`
    pub fn of_change(metric: Metric, delta_pct: f64) -> Self {
        if delta_pct == 0.0 {
            Impact::Neutral
        } else if (delta_pct > 0.0) == metric.higher_is_better() {
            Impact::Positive
        } else {
            Impact::Negative
        }
    }
}

/// Segment a hypothesis is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentRef {
    pub dimension: SegmentDimension,
    pub value: String,
}

/// Baseline → recent window comparison backing a hypothesis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub baseline_mean: f64,
    pub recent_mean: f64,
    /// Percentage change from baseline mean to recent mean
    pub delta_pct: f64,
    /// Defined values contributing to each mean
    pub baseline_samples: usize,
    pub recent_samples: usize,
    /// Welch's t-test p-value, when computable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
}

/// Candidate insight awaiting confidence scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hypothesis {
    pub title: String,
    pub description: String,
    pub kind: HypothesisKind,
    pub metric: Option<Metric>,
    pub segment: Option<SegmentRef>,
    pub comparison: Option<Comparison>,
    pub impact: Impact,
}

impl Hypothesis {
    /// Sentinel emitted instead of comparisons when history is too short
    pub fn insufficient_data(available: usize, required: usize) -> Self {
        Self {
            title: "Insufficient Data".to_string(),
            description: format!(
                "Only {} records available; {} needed to compare two full windows.",
                available, required
            ),
            kind: HypothesisKind::InsufficientData,
            metric: None,
            segment: None,
            comparison: None,
            impact: Impact::Neutral,
        }
    }

    /// Sentinel emitted when no comparison crosses its threshold
    pub fn no_significant_change() -> Self {
        Self {
            title: "No Major Changes Detected".to_string(),
            description: "Metrics stable compared to previous period.".to_string(),
            kind: HypothesisKind::NoSignificantChange,
            metric: None,
            segment: None,
            comparison: None,
            impact: Impact::Neutral,
        }
    }

    /// Metric name, or `"none"` for sentinel hypotheses
    pub fn metric_name(&self) -> &'static str {
        self.metric.map(|m| m.name()).unwrap_or(NO_METRIC)
    }

    pub fn delta_pct(&self) -> Option<f64> {
        self.comparison.as_ref().map(|c| c.delta_pct)
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(
            self.kind,
            HypothesisKind::NoSignificantChange | HypothesisKind::InsufficientData
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_of_change() {
        assert_eq!(Impact::of_change(Metric::Ctr, -20.0), Impact::Negative);
        assert_eq!(Impact::of_change(Metric::Roas, 15.0), Impact::Positive);
        assert_eq!(Impact::of_change(Metric::Cpc, 15.0), Impact::Negative);
        assert_eq!(Impact::of_change(Metric::Cpm, -5.0), Impact::Positive);
    }

    #[test]
    fn test_impact_zero_change_is_neutral() {
        for metric in [Metric::Ctr, Metric::Cpc, Metric::Cpm, Metric::Roas] {
            assert_eq!(Impact::of_change(metric, 0.0), Impact::Neutral);
        }
    }

    #[test]
    fn test_sentinels() {
        let short = Hypothesis::insufficient_data(13, 14);
        assert!(short.is_sentinel());
        assert_eq!(short.metric_name(), NO_METRIC);
        assert!(short.delta_pct().is_none());
        assert_eq!(short.impact, Impact::Neutral);

        assert!(Hypothesis::no_significant_change().is_sentinel());
    }
}
