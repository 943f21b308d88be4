//! Derived rate metrics (CTR, CPC, CPM, ROAS)
//!
//! Every division is guarded: a zero denominator yields `None` ("undefined")
//! rather than an error or a misleading zero. Mean aggregation skips undefined
//! values so they never bias a window average.

use crate::record::Record;
use crate::stats::median;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reported CTR medians below this are treated as 0-1 ratios
const CTR_RATIO_MEDIAN_CUTOFF: f64 = 0.5;

/// Rate metric derived from raw counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Click-through rate, clicks / impressions × 100
    Ctr,
    /// Cost per click, spend / clicks
    Cpc,
    /// Cost per thousand impressions, spend / impressions × 1000
    Cpm,
    /// Return on ad spend, revenue / spend
    Roas,
}

impl Metric {
    /// Whether an increase in this metric is good for the advertiser
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Metric::Ctr | Metric::Roas)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Ctr => "ctr",
            Metric::Cpc => "cpc",
            Metric::Cpm => "cpm",
            Metric::Roas => "roas",
        }
    }

    /// Upper-case label used in hypothesis titles
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ctr => "CTR",
            Metric::Cpc => "CPC",
            Metric::Cpm => "CPM",
            Metric::Roas => "ROAS",
        }
    }

    /// Format a value of this metric for human-readable text
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Metric::Ctr => format!("{:.2}%", value),
            _ => format!("{:.2}", value),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived metrics for one record (`None` = undefined)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSet {
    pub ctr: Option<f64>,
    pub cpc: Option<f64>,
    pub cpm: Option<f64>,
    pub roas: Option<f64>,
}

impl MetricSet {
    /// Compute rate metrics from raw counters
    pub fn from_counters(impressions: f64, clicks: f64, spend: f64, revenue: f64) -> Self {
        Self {
            ctr: ratio(clicks, impressions).map(|r| r * 100.0),
            cpc: ratio(spend, clicks),
            cpm: ratio(spend, impressions).map(|r| r * 1000.0),
            roas: ratio(revenue, spend),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Ctr => self.ctr,
            Metric::Cpc => self.cpc,
            Metric::Cpm => self.cpm,
            Metric::Roas => self.roas,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// A record together with its derived metrics
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    pub record: Record,
    pub metrics: MetricSet,
}

impl DerivedRecord {
    pub fn from_record(record: Record) -> Self {
        let metrics = MetricSet::from_counters(
            record.impressions,
            record.clicks,
            record.spend,
            record.revenue,
        );
        Self { record, metrics }
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric)
    }
}

/// Derive CTR/CPC/CPM/ROAS for every record
///
/// Never fails: zero denominators produce undefined values.
pub fn derive_metrics(records: &[Record]) -> Vec<DerivedRecord> {
    records
        .iter()
        .cloned()
        .map(DerivedRecord::from_record)
        .collect()
}

/// Mean over the defined values, `None` when no value is defined
pub fn mean_defined<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Defined values of `metric` across `records`, in record order
pub fn metric_series(records: &[DerivedRecord], metric: Metric) -> Vec<f64> {
    records.iter().filter_map(|r| r.metric(metric)).collect()
}

/// Normalize a reported CTR column stored as a 0-1 ratio into percent form
///
/// Uses the dataset-wide median of the defined reported values: a median
/// below 0.5 is taken to mean ratio form, and every value is scaled by 100.
/// Returns whether the column was rescaled.
pub fn normalize_reported_ctr(records: &mut [Record]) -> bool {
    let reported: Vec<f64> = records.iter().filter_map(|r| r.reported_ctr).collect();
    if reported.is_empty() {
        return false;
    }

    let median_ctr = match median(&reported) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("Skipping CTR normalization: {}", e);
            return false;
        }
    };

    if median_ctr >= CTR_RATIO_MEDIAN_CUTOFF {
        return false;
    }

    tracing::debug!(median_ctr, "Reported CTR looks like a ratio, scaling to percent");
    for record in records.iter_mut() {
        if let Some(ctr) = record.reported_ctr.as_mut() {
            *ctr *= 100.0;
        }
    }
    true
}
