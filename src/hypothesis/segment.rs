// Per-segment aggregation of a window
//
// Grouping is a pure function of (window, dimension, metric). Output order is
// the order in which each segment value first appears in the window, so the
// emitted hypotheses are deterministic regardless of hash iteration order.
// Rows with an empty value for the dimension belong to no segment.

use crate::metrics::{mean_defined, Metric};
use crate::record::SegmentDimension;
use crate::window::Window;
use std::collections::HashMap;

/// Aggregate of one segment value within a window
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMean {
    pub value: String,
    /// Rows carrying this segment value
    pub rows: usize,
    /// Defined metric values, in record order
    pub series: Vec<f64>,
}

impl SegmentMean {
    /// Mean of the defined values (`None` when every value is undefined)
    pub fn mean(&self) -> Option<f64> {
        mean_defined(self.series.iter().copied().map(Some))
    }
}

/// Group a window by `dimension` and collect `metric` per segment value
pub fn group_means(window: &Window<'_>, dimension: SegmentDimension, metric: Metric) -> Vec<SegmentMean> {
    let mut groups: Vec<SegmentMean> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for derived in window.records {
        let value = derived.record.segment(dimension);
        if value.is_empty() {
            continue;
        }
        let slot = *index.entry(value).or_insert_with(|| {
            groups.push(SegmentMean {
                value: value.to_string(),
                rows: 0,
                series: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.rows += 1;
        if let Some(v) = derived.metric(metric) {
            group.series.push(v);
        }
    }

    groups
}

/// Find the aggregate for `value` in a grouped window
pub fn find<'g>(groups: &'g [SegmentMean], value: &str) -> Option<&'g SegmentMean> {
    groups.iter().find(|g| g.value == value)
}
