//! Recent/baseline window splitting
//!
//! Splits a date-sorted record set by record count (not calendar gaps) into
//! the final N records ("recent") and the N records immediately before them
//! ("baseline"). Missing days are never synthesized.

use crate::metrics::{mean_defined, DerivedRecord, Metric};

/// Default window length in records (one week of daily rows)
pub const DEFAULT_WINDOW_LEN: usize = 7;

/// A contiguous slice of records on one side of the comparison
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    pub records: &'a [DerivedRecord],
}

impl<'a> Window<'a> {
    /// Mean of `metric` over the window's defined values
    pub fn mean(&self, metric: Metric) -> Option<f64> {
        mean_defined(self.records.iter().map(|r| r.metric(metric)))
    }

    /// Defined values of `metric` in this window
    pub fn series(&self, metric: Metric) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.metric(metric))
            .collect()
    }
}

/// Two adjacent, non-overlapping, equal-length windows
#[derive(Debug, Clone, Copy)]
pub struct WindowPair<'a> {
    pub baseline: Window<'a>,
    pub recent: Window<'a>,
}

/// Outcome of splitting a record set
#[derive(Debug, Clone, Copy)]
pub enum WindowSplit<'a> {
    Pair(WindowPair<'a>),
    /// Fewer than two full windows of history
    InsufficientHistory { available: usize, required: usize },
}

impl<'a> WindowSplit<'a> {
    pub fn pair(&self) -> Option<&WindowPair<'a>> {
        match self {
            WindowSplit::Pair(pair) => Some(pair),
            WindowSplit::InsufficientHistory { .. } => None,
        }
    }
}

/// Splits records into baseline and recent windows of equal length
#[derive(Debug, Clone, Copy)]
pub struct WindowSplitter {
    window_len: usize,
}

impl Default for WindowSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_LEN)
    }
}

impl WindowSplitter {
    /// Create a splitter; a zero length is treated as one record
    pub fn new(window_len: usize) -> Self {
        Self {
            window_len: window_len.max(1),
        }
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Split a date-sorted record set
    pub fn split<'a>(&self, records: &'a [DerivedRecord]) -> WindowSplit<'a> {
        let n = self.window_len;
        let required = 2 * n;

        if records.len() < required {
            tracing::warn!(
                available = records.len(),
                required,
                "Insufficient history for window comparison"
            );
            return WindowSplit::InsufficientHistory {
                available: records.len(),
                required,
            };
        }

        let recent_start = records.len() - n;
        let baseline_start = recent_start - n;

        WindowSplit::Pair(WindowPair {
            baseline: Window {
                records: &records[baseline_start..recent_start],
            },
            recent: Window {
                records: &records[recent_start..],
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_metrics;
    use crate::record::Record;
    use chrono::{Duration, NaiveDate};

    fn daily(count: usize) -> Vec<DerivedRecord> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let records: Vec<Record> = (0..count)
            .map(|i| {
                Record::new(
                    start + Duration::days(i as i64),
                    "c1",
                    1000.0,
                    i as f64,
                    10.0,
                    20.0,
                )
            })
            .collect();
        derive_metrics(&records)
    }

    #[test]
    fn test_split_exact_two_windows() {
        let records = daily(14);
        let split = WindowSplitter::default().split(&records);

        let pair = split.pair().expect("expected a window pair");
        assert_eq!(pair.baseline.records.len(), 7);
        assert_eq!(pair.recent.records.len(), 7);
        assert_eq!(pair.baseline.records[0].record.clicks, 0.0);
        assert_eq!(pair.recent.records[0].record.clicks, 7.0);
    }

    #[test]
    fn test_split_uses_last_records() {
        let records = daily(20);
        let split = WindowSplitter::new(5).split(&records);
        let pair = split.pair().unwrap();

        // baseline = records 10..15, recent = 15..20
        assert_eq!(pair.baseline.records[0].record.clicks, 10.0);
        assert_eq!(pair.recent.records[4].record.clicks, 19.0);
        assert!(pair.baseline.records.last().unwrap().record.date < pair.recent.records[0].record.date);
    }

    #[test]
    fn test_split_insufficient_history() {
        let records = daily(13);
        match WindowSplitter::default().split(&records) {
            WindowSplit::InsufficientHistory {
                available,
                required,
            } => {
                assert_eq!(available, 13);
                assert_eq!(required, 14);
            }
            WindowSplit::Pair(_) => panic!("Expected InsufficientHistory"),
        }
    }

    #[test]
    fn test_zero_window_len_clamped() {
        assert_eq!(WindowSplitter::new(0).window_len(), 1);
    }

    #[test]
    fn test_window_mean_and_series() {
        let records = daily(14);
        let split = WindowSplitter::default().split(&records);
        let pair = split.pair().unwrap();

        // baseline clicks 0..7 on 1000 impressions → ctr 0.0..0.6
        let mean = pair.baseline.mean(Metric::Ctr).unwrap();
        assert!((mean - 0.3).abs() < 1e-9);
        assert_eq!(pair.recent.series(Metric::Roas), vec![2.0; 7]);
    }
}
