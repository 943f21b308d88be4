//! Pipeline configuration
//!
//! All thresholds, the window length and the confidence cutoffs live in one
//! explicit `InsightConfig` value that is passed into each component at
//! construction. There is no process-wide configuration state.

use crate::hypothesis::{
    default_metric_thresholds, default_segment_thresholds, MetricThreshold, SegmentThreshold,
};
use crate::scoring::ScoringConfig;
use crate::window::DEFAULT_WINDOW_LEN;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../insight-default.toml");

/// Configuration for the windowed-comparison pipeline
///
/// # Example TOML
/// ```toml
/// window_days = 7
///
/// [scoring]
/// min_confidence = 0.5
///
/// [[metric]]
/// metric = "ctr"
/// direction = "decline"
/// threshold_pct = 10.0
///
/// [[segment]]
/// dimension = "country"
/// threshold_pct = 20.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Records per comparison window
    pub window_days: usize,

    /// Rescale a reported CTR column stored as a 0-1 ratio into percent
    pub normalize_ctr: bool,

    pub scoring: ScoringConfig,

    /// Global per-metric thresholds, evaluated in order
    #[serde(rename = "metric")]
    pub metric_thresholds: Vec<MetricThreshold>,

    /// Per-segment thresholds, evaluated in order after the global ones
    #[serde(rename = "segment")]
    pub segment_thresholds: Vec<SegmentThreshold>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_LEN,
            normalize_ctr: true,
            scoring: ScoringConfig::default(),
            metric_thresholds: default_metric_thresholds(),
            segment_thresholds: default_segment_thresholds(),
        }
    }
}

impl InsightConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    /// Returns error if the file can't be read, has invalid TOML syntax, or
    /// fails validation.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML configuration")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// The embedded default configuration (`insight-default.toml`)
    pub fn embedded_default() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TOML).context("Failed to parse embedded insight-default.toml")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.window_days == 0 {
            return Err("window_days must be >= 1, got 0".to_string());
        }

        for threshold in &self.metric_thresholds {
            if threshold.threshold_pct < 0.0 || threshold.threshold_pct.is_nan() {
                return Err(format!(
                    "threshold_pct for metric '{}' must be non-negative, got {}",
                    threshold.metric, threshold.threshold_pct
                ));
            }
        }

        for threshold in &self.segment_thresholds {
            if threshold.threshold_pct < 0.0 || threshold.threshold_pct.is_nan() {
                return Err(format!(
                    "threshold_pct for segment '{}' must be non-negative, got {}",
                    threshold.dimension, threshold.threshold_pct
                ));
            }
        }

        self.scoring.validate()
    }
}
