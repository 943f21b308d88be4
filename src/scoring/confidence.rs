// Confidence and severity step functions
//
// Both are deterministic closed-form functions of delta_pct:
// - confidence depends on |delta_pct| only (monotonic, bounded to [0.55, 0.95])
// - severity depends on the signed delta (decline-oriented), independent of
//   confidence

use serde::{Deserialize, Serialize};
use std::fmt;

/// (minimum |delta_pct|, confidence), checked top to bottom
const CONFIDENCE_STEPS: [(f64, f64); 4] = [(40.0, 0.95), (30.0, 0.85), (20.0, 0.75), (10.0, 0.65)];

/// Confidence for deltas below every step
pub const BASE_CONFIDENCE: f64 = 0.55;

/// Qualitative decline-magnitude label
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Map the magnitude of a percentage change to a confidence score
///
/// | \|delta_pct\| | confidence |
/// |---|---|
/// | ≥ 40 | 0.95 |
/// | ≥ 30 | 0.85 |
/// | ≥ 20 | 0.75 |
/// | ≥ 10 | 0.65 |
/// | otherwise | 0.55 |
pub fn confidence_for_delta(delta_pct: f64) -> f64 {
    let magnitude = delta_pct.abs();
    CONFIDENCE_STEPS
        .iter()
        .find(|(min, _)| magnitude >= *min)
        .map(|(_, confidence)| *confidence)
        .unwrap_or(BASE_CONFIDENCE)
}

/// Map a signed percentage change to a severity label
///
/// Declines only: a +40% change is `Low`, a -40% change is `Critical`.
pub fn severity_for_delta(delta_pct: f64) -> Severity {
    if delta_pct <= -40.0 {
        Severity::Critical
    } else if delta_pct <= -25.0 {
        Severity::High
    } else if delta_pct <= -15.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}
