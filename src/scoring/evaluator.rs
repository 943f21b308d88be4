use crate::hypothesis::Hypothesis;
use crate::metrics::DerivedRecord;
use crate::scoring::confidence::{confidence_for_delta, severity_for_delta, Severity};
use crate::scoring::evidence::Evidence;
use serde::{Deserialize, Serialize};

/// Scoring configuration
///
/// # Example
/// ```
/// use campaign_insight::scoring::ScoringConfig;
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.min_confidence, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Hypotheses scoring below this are dropped from the output
    ///
    /// Default: 0.5, so the fallback sentinels survive and every delta-bearing
    /// hypothesis (minimum 0.55) does too.
    pub min_confidence: f64,

    /// Fixed confidence for hypotheses without a delta (sentinels)
    ///
    /// Must lie in [0.4, 0.5]. Default: 0.5
    pub fallback_confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            fallback_confidence: 0.5,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            ));
        }

        if !(0.4..=0.5).contains(&self.fallback_confidence) {
            return Err(format!(
                "fallback_confidence must be in [0.4, 0.5], got {}",
                self.fallback_confidence
            ));
        }

        Ok(())
    }
}

/// A hypothesis with its confidence, severity and evidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedHypothesis {
    #[serde(flatten)]
    pub hypothesis: Hypothesis,
    pub confidence: f64,
    pub severity: Severity,
    pub evidence: Evidence,
}

/// Scores hypotheses and filters out those below the minimum confidence
#[derive(Debug, Clone)]
pub struct ConfidenceEvaluator {
    config: ScoringConfig,
}

impl ConfidenceEvaluator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Confidence and severity for a single hypothesis
    pub fn score(&self, hypothesis: &Hypothesis) -> (f64, Severity) {
        match hypothesis.delta_pct() {
            Some(delta) => (confidence_for_delta(delta), severity_for_delta(delta)),
            None => (self.config.fallback_confidence, Severity::Low),
        }
    }

    /// Score every hypothesis, preserving order and dropping low-confidence ones
    pub fn evaluate(
        &self,
        hypotheses: Vec<Hypothesis>,
        records: &[DerivedRecord],
    ) -> Vec<ValidatedHypothesis> {
        let total = hypotheses.len();
        let validated: Vec<ValidatedHypothesis> = hypotheses
            .into_iter()
            .filter_map(|hypothesis| {
                let (confidence, severity) = self.score(&hypothesis);
                let confidence = round3(confidence.clamp(0.0, 1.0));

                if confidence < self.config.min_confidence {
                    tracing::debug!(
                        title = %hypothesis.title,
                        confidence,
                        min_confidence = self.config.min_confidence,
                        "Dropping low-confidence hypothesis"
                    );
                    return None;
                }

                let evidence = Evidence::collect(&hypothesis, records);
                Some(ValidatedHypothesis {
                    hypothesis,
                    confidence,
                    severity,
                    evidence,
                })
            })
            .collect();

        tracing::info!(
            kept = validated.len(),
            dropped = total - validated.len(),
            "Evaluated hypotheses"
        );
        validated
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
