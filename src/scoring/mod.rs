// Confidence scoring for generated hypotheses
//
// Turns a raw percentage delta into a confidence score and a severity label,
// attaches population-level evidence for the targeted metric, and silently
// filters out anything below the configured minimum confidence.
//
// Hypotheses without a delta (insufficient data, no significant change)
// bypass the step tables and receive the configured fallback confidence and
// `Severity::Low`.

mod confidence;
mod evaluator;
mod evidence;

pub use confidence::{confidence_for_delta, severity_for_delta, Severity, BASE_CONFIDENCE};
pub use evaluator::{ConfidenceEvaluator, ScoringConfig, ValidatedHypothesis};
pub use evidence::Evidence;
