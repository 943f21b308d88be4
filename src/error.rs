//! Error types for the insight pipeline

use crate::schema::SchemaError;
use thiserror::Error;

/// Errors that abort an insight run
///
/// Everything else (undefined metrics, missing baselines, short history,
/// low confidence) degrades into skipped comparisons or sentinel output.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Line {line}: {message}")]
    Ingest { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, InsightError>;
