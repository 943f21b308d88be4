//! Required-column schema validation
//!
//! Runs before any metric derivation so that downstream division logic can
//! assume well-typed numeric columns. Every violated column is collected
//! before failing; validation is never fail-fast.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Expected kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    String,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => f.write_str("numeric"),
            ColumnKind::String => f.write_str("string"),
        }
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnViolation {
    /// Required column absent from the header
    Missing { column: String },
    /// Column present but its values are of the wrong kind
    WrongKind {
        column: String,
        expected: ColumnKind,
        found: ColumnKind,
    },
    /// The table has no data rows
    EmptyTable,
}

impl fmt::Display for ColumnViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnViolation::Missing { column } => write!(f, "missing column '{}'", column),
            ColumnViolation::WrongKind {
                column,
                expected,
                found,
            } => write!(f, "column '{}' should be {}, found {}", column, expected, found),
            ColumnViolation::EmptyTable => f.write_str("record set is empty"),
        }
    }
}

/// Schema validation failure listing every violated column
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Schema validation failed: {}", join_violations(.violations))]
pub struct SchemaError {
    pub violations: Vec<ColumnViolation>,
}

fn join_violations(violations: &[ColumnViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Loosely typed table as supplied by ingestion (empty cell = missing value)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Cell at (row, column index); short rows read as missing
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// Infer the kind of a column from its non-empty cells
    ///
    /// Numeric when every non-empty cell parses as a number and at least one
    /// cell is non-empty; String otherwise.
    pub fn infer_kind(&self, column: usize) -> ColumnKind {
        let mut seen = false;
        for row in 0..self.rows.len() {
            let cell = self.cell(row, column);
            if cell.is_empty() {
                continue;
            }
            if cell.parse::<f64>().is_err() {
                return ColumnKind::String;
            }
            seen = true;
        }
        if seen {
            ColumnKind::Numeric
        } else {
            ColumnKind::String
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Validates a table against a set of required columns
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    required: Vec<(String, ColumnKind)>,
}

impl SchemaValidator {
    /// Create a validator from (column, kind) pairs, checked in the given order
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnKind)>,
        S: Into<String>,
    {
        Self {
            required: required
                .into_iter()
                .map(|(name, kind)| (name.into(), kind))
                .collect(),
        }
    }

    /// Required columns of a campaign performance export
    pub fn campaign_default() -> Self {
        Self::new([
            ("date", ColumnKind::String),
            ("campaign_name", ColumnKind::String),
            ("country", ColumnKind::String),
            ("platform", ColumnKind::String),
            ("audience_type", ColumnKind::String),
            ("creative_type", ColumnKind::String),
            ("impressions", ColumnKind::Numeric),
            ("clicks", ColumnKind::Numeric),
            ("spend", ColumnKind::Numeric),
            ("revenue", ColumnKind::Numeric),
        ])
    }

    /// Check every required column, collecting all violations
    pub fn validate(&self, table: &RawTable) -> Result<(), SchemaError> {
        let mut violations = Vec::new();

        for (column, expected) in &self.required {
            let Some(index) = table.column_index(column) else {
                violations.push(ColumnViolation::Missing {
                    column: column.clone(),
                });
                continue;
            };

            if table.is_empty() {
                continue;
            }

            let found = table.infer_kind(index);
            let mismatch = match expected {
                ColumnKind::Numeric => found != ColumnKind::Numeric && has_values(table, index),
                ColumnKind::String => found == ColumnKind::Numeric,
            };
            if mismatch {
                violations.push(ColumnViolation::WrongKind {
                    column: column.clone(),
                    expected: *expected,
                    found,
                });
            }
        }

        if table.is_empty() {
            violations.push(ColumnViolation::EmptyTable);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = violations.len(), "Schema validation failed");
            Err(SchemaError { violations })
        }
    }
}

// An all-empty numeric column coerces to zeros rather than failing.
fn has_values(table: &RawTable, column: usize) -> bool {
    (0..table.len()).any(|row| !table.cell(row, column).is_empty())
}
