//! CSV ingestion
//!
//! Reads a campaign export into a loosely typed `RawTable` for schema
//! validation, then converts validated rows into typed `Record`s. Missing
//! counter cells coerce to zero.

use crate::error::{InsightError, Result};
use crate::record::Record;
use crate::schema::RawTable;
use anyhow::Context;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a CSV file into a raw table
pub fn read_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<RawTable> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))?;
    read_csv_from(file)
        .with_context(|| format!("Failed to read CSV file: {}", path.as_ref().display()))
}

/// Read CSV data from any reader into a raw table
pub fn read_csv_from<R: Read>(reader: R) -> anyhow::Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let row = row.with_context(|| format!("Malformed CSV row {}", i + 2))?;
        rows.push(row.iter().map(|c| c.to_string()).collect());
    }

    tracing::info!(rows = rows.len(), columns = headers.len(), "Loaded CSV");
    Ok(RawTable::new(headers, rows))
}

/// Convert a validated table into typed records
///
/// Requires a `date` column; segment columns, `adset_name` and `ctr` are
/// optional. Line numbers in errors count the header as line 1.
pub fn to_records(table: &RawTable) -> Result<Vec<Record>> {
    let date_col = table.column_index("date").ok_or_else(|| InsightError::Ingest {
        line: 1,
        message: "missing 'date' column".to_string(),
    })?;

    let col = |name: &str| table.column_index(name);
    let campaign = col("campaign_name");
    let adset = col("adset_name");
    let country = col("country");
    let platform = col("platform");
    let audience = col("audience_type");
    let creative = col("creative_type");
    let impressions = col("impressions");
    let clicks = col("clicks");
    let spend = col("spend");
    let revenue = col("revenue");
    let ctr = col("ctr");

    let text = |row: usize, column: Option<usize>| -> String {
        column.map(|c| table.cell(row, c).to_string()).unwrap_or_default()
    };

    let mut records = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let line = row + 2;
        let number = |column: Option<usize>| -> Result<Option<f64>> {
            match column.map(|c| table.cell(row, c)) {
                None | Some("") => Ok(None),
                Some(cell) => cell.parse::<f64>().map(Some).map_err(|_| InsightError::Ingest {
                    line,
                    message: format!("'{}' is not a number", cell),
                }),
            }
        };

        let date = parse_date(table.cell(row, date_col)).ok_or_else(|| InsightError::Ingest {
            line,
            message: format!("unparseable date '{}'", table.cell(row, date_col)),
        })?;

        let mut record = Record::new(
            date,
            text(row, campaign),
            number(impressions)?.unwrap_or(0.0),
            number(clicks)?.unwrap_or(0.0),
            number(spend)?.unwrap_or(0.0),
            number(revenue)?.unwrap_or(0.0),
        );
        record.adset = text(row, adset);
        record.country = text(row, country);
        record.platform = text(row, platform);
        record.audience_type = text(row, audience);
        record.creative_type = text(row, creative);
        record.reported_ctr = number(ctr)?;

        records.push(record);
    }

    Ok(records)
}

/// Parse `YYYY-MM-DD`, or the date part of an ISO-8601 datetime
fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell, DATE_FORMAT)
        .ok()
        .or_else(|| cell.get(..10).and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok()))
}
