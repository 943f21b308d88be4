// Integration Test Utilities
//
// Builders for synthetic campaign exports, as CSV text or typed records

#![allow(dead_code)]

use campaign_insight::record::{Record, SegmentDimension};
use chrono::{Duration, NaiveDate};
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str =
    "date,campaign_name,country,platform,audience_type,creative_type,impressions,clicks,spend,revenue";

/// One synthetic CSV row
#[derive(Debug, Clone)]
pub struct Row {
    pub date: NaiveDate,
    pub campaign: String,
    pub country: String,
    pub platform: String,
    pub audience_type: String,
    pub creative_type: String,
    pub impressions: f64,
    pub clicks: f64,
    pub spend: f64,
    pub revenue: f64,
}

impl Row {
    pub fn new(day: i64, impressions: f64, clicks: f64, spend: f64, revenue: f64) -> Self {
        Self {
            date: start_date() + Duration::days(day),
            campaign: "Women Comfort".to_string(),
            country: "US".to_string(),
            platform: "Facebook".to_string(),
            audience_type: "Broad".to_string(),
            creative_type: "Image".to_string(),
            impressions,
            clicks,
            spend,
            revenue,
        }
    }

    pub fn country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    pub fn platform(mut self, platform: &str) -> Self {
        self.platform = platform.to_string();
        self
    }

    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{}",
            self.date,
            self.campaign,
            self.country,
            self.platform,
            self.audience_type,
            self.creative_type,
            self.impressions,
            self.clicks,
            self.spend,
            self.revenue
        )
    }

    pub fn to_record(&self) -> Record {
        Record::new(
            self.date,
            self.campaign.clone(),
            self.impressions,
            self.clicks,
            self.spend,
            self.revenue,
        )
        .with_segment(SegmentDimension::Country, self.country.clone())
        .with_segment(SegmentDimension::Platform, self.platform.clone())
        .with_segment(SegmentDimension::AudienceType, self.audience_type.clone())
        .with_segment(SegmentDimension::CreativeType, self.creative_type.clone())
    }
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

/// 14 daily rows: CTR 1.0% for the first week, 0.5% for the second
pub fn ctr_drop_rows() -> Vec<Row> {
    (0..14)
        .map(|d| Row::new(d, 1000.0, if d < 7 { 10.0 } else { 5.0 }, 100.0, 300.0))
        .collect()
}

/// `n` identical daily rows
pub fn stable_rows(n: i64) -> Vec<Row> {
    (0..n).map(|d| Row::new(d, 1000.0, 10.0, 100.0, 300.0)).collect()
}

pub fn to_csv(rows: &[Row]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_csv_line());
        out.push('\n');
    }
    out
}

pub fn to_records(rows: &[Row]) -> Vec<Record> {
    rows.iter().map(Row::to_record).collect()
}

/// Write CSV text to a temporary `.csv` file
pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}
