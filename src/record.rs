//! Campaign performance records
//!
//! One `Record` is one row of campaign performance for a single
//! day/campaign/segment combination. Records are immutable once ingested.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single day of performance for one campaign/segment combination
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub campaign: String,
    /// Ad set name (empty when the source has no ad set column)
    pub adset: String,
    pub country: String,
    pub platform: String,
    pub audience_type: String,
    pub creative_type: String,
    pub impressions: f64,
    pub clicks: f64,
    pub spend: f64,
    pub revenue: f64,
    /// CTR as reported by the source, if the dataset carries one
    pub reported_ctr: Option<f64>,
}

impl Record {
    /// Create a record with raw counters and empty segment dimensions
    ///
    /// Negative counters are clamped to zero.
    pub fn new(
        date: NaiveDate,
        campaign: impl Into<String>,
        impressions: f64,
        clicks: f64,
        spend: f64,
        revenue: f64,
    ) -> Self {
        Self {
            date,
            campaign: campaign.into(),
            adset: String::new(),
            country: String::new(),
            platform: String::new(),
            audience_type: String::new(),
            creative_type: String::new(),
            impressions: impressions.max(0.0),
            clicks: clicks.max(0.0),
            spend: spend.max(0.0),
            revenue: revenue.max(0.0),
            reported_ctr: None,
        }
    }

    /// Builder-style setter for a segment dimension
    pub fn with_segment(mut self, dimension: SegmentDimension, value: impl Into<String>) -> Self {
        let value = value.into();
        match dimension {
            SegmentDimension::Campaign => self.campaign = value,
            SegmentDimension::Country => self.country = value,
            SegmentDimension::Platform => self.platform = value,
            SegmentDimension::AudienceType => self.audience_type = value,
            SegmentDimension::CreativeType => self.creative_type = value,
        }
        self
    }

    /// Value of the given segment dimension for this record
    pub fn segment(&self, dimension: SegmentDimension) -> &str {
        match dimension {
            SegmentDimension::Campaign => &self.campaign,
            SegmentDimension::Country => &self.country,
            SegmentDimension::Platform => &self.platform,
            SegmentDimension::AudienceType => &self.audience_type,
            SegmentDimension::CreativeType => &self.creative_type,
        }
    }
}

/// Dimension a record set can be segmented by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentDimension {
    Campaign,
    Country,
    Platform,
    AudienceType,
    CreativeType,
}

impl SegmentDimension {
    /// Column name of this dimension in the source dataset
    pub fn column(&self) -> &'static str {
        match self {
            SegmentDimension::Campaign => "campaign_name",
            SegmentDimension::Country => "country",
            SegmentDimension::Platform => "platform",
            SegmentDimension::AudienceType => "audience_type",
            SegmentDimension::CreativeType => "creative_type",
        }
    }
}

impl fmt::Display for SegmentDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SegmentDimension::Campaign => "campaign",
            SegmentDimension::Country => "country",
            SegmentDimension::Platform => "platform",
            SegmentDimension::AudienceType => "audience_type",
            SegmentDimension::CreativeType => "creative_type",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_new_clamps_negative_counters() {
        let record = Record::new(day(1), "c1", -5.0, 10.0, -1.0, 3.0);
        assert_eq!(record.impressions, 0.0);
        assert_eq!(record.spend, 0.0);
        assert_eq!(record.clicks, 10.0);
    }

    #[test]
    fn test_with_segment_sets_dimension() {
        let record = Record::new(day(1), "c1", 100.0, 1.0, 1.0, 1.0)
            .with_segment(SegmentDimension::Country, "US")
            .with_segment(SegmentDimension::Platform, "Instagram");

        assert_eq!(record.segment(SegmentDimension::Country), "US");
        assert_eq!(record.segment(SegmentDimension::Platform), "Instagram");
        assert_eq!(record.segment(SegmentDimension::Campaign), "c1");
        assert_eq!(record.segment(SegmentDimension::AudienceType), "");
    }

    #[test]
    fn test_dimension_serde_snake_case() {
        let json = serde_json::to_string(&SegmentDimension::AudienceType).unwrap();
        assert_eq!(json, "\"audience_type\"");
        let parsed: SegmentDimension = serde_json::from_str("\"creative_type\"").unwrap();
        assert_eq!(parsed, SegmentDimension::CreativeType);
    }

    #[test]
    fn test_dimension_column_names() {
        assert_eq!(SegmentDimension::Campaign.column(), "campaign_name");
        assert_eq!(SegmentDimension::Country.to_string(), "country");
    }
}
