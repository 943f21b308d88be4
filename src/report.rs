//! Insight report output
//!
//! JSON document (`insights.json`) plus a Markdown summary (`report.md`) for
//! one pipeline run, and a plain-text rendering for the terminal.

use crate::hypothesis::{HypothesisKind, Impact, SegmentRef};
use crate::metrics::{mean_defined, DerivedRecord};
use crate::pipeline::InsightRun;
use crate::scoring::{Evidence, Severity, ValidatedHypothesis};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Report format identifier
pub const REPORT_FORMAT: &str = "campaign-insight-v1";

/// Number of campaigns listed in the data summary
pub const TOP_CAMPAIGNS: usize = 5;

/// A scored hypothesis as written to `insights.json`
#[derive(Debug, Clone, Serialize)]
pub struct JsonHypothesis {
    pub title: String,
    pub description: String,
    pub kind: HypothesisKind,
    /// Metric name, `"none"` for sentinels
    pub metric: String,
    /// `null` for global and sentinel hypotheses
    pub segment: Option<SegmentRef>,
    /// Percentage change from baseline to recent window, `null` for sentinels
    pub delta_pct: Option<f64>,
    pub impact: Impact,
    pub confidence: f64,
    pub severity: Severity,
    pub evidence: Evidence,
}

impl From<&ValidatedHypothesis> for JsonHypothesis {
    fn from(scored: &ValidatedHypothesis) -> Self {
        let h = &scored.hypothesis;
        Self {
            title: h.title.clone(),
            description: h.description.clone(),
            kind: h.kind,
            metric: h.metric_name().to_string(),
            segment: h.segment.clone(),
            delta_pct: h.delta_pct().map(round2),
            impact: h.impact,
            confidence: scored.confidence,
            severity: scored.severity,
            evidence: scored.evidence.clone(),
        }
    }
}

/// Total spend for one campaign
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignSpend {
    pub campaign: String,
    pub spend: f64,
}

/// Shape of the analyzed dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub rows: usize,
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
    /// Campaigns with the highest total spend, descending
    pub top_campaigns: Vec<CampaignSpend>,
    /// Mean of the source's own CTR column, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_reported_ctr: Option<f64>,
}

impl DataSummary {
    pub fn from_records(records: &[DerivedRecord]) -> Self {
        let date_min = records.iter().map(|r| r.record.date).min();
        let date_max = records.iter().map(|r| r.record.date).max();

        // first-appearance order breaks spend ties
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<CampaignSpend> = Vec::new();
        for r in records {
            let campaign = r.record.campaign.as_str();
            match index.get(campaign) {
                Some(&i) => totals[i].spend += r.record.spend,
                None => {
                    index.insert(campaign, totals.len());
                    totals.push(CampaignSpend {
                        campaign: campaign.to_string(),
                        spend: r.record.spend,
                    });
                }
            }
        }
        totals.sort_by(|a, b| b.spend.total_cmp(&a.spend));
        totals.truncate(TOP_CAMPAIGNS);

        Self {
            rows: records.len(),
            date_min,
            date_max,
            top_campaigns: totals,
            mean_reported_ctr: mean_defined(records.iter().map(|r| r.record.reported_ctr)),
        }
    }
}

/// Complete insights document
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub format: String,
    /// Generation time, RFC 3339
    pub timestamp: String,
    pub hypotheses: Vec<JsonHypothesis>,
    pub data_summary: DataSummary,
}

impl InsightReport {
    pub fn from_run(run: &InsightRun) -> Self {
        Self {
            format: REPORT_FORMAT.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            hypotheses: run.hypotheses.iter().map(JsonHypothesis::from).collect(),
            data_summary: DataSummary::from_records(&run.records),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Markdown summary for `report.md`
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str("# Campaign Insight Report\n\n");
        output.push_str(&format!("Generated: {}\n\n", self.timestamp));

        output.push_str("## Data Summary\n\n");
        output.push_str(&format!("- Rows: {}\n", self.data_summary.rows));
        if let (Some(min), Some(max)) = (self.data_summary.date_min, self.data_summary.date_max) {
            output.push_str(&format!("- Date range: {} to {}\n", min, max));
        }
        if !self.data_summary.top_campaigns.is_empty() {
            output.push_str("\n| Campaign | Spend |\n|----------|-------|\n");
            for c in &self.data_summary.top_campaigns {
                output.push_str(&format!("| {} | {:.2} |\n", c.campaign, c.spend));
            }
        }

        output.push_str("\n## Insights\n\n");
        for h in &self.hypotheses {
            output.push_str(&format!("### {}\n\n", h.title));
            output.push_str(&format!("{}\n\n", h.description));
            output.push_str(&format!("- Confidence: {:.2}\n", h.confidence));
            output.push_str(&format!("- Severity: {}\n", h.severity));
            output.push_str(&format!("- Metric: {}\n", h.metric));
            if let Some(delta) = h.delta_pct {
                output.push_str(&format!("- Change: {:+.1}%\n", delta));
            }
            if let Some(p) = h.evidence.p_value {
                output.push_str(&format!("- p-value: {:.4}\n", p));
            }
            output.push('\n');
        }

        output
    }

    /// Plain-text summary for the terminal
    pub fn to_report_string(&self) -> String {
        let mut output = String::new();
        output.push_str("=== Campaign Insights ===\n");
        output.push_str(&format!("Rows: {}", self.data_summary.rows));
        if let (Some(min), Some(max)) = (self.data_summary.date_min, self.data_summary.date_max) {
            output.push_str(&format!(" ({} to {})", min, max));
        }
        output.push_str("\n\n");

        for (i, h) in self.hypotheses.iter().enumerate() {
            output.push_str(&format!(
                "{}. [{}] {} (confidence {:.2})\n",
                i + 1,
                h.severity.to_string().to_uppercase(),
                h.title,
                h.confidence
            ));
            output.push_str(&format!("   {}\n", h.description));
        }

        if self.hypotheses.is_empty() {
            output.push_str("No hypotheses met the confidence threshold.\n");
        }

        output
    }

    /// Write `insights.json` and `report.md` into `dir`, creating it if needed
    pub fn write_artifacts<P: AsRef<Path>>(&self, dir: P) -> anyhow::Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let json_path = dir.join("insights.json");
        fs::write(&json_path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;

        let md_path = dir.join("report.md");
        fs::write(&md_path, self.to_markdown())
            .with_context(|| format!("Failed to write {}", md_path.display()))?;

        tracing::info!(dir = %dir.display(), "Wrote insight artifacts");
        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
