//! Campaign Insight - windowed performance diagnostics for ad campaigns
//!
//! This library validates campaign CSV exports, derives CTR/CPC/CPM/ROAS per
//! record, compares a recent window against the preceding baseline window
//! (globally and per segment), and scores the resulting hypotheses with a
//! deterministic confidence/severity rule.

pub mod cli;
pub mod config;
pub mod error;
pub mod hypothesis;
pub mod ingest;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod schema;
pub mod scoring;
pub mod stats;
pub mod window;
