//! End-to-end insight pipeline
//!
//! Schema Validator → Metric Deriver → Window Splitter → Hypothesis Generator
//! → Confidence Evaluator. Each stage is a single synchronous pass over the
//! in-memory record set. Only schema validation can fail the run.

use crate::config::InsightConfig;
use crate::error::{InsightError, Result};
use crate::hypothesis::HypothesisGenerator;
use crate::ingest::to_records;
use crate::metrics::{derive_metrics, normalize_reported_ctr, DerivedRecord};
use crate::record::Record;
use crate::schema::{RawTable, SchemaValidator};
use crate::scoring::{ConfidenceEvaluator, ValidatedHypothesis};
use crate::window::WindowSplitter;

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct InsightRun {
    /// Date-sorted records with derived metrics
    pub records: Vec<DerivedRecord>,
    /// Scored hypotheses, in emission order
    pub hypotheses: Vec<ValidatedHypothesis>,
    /// Whether the reported CTR column was rescaled from ratio to percent
    pub ctr_normalized: bool,
}

/// Runs the five pipeline stages with one explicit configuration
#[derive(Debug, Clone)]
pub struct InsightPipeline {
    config: InsightConfig,
    validator: SchemaValidator,
    splitter: WindowSplitter,
    generator: HypothesisGenerator,
    evaluator: ConfidenceEvaluator,
}

impl InsightPipeline {
    /// Build a pipeline, validating the configuration
    pub fn new(config: InsightConfig) -> Result<Self> {
        config.validate().map_err(InsightError::Config)?;

        Ok(Self {
            validator: SchemaValidator::campaign_default(),
            splitter: WindowSplitter::new(config.window_days),
            generator: HypothesisGenerator::from_config(&config),
            evaluator: ConfidenceEvaluator::new(config.scoring.clone()),
            config,
        })
    }

    /// Validate a raw table, convert it to records and run the pipeline
    ///
    /// # Errors
    /// `InsightError::Schema` listing every violated column, before any
    /// metric is derived; `InsightError::Ingest` for unparseable dates.
    pub fn run_table(&self, table: &RawTable) -> Result<InsightRun> {
        self.validator.validate(table)?;
        let records = to_records(table)?;
        Ok(self.run_records(records))
    }

    /// Run the pipeline on already-typed records
    pub fn run_records(&self, mut records: Vec<Record>) -> InsightRun {
        let ctr_normalized = self.config.normalize_ctr && normalize_reported_ctr(&mut records);

        // stable: same-day rows keep their input order
        records.sort_by_key(|r| r.date);
        let derived = derive_metrics(&records);
        tracing::info!(records = derived.len(), "Derived metrics");

        let split = self.splitter.split(&derived);
        let hypotheses = self.generator.generate(&split);
        let hypotheses = self.evaluator.evaluate(hypotheses, &derived);

        InsightRun {
            records: derived,
            hypotheses,
            ctr_normalized,
        }
    }
}
