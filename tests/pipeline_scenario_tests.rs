//! End-to-end pipeline scenarios over synthetic campaign exports

mod utils;

use campaign_insight::config::InsightConfig;
use campaign_insight::error::InsightError;
use campaign_insight::hypothesis::HypothesisKind;
use campaign_insight::ingest;
use campaign_insight::pipeline::InsightPipeline;
use campaign_insight::record::SegmentDimension;
use campaign_insight::report::InsightReport;
use campaign_insight::schema::ColumnViolation;
use campaign_insight::scoring::Severity;
use utils::Row;

fn pipeline() -> InsightPipeline {
    InsightPipeline::new(InsightConfig::default()).unwrap()
}

#[test]
fn test_ctr_drop_from_csv() {
    let file = utils::write_csv(&utils::to_csv(&utils::ctr_drop_rows()));
    let table = ingest::read_csv(file.path()).unwrap();
    let run = pipeline().run_table(&table).unwrap();

    let ctr: Vec<_> = run
        .hypotheses
        .iter()
        .filter(|h| h.hypothesis.metric_name() == "ctr")
        .collect();
    assert_eq!(ctr.len(), 1);
    assert_eq!(ctr[0].hypothesis.kind, HypothesisKind::Global);
    assert_eq!(ctr[0].confidence, 0.95);
    assert_eq!(ctr[0].severity, Severity::Critical);
    assert!((ctr[0].hypothesis.delta_pct().unwrap() + 50.0).abs() < 1e-9);
    assert_eq!(run.hypotheses[0].hypothesis.title, "CTR Drop Detected");
}

#[test]
fn test_thirteen_records_single_sentinel() {
    let rows: Vec<Row> = utils::ctr_drop_rows().into_iter().take(13).collect();
    let run = pipeline().run_records(utils::to_records(&rows));

    assert_eq!(run.hypotheses.len(), 1);
    let sentinel = &run.hypotheses[0];
    assert_eq!(sentinel.hypothesis.kind, HypothesisKind::InsufficientData);
    assert_eq!(sentinel.hypothesis.metric_name(), "none");
    assert!(sentinel.hypothesis.delta_pct().is_none());
    assert_eq!(sentinel.evidence.sample_size, 13);
}

#[test]
fn test_stable_data_fallback_confidence() {
    // +4% CTR and -3.8% CPC stay inside every threshold
    let rows: Vec<Row> = (0..14)
        .map(|d| Row::new(d, 1000.0, if d < 7 { 10.0 } else { 10.4 }, 100.0, 300.0))
        .collect();
    let run = pipeline().run_records(utils::to_records(&rows));

    assert_eq!(run.hypotheses.len(), 1);
    let sentinel = &run.hypotheses[0];
    assert_eq!(sentinel.hypothesis.kind, HypothesisKind::NoSignificantChange);
    assert_eq!(sentinel.hypothesis.title, "No Major Changes Detected");
    assert_eq!(sentinel.confidence, 0.5);
    assert_eq!(sentinel.severity, Severity::Low);
}

#[test]
fn test_zero_baseline_roas_segment_skipped() {
    // DE rows earn nothing during the baseline, so its baseline ROAS mean is 0
    let rows: Vec<Row> = (0..14)
        .map(|d| {
            if d % 2 == 1 {
                let revenue = if d < 7 { 0.0 } else { 300.0 };
                Row::new(d, 1000.0, 10.0, 100.0, revenue).country("DE")
            } else {
                Row::new(d, 1000.0, 10.0, 100.0, 300.0)
            }
        })
        .collect();
    let run = pipeline().run_records(utils::to_records(&rows));

    assert!(run
        .hypotheses
        .iter()
        .all(|h| h.hypothesis.segment.as_ref().map(|s| s.value.as_str()) != Some("DE")));
    assert_eq!(run.hypotheses.len(), 1);
    assert_eq!(
        run.hypotheses[0].hypothesis.kind,
        HypothesisKind::NoSignificantChange
    );
}

#[test]
fn test_one_window_segment_skipped() {
    // FR only appears in the recent window, with a terrible ROAS
    let rows: Vec<Row> = (0..14)
        .map(|d| {
            if d >= 10 {
                Row::new(d, 1000.0, 10.0, 100.0, 10.0).country("FR")
            } else {
                Row::new(d, 1000.0, 10.0, 100.0, 300.0)
            }
        })
        .collect();
    let run = pipeline().run_records(utils::to_records(&rows));

    assert!(run.hypotheses.iter().all(|h| {
        h.hypothesis
            .segment
            .as_ref()
            .map_or(true, |s| s.value != "FR")
    }));
    // the global ROAS decline is still reported
    assert!(run
        .hypotheses
        .iter()
        .any(|h| h.hypothesis.kind == HypothesisKind::Global && h.hypothesis.metric_name() == "roas"));
}

#[test]
fn test_segment_roas_drop_reported_after_globals() {
    let rows: Vec<Row> = (0..14)
        .map(|d| {
            let row = Row::new(d, 1000.0, 10.0, 100.0, 300.0);
            if d % 2 == 0 {
                row.platform("Instagram")
            } else if d >= 7 {
                Row::new(d, 1000.0, 10.0, 100.0, 90.0)
            } else {
                row
            }
        })
        .collect();
    let run = pipeline().run_records(utils::to_records(&rows));

    let kinds: Vec<HypothesisKind> = run.hypotheses.iter().map(|h| h.hypothesis.kind).collect();
    let first_segment = kinds.iter().position(|k| *k == HypothesisKind::Segment).unwrap();
    assert!(kinds[..first_segment].iter().all(|k| *k == HypothesisKind::Global));
    assert!(kinds[first_segment..].iter().all(|k| *k == HypothesisKind::Segment));

    let facebook = run
        .hypotheses
        .iter()
        .find(|h| {
            h.hypothesis.segment.as_ref().map(|s| (s.dimension, s.value.as_str()))
                == Some((SegmentDimension::Platform, "Facebook"))
        })
        .unwrap();
    assert_eq!(facebook.hypothesis.title, "ROAS Drop in platform=Facebook");
    assert!((facebook.hypothesis.delta_pct().unwrap() + 70.0).abs() < 1e-9);
    assert_eq!(facebook.severity, Severity::Critical);
}

#[test]
fn test_min_confidence_filters_silently() {
    let mut config = InsightConfig::default();
    config.scoring.min_confidence = 0.6;
    let run = InsightPipeline::new(config)
        .unwrap()
        .run_records(utils::to_records(&utils::stable_rows(14)));

    assert!(run.hypotheses.is_empty());
    assert_eq!(run.records.len(), 14);
}

#[test]
fn test_schema_error_lists_every_column() {
    let csv = "date,campaign_name,country,platform,audience_type,creative_type,impressions,spend\n\
               2025-01-01,A,US,Facebook,Broad,Image,1000,10\n";
    let table = ingest::read_csv_from(csv.as_bytes()).unwrap();

    match pipeline().run_table(&table) {
        Err(InsightError::Schema(err)) => {
            assert!(err.violations.contains(&ColumnViolation::Missing {
                column: "clicks".to_string()
            }));
            assert!(err.violations.contains(&ColumnViolation::Missing {
                column: "revenue".to_string()
            }));
            let message = err.to_string();
            assert!(message.contains("clicks"));
            assert!(message.contains("revenue"));
        }
        other => panic!("Expected schema error, got {:?}", other.map(|r| r.hypotheses)),
    }
}

#[test]
fn test_empty_csv_is_schema_error() {
    let table = ingest::read_csv_from(format!("{}\n", utils::HEADER).as_bytes()).unwrap();
    assert!(matches!(
        pipeline().run_table(&table),
        Err(InsightError::Schema(_))
    ));
}

#[test]
fn test_report_artifacts_from_run() {
    let dir = tempfile::TempDir::new().unwrap();
    let run = pipeline().run_records(utils::to_records(&utils::ctr_drop_rows()));
    let report = InsightReport::from_run(&run);
    report.write_artifacts(dir.path()).unwrap();

    let json = std::fs::read_to_string(dir.path().join("insights.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["data_summary"]["rows"], 14);
    assert_eq!(value["data_summary"]["top_campaigns"][0]["campaign"], "Women Comfort");
    assert_eq!(value["hypotheses"][0]["confidence"], 0.95);
    assert!(dir.path().join("report.md").exists());
}
