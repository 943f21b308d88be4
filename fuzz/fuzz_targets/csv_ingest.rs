#![no_main]

use campaign_insight::config::InsightConfig;
use campaign_insight::ingest;
use campaign_insight::pipeline::InsightPipeline;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary CSV bytes must be rejected cleanly or analyzed, never panic
    let Ok(table) = ingest::read_csv_from(data) else {
        return;
    };
    if let Ok(pipeline) = InsightPipeline::new(InsightConfig::default()) {
        let _ = pipeline.run_table(&table);
    }
});
