use anyhow::Result;
use campaign_insight::{
    cli::{Cli, Command, OutputFormat},
    config::InsightConfig,
    ingest,
    pipeline::InsightPipeline,
    report::InsightReport,
};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn analyze(
    csv: &Path,
    config: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let config = match config {
        Some(path) => InsightConfig::from_toml(path)?,
        None => InsightConfig::embedded_default()?,
    };

    let table = ingest::read_csv(csv)?;
    let run = InsightPipeline::new(config)?.run_table(&table)?;
    let report = InsightReport::from_run(&run);

    if let Some(dir) = output {
        report.write_artifacts(dir)?;
    }

    match format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::Analyze {
            csv,
            config,
            output,
            format,
        } => analyze(&csv, config.as_deref(), output.as_deref(), format),
    }
}
