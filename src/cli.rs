//! CLI argument parsing for campaign-insight

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the terminal summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON insights document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "campaign-insight")]
#[command(version)]
#[command(about = "Windowed campaign performance insights from CSV exports", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a campaign CSV export and report hypotheses
    Analyze {
        /// Campaign CSV file
        csv: PathBuf,

        /// TOML configuration (defaults to the embedded insight-default.toml)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory for insights.json and report.md
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
}
