//! Command-line interface components.

use crate::config::ReportConfig;
use crate::constants::DEFAULT_CONFIG_PATH;
use crate::models::ProcessingStats;
use crate::processor::{ReportProcessor, default_target_date};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "testlog_dashboard")]
#[command(about = "Merge daily device test logs into a per-line fail-cause dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Production date to report on (YYYYMMDD, defaults to yesterday)
    #[arg(short, long, value_name = "YYYYMMDD")]
    pub date: Option<String>,

    /// Path to the INI configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the configured source folder
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Override the configured output folder
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Maximum number of log files read concurrently
    #[arg(long)]
    pub workers: Option<usize>,

    /// Enable verbose logging (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Target date, defaulting to yesterday
    pub fn target_date(&self) -> String {
        self.date.clone().unwrap_or_else(default_target_date)
    }

    /// Load the config file and apply command-line overrides
    pub fn build_config(&self) -> Result<ReportConfig> {
        let mut config = ReportConfig::load(&self.config)
            .with_context(|| format!("Failed to load {}", self.config.display()))?;

        if let Some(source) = &self.source {
            config = config.with_source_folder(source.clone());
        }
        if let Some(output) = &self.output {
            config = config.with_output_folder(output.clone());
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        Ok(config)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("testlog_dashboard={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Run one report for the parsed arguments
pub async fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args)?;

    let config = args.build_config()?;
    let target_date = args.target_date();
    info!(
        "Generating report for {} from {}",
        target_date,
        config.source_folder.display()
    );

    let mut processor = ReportProcessor::new(config, &target_date)?;
    if args.quiet {
        processor = processor.quiet();
    }
    let stats = processor.process().await?;
    Ok(stats)
}
