//! Main processing engine for one production date.
//!
//! Orchestrates the daily report workflow using specialized modules for
//! file discovery, log reading and report writing, with the report engine
//! in between.

pub mod discovery;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{
    discovery::{FileDiscovery, LogFile},
    reader::{LogReader, merge_frames},
    writer::ReportWriter,
};

use crate::config::ReportConfig;
use crate::constants::DATE_FORMAT;
use crate::error::{ReportError, Result};
use crate::models::ProcessingStats;
use crate::report::generate_report;

use chrono::{Local, NaiveDate};
use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

/// Validate a `YYYYMMDD` date label
pub fn parse_target_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ReportError::InvalidDate {
        value: value.to_string(),
    })
}

/// Yesterday in local time, formatted as `YYYYMMDD`
pub fn default_target_date() -> String {
    let today = Local::now().date_naive();
    today
        .pred_opt()
        .unwrap_or(today)
        .format(DATE_FORMAT)
        .to_string()
}

/// Main processor for one day's test logs
#[derive(Debug)]
pub struct ReportProcessor {
    target_date: String,
    config: ReportConfig,
    file_discovery: FileDiscovery,
    log_reader: Arc<LogReader>,
    report_writer: ReportWriter,
    show_progress: bool,
}

impl ReportProcessor {
    /// Create a new processor for a target date
    pub fn new(config: ReportConfig, target_date: &str) -> Result<Self> {
        parse_target_date(target_date)?;

        Ok(Self {
            target_date: target_date.to_string(),
            file_discovery: FileDiscovery::new(config.source_folder.clone(), target_date)?,
            log_reader: Arc::new(LogReader::new(target_date, config.devices.clone())),
            report_writer: ReportWriter::new(config.output_folder.clone()),
            config,
            show_progress: true,
        })
    }

    /// Disable the terminal progress bar and summary
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Main processing entry point
    pub async fn process(&mut self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        info!("Starting aggregation for date: {}", self.target_date);
        if self.show_progress {
            println!(
                "{}",
                "Starting daily test-log report".bright_green().bold()
            );
            println!("  {} {}", "Date:".bright_cyan(), self.target_date);
            println!(
                "  {} {}",
                "Source:".bright_cyan(),
                self.config.source_folder.display()
            );
        }

        // Step 1: Discover log files for the date
        let files = self.file_discovery.discover_log_files()?;
        let mut stats = ProcessingStats {
            files_found: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            warn!(
                "No files found for date {} in {}",
                self.target_date,
                self.config.source_folder.display()
            );
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        // Step 2: Read files concurrently, keeping discovery order
        let frames = self.read_files(&files, &mut stats).await;
        if frames.is_empty() {
            warn!("No data was successfully read. Output file not created.");
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        // Step 3: Merge and generate the report
        let merged = merge_frames(frames)?;
        stats.total_rows = merged.height();
        let report = generate_report(&merged, &self.target_date)?;
        stats.lines = report.dashboard.blocks.len();
        stats.stations = report.station_count();

        // Step 4: Persist
        stats.output_paths = self.report_writer.write(&report)?;
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Successfully aggregated {} files into {} rows",
            stats.files_processed, stats.total_rows
        );
        if self.show_progress {
            self.print_summary(&stats);
        }

        Ok(stats)
    }

    async fn read_files(&self, files: &[LogFile], stats: &mut ProcessingStats) -> Vec<DataFrame> {
        let pb = if self.show_progress {
            ProgressBar::new(files.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Reading logs");

        let concurrency = self.config.workers.max(1);
        debug!("Reading {} files with concurrency {}", files.len(), concurrency);

        let results = stream::iter(files.iter().cloned())
            .map(|file| {
                let reader = Arc::clone(&self.log_reader);
                let pb = pb.clone();
                async move {
                    let path = file.path.clone();
                    let result = task::spawn_blocking(move || reader.read(&file))
                        .await
                        .unwrap_or_else(|e| {
                            Err(ReportError::ReadFailed {
                                path: path.clone(),
                                reason: format!("Reader task failed: {}", e),
                            })
                        });
                    pb.inc(1);
                    (path, result)
                }
            })
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await;

        pb.finish_with_message("Logs read");

        let mut frames = Vec::with_capacity(results.len());
        for (path, result) in results {
            match result {
                Ok(df) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    info!("Processed: {} ({} rows)", name, df.height());
                    stats.files_processed += 1;
                    frames.push(df);
                }
                Err(e) => {
                    error!("Failed to read {}: {}", path.display(), e);
                    stats.files_failed += 1;
                }
            }
        }
        frames
    }

    fn print_summary(&self, stats: &ProcessingStats) {
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Files processed:".bright_cyan(),
            stats.files_processed.to_string().bright_white()
        );
        if stats.files_failed > 0 {
            println!(
                "  {} {}",
                "Files failed:".bright_red(),
                stats.files_failed.to_string().bright_red().bold()
            );
        }
        println!(
            "  {} {}",
            "Total rows:".bright_cyan(),
            stats.total_rows.to_string().bright_white().bold()
        );
        println!(
            "  {} {} lines, {} stations",
            "Dashboard:".bright_cyan(),
            stats.lines,
            stats.stations
        );
        for path in &stats.output_paths {
            println!("  {} {}", "Wrote".bright_green(), path.display());
        }
    }
}
