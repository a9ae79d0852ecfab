//! Error handling for test-log report generation.
//!
//! Provides error types with context for configuration loading, file
//! ingestion, dataset validation and report persistence failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error(
        "Required column '{column}' missing from dataset: {records} records across {lines} lines not processed"
    )]
    MissingColumn {
        column: String,
        lines: usize,
        records: usize,
    },

    #[error("Source folder not found at path: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Invalid target date '{value}': expected YYYYMMDD")]
    InvalidDate { value: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to read log file: {path} - {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to write report: {path} - {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl ReportError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
