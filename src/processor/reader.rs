//! Log file reading and merging
//!
//! Reads each device log into a string-typed frame, stamps it with the
//! device's line, station, IP and date, and merges all frames into the
//! single dataset consumed by the report engine.

use super::discovery::LogFile;
use crate::config::DeviceMap;
use crate::constants::columns;
use crate::error::{ReportError, Result};
use polars::prelude::*;
use tracing::debug;

/// Reader for device log files of one production date
#[derive(Debug, Clone)]
pub struct LogReader {
    target_date: String,
    devices: DeviceMap,
}

impl LogReader {
    /// Create a new log reader
    pub fn new(target_date: &str, devices: DeviceMap) -> Self {
        Self {
            target_date: target_date.to_string(),
            devices,
        }
    }

    /// Read one log file and attach its device metadata
    ///
    /// Every column is read as text; invalid UTF-8 is replaced and ragged
    /// rows are truncated rather than rejected.
    pub fn read(&self, file: &LogFile) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .map_parse_options(|opts| {
                opts.with_encoding(CsvEncoding::LossyUtf8)
                    .with_truncate_ragged_lines(true)
            })
            .try_into_reader_with_file_path(Some(file.path.clone()))
            .and_then(|reader| reader.finish())
            .map_err(|e| ReportError::ReadFailed {
                path: file.path.clone(),
                reason: e.to_string(),
            })?;

        let assignment = self.devices.resolve(&file.ip_key);
        let source_ip = file.ip_key.replace('_', ".");

        let enhanced = df
            .lazy()
            .with_columns([
                lit(assignment.line.clone()).alias(columns::LINE_NAME),
                lit(assignment.station.clone()).alias(columns::DEVICE_ID),
                lit(source_ip).alias(columns::SOURCE_IP),
                lit(self.target_date.clone()).alias(columns::LOG_DATE),
            ])
            .collect()?;

        debug!(
            "Read {} rows from {} ({} / {})",
            enhanced.height(),
            file.path.display(),
            assignment.line,
            assignment.station
        );

        Ok(enhanced)
    }
}

/// Merge per-file frames, taking the union of their columns
pub fn merge_frames(frames: Vec<DataFrame>) -> Result<DataFrame> {
    if frames.is_empty() {
        return Ok(DataFrame::empty());
    }
    let lazy: Vec<LazyFrame> = frames.into_iter().map(|df| df.lazy()).collect();
    let merged = concat_lf_diagonal(lazy, UnionArgs::default())?.collect()?;
    Ok(merged)
}
