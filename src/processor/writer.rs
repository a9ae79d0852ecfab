//! Report persistence
//!
//! Writes the raw sheet as `Daily_Summary_<date>.csv` and the dashboard as
//! `Summary_Dashboard_<date>.html` in the output folder.

use crate::constants::{DASHBOARD_OUTPUT_PREFIX, RAW_OUTPUT_PREFIX};
use crate::error::{ReportError, Result};
use crate::report::{Report, html};
use polars::prelude::{CsvWriter, SerWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writer for generated reports
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_folder: PathBuf,
}

impl ReportWriter {
    /// Create a new report writer
    pub fn new(output_folder: PathBuf) -> Self {
        Self { output_folder }
    }

    /// Path of the merged raw-data CSV for a date
    pub fn raw_path(&self, date_label: &str) -> PathBuf {
        self.output_folder
            .join(format!("{}_{}.csv", RAW_OUTPUT_PREFIX, date_label))
    }

    /// Path of the dashboard document for a date
    pub fn dashboard_path(&self, date_label: &str) -> PathBuf {
        self.output_folder
            .join(format!("{}_{}.html", DASHBOARD_OUTPUT_PREFIX, date_label))
    }

    /// Write both sheets, returning the paths written
    pub fn write(&self, report: &Report) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_folder)?;

        let date_label = &report.raw_sheet.name;
        let raw_path = self.raw_path(date_label);
        let dashboard_path = self.dashboard_path(date_label);

        self.write_raw_sheet(report, &raw_path)?;
        let document = html::render(report).map_err(|e| ReportError::WriteFailed {
            path: dashboard_path.clone(),
            reason: format!("Failed to render dashboard: {}", e),
        })?;
        fs::write(&dashboard_path, document).map_err(|e| ReportError::WriteFailed {
            path: dashboard_path.clone(),
            reason: e.to_string(),
        })?;
        debug!("Wrote dashboard to {}", dashboard_path.display());

        info!(
            "Report for {} written to {}",
            date_label,
            self.output_folder.display()
        );
        Ok(vec![raw_path, dashboard_path])
    }

    fn write_raw_sheet(&self, report: &Report, path: &Path) -> Result<()> {
        let mut file = fs::File::create(path)?;
        let mut data = report.raw_sheet.data.clone();

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut data)
            .map_err(|e| ReportError::WriteFailed {
                path: path.to_path_buf(),
                reason: format!("Failed to write raw sheet: {}", e),
            })?;

        debug!("Wrote {} raw rows to {}", data.height(), path.display());
        Ok(())
    }
}
