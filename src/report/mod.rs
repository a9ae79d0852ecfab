//! Report generation from a merged test-log dataset.
//!
//! [`generate_report`] is the whole engine: extract and classify records,
//! aggregate them per line and station, lay out the dashboard grid, then
//! overlay rank highlights. It performs no I/O; persistence belongs to
//! [`crate::processor::writer`].
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use testlog_dashboard::report::generate_report;
//!
//! # fn example() -> testlog_dashboard::Result<()> {
//! let dataset = df!(
//!     "Total_Result" => ["OK", "NG"],
//!     "Line_Name" => ["L1", "L1"],
//!     "Device_ID" => ["S1", "S2"],
//! )?;
//!
//! let report = generate_report(&dataset, "20260208")?;
//! assert_eq!(report.raw_sheet.name, "20260208");
//! assert_eq!(report.dashboard.blocks.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod html;
pub mod rank;
pub mod style;

pub use builder::{Cell, CellValue, DashboardSheet, GridRow, LineBlock, ReportBuilder};
pub use rank::{RankHighlighter, rank_tiers};
pub use style::{CellStyle, RankTier, RowTier, StyleTable};

use crate::aggregator::aggregate;
use crate::classifier::classify_all;
use crate::dataset::{CoercionStats, extract_records};
use crate::error::Result;
use polars::prelude::DataFrame;
use tracing::{debug, info};

/// The input table, unmodified, named by the target date
#[derive(Debug, Clone)]
pub struct RawSheet {
    pub name: String,
    pub data: DataFrame,
}

/// Complete report: raw data plus the styled dashboard
#[derive(Debug, Clone)]
pub struct Report {
    pub raw_sheet: RawSheet,
    pub dashboard: DashboardSheet,
    pub coercion: CoercionStats,
}

impl Report {
    /// Number of test records in the report
    pub fn record_count(&self) -> usize {
        self.raw_sheet.data.height()
    }

    /// Number of distinct stations across all lines
    pub fn station_count(&self) -> usize {
        self.dashboard
            .blocks
            .iter()
            .map(|block| block.stations.len())
            .sum()
    }
}

/// Generate a report with the default style table
pub fn generate_report(dataset: &DataFrame, date_label: &str) -> Result<Report> {
    generate_report_with(dataset, date_label, &StyleTable::default())
}

/// Generate a report with an explicit style table
pub fn generate_report_with(
    dataset: &DataFrame,
    date_label: &str,
    styles: &StyleTable,
) -> Result<Report> {
    let (records, coercion) = extract_records(dataset)?;
    debug!("Extracted {} records for {}", records.len(), date_label);

    let classified = classify_all(records);
    let tables = aggregate(&classified);

    let mut dashboard = ReportBuilder::new(styles).build(&tables);
    let highlighter = RankHighlighter::new(styles);
    for block in &mut dashboard.blocks {
        highlighter.apply(block);
    }

    info!(
        "Report for {}: {} records, {} lines",
        date_label,
        classified.len(),
        dashboard.blocks.len()
    );

    Ok(Report {
        raw_sheet: RawSheet {
            name: date_label.to_string(),
            data: dataset.clone(),
        },
        dashboard,
        coercion,
    })
}
