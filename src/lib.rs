//! Daily test-log dashboard library
//!
//! Merges one day of per-device manufacturing test logs and renders a
//! per-line, per-station fail-cause dashboard.
//!
//! This library provides tools for:
//! - Discovering and reading `<YYYYMMDD>_<ip>.txt` device logs
//! - Mapping devices to production lines and stations
//! - Classifying each test record into fail causes
//! - Aggregating counts, sums and rates per station and per line
//! - Laying out the dashboard grid with group styles and rank highlights
//! - Writing the merged raw data and the dashboard document

pub mod aggregator;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod processor;
pub mod report;

pub use config::{DeviceMap, ReportConfig};
pub use error::{ReportError, Result};
pub use models::{Classification, ProcessingStats, TestRecord};
pub use processor::{ReportProcessor, default_target_date, parse_target_date};
pub use report::{Report, generate_report};
