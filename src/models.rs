//! Core data structures for test-log processing.
//!
//! Defines the typed test record extracted from the merged dataset, the
//! derived fail-cause classification, device assignments and the
//! processing statistics reported by the pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One test event from a device log, with defaults already applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub line_name: String,
    pub device_id: String,
    pub total_result: String,
    pub index1: f64,
    pub index1_limit: f64,
    pub index2: f64,
    pub index2_limit: f64,
    pub rpm: f64,
    pub rpm_low: f64,
    pub intelligent_control: String,
    pub section: String,
    pub model_name: String,
    /// `None` when the column is absent or the cell is null
    pub barcode: Option<String>,
    pub source_ip: String,
    pub log_date: String,
}

/// Derived fail-cause indicators for a single record
///
/// Most fields are 0/1. `noise` and `out_control` are sums of indicators
/// and may reach 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_fail: u32,
    pub noise: u32,
    pub only_idx1: u32,
    pub only_idx2: u32,
    pub both_idx: u32,
    pub spec_fail: u32,
    pub out_control: u32,
    pub no_rotate: u32,
    pub rpm_ng: u32,
    pub pause: u32,
    pub no_barcode: u32,
    pub others: u32,
}

/// Derived field selectable by a metric definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedField {
    IsFail,
    Noise,
    OnlyIdx1,
    OnlyIdx2,
    BothIdx,
    SpecFail,
    OutControl,
    NoRotate,
    RpmNg,
    Pause,
    NoBarcode,
    Others,
}

impl DerivedField {
    /// Column name used for this field in exports and logs
    pub fn column_name(&self) -> &'static str {
        match self {
            DerivedField::IsFail => "is_fail",
            DerivedField::Noise => "calc_noise",
            DerivedField::OnlyIdx1 => "calc_only_idx1",
            DerivedField::OnlyIdx2 => "calc_only_idx2",
            DerivedField::BothIdx => "calc_both_idx",
            DerivedField::SpecFail => "calc_spec_fail",
            DerivedField::OutControl => "calc_out_control",
            DerivedField::NoRotate => "calc_no_rotate",
            DerivedField::RpmNg => "calc_rpm_ng",
            DerivedField::Pause => "calc_pause",
            DerivedField::NoBarcode => "calc_no_barcode",
            DerivedField::Others => "calc_others",
        }
    }
}

impl Classification {
    /// Value of one derived field
    pub fn get(&self, field: DerivedField) -> u32 {
        match field {
            DerivedField::IsFail => self.is_fail,
            DerivedField::Noise => self.noise,
            DerivedField::OnlyIdx1 => self.only_idx1,
            DerivedField::OnlyIdx2 => self.only_idx2,
            DerivedField::BothIdx => self.both_idx,
            DerivedField::SpecFail => self.spec_fail,
            DerivedField::OutControl => self.out_control,
            DerivedField::NoRotate => self.no_rotate,
            DerivedField::RpmNg => self.rpm_ng,
            DerivedField::Pause => self.pause,
            DerivedField::NoBarcode => self.no_barcode,
            DerivedField::Others => self.others,
        }
    }
}

/// A record paired with its classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub record: TestRecord,
    pub class: Classification,
}

/// Line and station a device log is attributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAssignment {
    pub line: String,
    pub station: String,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_found: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub lines: usize,
    pub stations: usize,
    pub output_paths: Vec<PathBuf>,
    pub processing_time_ms: u128,
}
