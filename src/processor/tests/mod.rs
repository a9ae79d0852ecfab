//! Integration tests for the processor module
//!
//! Tests the complete daily pipeline against temporary log folders.

pub mod basic_processing;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{DeviceMap, ReportConfig};

/// Log content for a station with one pass and one RPM failure
pub const STATION_LOG: &str = "Total_Result,index1,Index1_Limit,index2,Index2_Limit,RPM,RPM_Low,Intelligent_Control,Section,Model_Name,Barcode
OK,1,5,1,5,1500,1000,,,Model_X,B001
NG,1,5,1,5,0,1000,,,Model_X,B002
";

/// Helper to create source and output folders with a config pointing at them
pub fn create_workspace(temp_dir: &TempDir) -> (PathBuf, ReportConfig) {
    let source = temp_dir.path().join("logs");
    let output = temp_dir.path().join("reports");
    fs::create_dir_all(&source).unwrap();

    let mut devices = DeviceMap::new();
    devices.insert("192.168.1.10", "Line_A", "Station_1");
    devices.insert("192.168.1.11", "Line_A", "Station_2");

    let config = ReportConfig::default()
        .with_source_folder(source.clone())
        .with_output_folder(output)
        .with_workers(2)
        .with_devices(devices);

    (source, config)
}

pub fn write_log(source: &Path, name: &str, content: &str) {
    fs::write(source.join(name), content).unwrap();
}
