//! Basic processing integration tests

use super::{STATION_LOG, create_workspace, write_log};
use crate::processor::ReportProcessor;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_basic_processing_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let (source, config) = create_workspace(&temp_dir);
    write_log(&source, "20260208_192_168_1_10.txt", STATION_LOG);
    write_log(&source, "20260208_192_168_1_11.txt", STATION_LOG);
    // Other dates are not picked up
    write_log(&source, "20260207_192_168_1_10.txt", STATION_LOG);

    let output = config.output_folder.clone();
    let mut processor = ReportProcessor::new(config, "20260208").unwrap().quiet();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_found, 2);
    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.total_rows, 4);
    assert_eq!(stats.lines, 1);
    assert_eq!(stats.stations, 2);
    assert_eq!(
        stats.output_paths,
        vec![
            output.join("Daily_Summary_20260208.csv"),
            output.join("Summary_Dashboard_20260208.html"),
        ]
    );
    assert!(stats.output_paths.iter().all(|p| p.exists()));
}

#[tokio::test]
async fn test_raw_output_carries_device_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let (source, config) = create_workspace(&temp_dir);
    write_log(&source, "20260208_192_168_1_10.txt", STATION_LOG);
    write_log(&source, "20260208_10_0_0_99.txt", STATION_LOG);

    let output = config.output_folder.clone();
    let mut processor = ReportProcessor::new(config, "20260208").unwrap().quiet();
    let stats = processor.process().await.unwrap();
    assert_eq!(stats.lines, 2);

    let csv = fs::read_to_string(output.join("Daily_Summary_20260208.csv")).unwrap();
    let header = csv.lines().next().unwrap();
    for column in ["Line_Name", "Device_ID", "Source_IP", "Log_Date"] {
        assert!(header.contains(column), "missing {column} in {header}");
    }
    assert!(csv.contains("Line_A,Station_1,192.168.1.10,20260208"));
    assert!(csv.contains("Unknown_Line,Unknown_10_0_0_99,10.0.0.99,20260208"));
}

#[tokio::test]
async fn test_dashboard_contents() {
    let temp_dir = TempDir::new().unwrap();
    let (source, config) = create_workspace(&temp_dir);
    write_log(&source, "20260208_192_168_1_10.txt", STATION_LOG);

    let output = config.output_folder.clone();
    let mut processor = ReportProcessor::new(config, "20260208").unwrap().quiet();
    processor.process().await.unwrap();

    let html = fs::read_to_string(output.join("Summary_Dashboard_20260208.html")).unwrap();
    assert!(html.contains("Line_A"));
    assert!(html.contains("Station_1"));
    assert!(html.contains("No rotate"));
    assert!(html.contains("50.00%"));
}

#[tokio::test]
async fn test_no_files_for_date() {
    let temp_dir = TempDir::new().unwrap();
    let (source, config) = create_workspace(&temp_dir);
    write_log(&source, "20260207_192_168_1_10.txt", STATION_LOG);

    let output = config.output_folder.clone();
    let mut processor = ReportProcessor::new(config, "20260208").unwrap().quiet();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_found, 0);
    assert_eq!(stats.files_processed, 0);
    assert!(stats.output_paths.is_empty());
    assert!(!output.join("Summary_Dashboard_20260208.html").exists());
}

#[tokio::test]
async fn test_reprocessing_overwrites_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let (source, config) = create_workspace(&temp_dir);
    write_log(&source, "20260208_192_168_1_10.txt", STATION_LOG);

    let mut first = ReportProcessor::new(config.clone(), "20260208")
        .unwrap()
        .quiet();
    let paths = first.process().await.unwrap().output_paths;
    let before: Vec<Vec<u8>> = paths.iter().map(|p| fs::read(p).unwrap()).collect();

    let mut second = ReportProcessor::new(config, "20260208").unwrap().quiet();
    second.process().await.unwrap();
    let after: Vec<Vec<u8>> = paths.iter().map(|p| fs::read(p).unwrap()).collect();

    assert_eq!(before, after);
}
