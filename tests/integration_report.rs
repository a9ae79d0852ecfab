//! End-to-end tests through the public API: config file, device logs,
//! report generation and written outputs.

use polars::prelude::*;
use std::fs;
use tempfile::TempDir;
use testlog_dashboard::aggregator::MetricValue;
use testlog_dashboard::report::{CellValue, RankTier};
use testlog_dashboard::{ReportConfig, ReportError, ReportProcessor, generate_report};

const HEADER: &str = "Total_Result,index1,Index1_Limit,index2,Index2_Limit,RPM,RPM_Low,Intelligent_Control,Section,Model_Name,Barcode";

fn write_config(temp_dir: &TempDir) -> std::path::PathBuf {
    let source = temp_dir.path().join("logs");
    let output = temp_dir.path().join("reports");
    fs::create_dir_all(&source).unwrap();

    let config_path = temp_dir.path().join("config.ini");
    fs::write(
        &config_path,
        format!(
            "; line assignments\n[Path]\nSource_Folder = {}\nOutput_Folder = {}\n\n[Device_Mapping]\n192.168.1.10 = Line_A, Station_1\n192.168.1.11 = Line_A, Station_2\n192.168.1.20 = Line_B, Station_1\n",
            source.display(),
            output.display()
        ),
    )
    .unwrap();
    config_path
}

#[tokio::test]
async fn test_full_day_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir);
    let config = ReportConfig::load(&config_path).unwrap();
    let source = config.source_folder.clone();
    let output = config.output_folder.clone();

    fs::write(
        source.join("20260208_192_168_1_10.txt"),
        format!("{HEADER}\nOK,1,5,1,5,1500,1000,,,M1,A\nNG,9,5,1,5,1500,1000,,,M1,B\nNG,1,5,1,5,0,1000,,,M2,C\n"),
    )
    .unwrap();
    fs::write(
        source.join("20260208_192_168_1_11.txt"),
        format!("{HEADER}\nOK,1,5,1,5,1500,1000,,,M1,D\nNG,1,5,1,5,1500,1000,,,M1,\n"),
    )
    .unwrap();
    fs::write(
        source.join("20260208_192_168_1_20.txt"),
        format!("{HEADER}\nOK,1,5,1,5,1500,1000,,,M3,E\n"),
    )
    .unwrap();

    let mut processor = ReportProcessor::new(config, "20260208").unwrap().quiet();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.total_rows, 6);
    assert_eq!(stats.lines, 2);
    assert_eq!(stats.stations, 3);

    let html = fs::read_to_string(output.join("Summary_Dashboard_20260208.html")).unwrap();
    let line_a = html.find("Line_A").unwrap();
    let line_b = html.find("Line_B").unwrap();
    assert!(line_a < line_b);
    assert!(html.contains("M1, M2"));

    // The merged raw export feeds the same report back
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(output.join("Daily_Summary_20260208.csv")))
        .unwrap()
        .finish()
        .unwrap();
    let report = generate_report(&raw, "20260208").unwrap();
    let line_a = &report.dashboard.blocks[0];
    assert_eq!(line_a.line, "Line_A");

    let only_idx1 = line_a.metric_cells("Only Index1 Fail").unwrap();
    assert_eq!(only_idx1[1].value, CellValue::Metric(MetricValue::Sum(1)));
    assert_eq!(only_idx1[2].value, CellValue::Metric(MetricValue::Sum(1)));
    let noise = line_a.metric_cells("Noise").unwrap();
    assert!(matches!(noise[1].value, CellValue::Metric(MetricValue::Sum(n)) if n > 0));
}

#[tokio::test]
async fn test_capitalized_index_headers_are_classified() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir);
    let config = ReportConfig::load(&config_path).unwrap();
    let source = config.source_folder.clone();
    let output = config.output_folder.clone();

    fs::write(
        source.join("20260208_192_168_1_10.txt"),
        "Total_Result,Index1,Index1_Limit,Index2,Index2_Limit,RPM,RPM_Low,Barcode\nNG,9,5,9,5,1500,2000,A\n",
    )
    .unwrap();

    let mut processor = ReportProcessor::new(config, "20260208").unwrap().quiet();
    processor.process().await.unwrap();

    let html = fs::read_to_string(output.join("Summary_Dashboard_20260208.html")).unwrap();
    let both_row = html
        .lines()
        .find(|line| line.contains("Index 1 &amp; 2 both"))
        .unwrap();
    assert!(both_row.contains(">1</td>"));
}

#[tokio::test]
async fn test_missing_source_folder_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir);
    let config = ReportConfig::load(&config_path).unwrap();
    fs::remove_dir_all(&config.source_folder).unwrap();

    let mut processor = ReportProcessor::new(config, "20260208").unwrap().quiet();
    assert!(matches!(
        processor.process().await,
        Err(ReportError::SourceNotFound { .. })
    ));
}

#[test]
fn test_rank_highlights_follow_values() {
    // Fail counts per station: S1 = 2, S2 = 0, S3 = 1
    let dataset = df!(
        "Total_Result" => ["NG", "NG", "OK", "OK", "NG"],
        "Line_Name" => ["L1", "L1", "L1", "L1", "L1"],
        "Device_ID" => ["S1", "S1", "S2", "S3", "S3"],
        "Barcode" => ["A", "B", "C", "D", "E"],
    )
    .unwrap();

    let report = generate_report(&dataset, "20260208").unwrap();
    let block = &report.dashboard.blocks[0];
    assert_eq!(block.stations, vec!["S1", "S2", "S3"]);

    let cells = block.metric_cells("Fail Count").unwrap();
    let ranks: Vec<Option<RankTier>> = cells.iter().map(|c| c.rank).collect();
    assert_eq!(
        ranks,
        vec![None, None, Some(RankTier::First), None, Some(RankTier::Second)]
    );
    assert_eq!(cells[1].value, CellValue::Metric(MetricValue::Sum(3)));

    // Unranked rows never carry highlights
    let total = block.metric_cells("Total Count").unwrap();
    assert!(total.iter().all(|c| c.rank.is_none()));
}
