//! Per-line, per-station metric aggregation.
//!
//! Groups classified records by line and station and reduces every group
//! with the metric table. The `Total` column is always reduced over the
//! whole line population, never derived from station values.

use crate::constants::JOIN_SEPARATOR;
use crate::metrics::{AggregationKind, METRICS, MetricDefinition, MetricSource};
use crate::models::ClassifiedRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Reduced value of one metric over one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MetricValue {
    Count(u64),
    Sum(u64),
    /// Percentage in `[0, 100]` for 0/1 fields; additive fields may exceed 100
    Rate(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric value used for ranking, `None` for text
    pub fn raw(&self) -> Option<f64> {
        match self {
            MetricValue::Count(n) | MetricValue::Sum(n) => Some(*n as f64),
            MetricValue::Rate(pct) => Some(*pct),
            MetricValue::Text(_) => None,
        }
    }

    /// Display form; rates carry two decimals and a percent sign
    pub fn display(&self) -> String {
        match self {
            MetricValue::Count(n) | MetricValue::Sum(n) => n.to_string(),
            MetricValue::Rate(pct) => format!("{:.2}%", pct),
            MetricValue::Text(text) => text.clone(),
        }
    }
}

/// One metric across the Total column and every station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: MetricDefinition,
    pub total: MetricValue,
    pub stations: Vec<MetricValue>,
}

/// Aggregated metrics for one production line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub line: String,
    /// Station names, sorted
    pub stations: Vec<String>,
    pub record_count: usize,
    pub rows: Vec<MetricRow>,
}

impl SummaryTable {
    /// Look up a row by its label
    pub fn row(&self, label: &str) -> Option<&MetricRow> {
        self.rows.iter().find(|row| row.metric.label == label)
    }
}

/// Aggregate records with the standard dashboard metrics
pub fn aggregate(records: &[ClassifiedRecord]) -> Vec<SummaryTable> {
    aggregate_with(records, METRICS)
}

/// Aggregate records with an explicit metric table
///
/// Returns one table per distinct line, lines sorted lexicographically.
pub fn aggregate_with(
    records: &[ClassifiedRecord],
    metrics: &[MetricDefinition],
) -> Vec<SummaryTable> {
    let mut lines: BTreeMap<&str, LineGroup<'_>> = BTreeMap::new();
    for record in records {
        let group = lines.entry(record.record.line_name.as_str()).or_default();
        group.all.push(record);
        group
            .stations
            .entry(record.record.device_id.as_str())
            .or_default()
            .push(record);
    }

    lines
        .into_iter()
        .map(|(line, group)| {
            debug!(
                "Aggregating line {}: {} records over {} stations",
                line,
                group.all.len(),
                group.stations.len()
            );
            summarize_line(line, &group, metrics)
        })
        .collect()
}

#[derive(Default)]
struct LineGroup<'a> {
    all: Vec<&'a ClassifiedRecord>,
    stations: BTreeMap<&'a str, Vec<&'a ClassifiedRecord>>,
}

fn summarize_line(line: &str, group: &LineGroup<'_>, metrics: &[MetricDefinition]) -> SummaryTable {
    let rows = metrics
        .iter()
        .map(|metric| {
            let total = reduce(metric, &group.all, Scope::Line);
            debug!(
                "{} / {} from {}: {}",
                line,
                metric.label,
                metric.source.map_or("records", |source| source.column_name()),
                total.display()
            );
            MetricRow {
                metric: *metric,
                total,
                stations: group
                    .stations
                    .values()
                    .map(|members| reduce(metric, members, Scope::Station))
                    .collect(),
            }
        })
        .collect();

    SummaryTable {
        line: line.to_string(),
        stations: group.stations.keys().map(|s| s.to_string()).collect(),
        record_count: group.all.len(),
        rows,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    Line,
    Station,
}

fn reduce(metric: &MetricDefinition, members: &[&ClassifiedRecord], scope: Scope) -> MetricValue {
    match metric.kind {
        AggregationKind::Count => MetricValue::Count(members.len() as u64),
        AggregationKind::Sum => MetricValue::Sum(sum_field(metric, members)),
        AggregationKind::Rate => {
            MetricValue::Rate(percentage(sum_field(metric, members), members.len()))
        }
        AggregationKind::StringJoin => {
            let distinct = distinct_text(metric, members);
            match scope {
                Scope::Line => MetricValue::Text(distinct.join(JOIN_SEPARATOR)),
                Scope::Station => MetricValue::Text(
                    distinct.first().map(|s| s.to_string()).unwrap_or_default(),
                ),
            }
        }
    }
}

fn sum_field(metric: &MetricDefinition, members: &[&ClassifiedRecord]) -> u64 {
    match metric.source {
        Some(MetricSource::Derived(field)) => members
            .iter()
            .map(|member| u64::from(member.class.get(field)))
            .sum(),
        _ => 0,
    }
}

/// `100 * numerator / denominator`, 0 for an empty group
pub fn percentage(numerator: u64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        (numerator as f64 / denominator as f64) * 100.0
    }
}

/// Distinct non-empty values in first-seen order
fn distinct_text<'a>(metric: &MetricDefinition, members: &[&'a ClassifiedRecord]) -> Vec<&'a str> {
    let mut seen: Vec<&'a str> = Vec::new();
    if metric.source != Some(MetricSource::ModelName) {
        return seen;
    }
    for member in members {
        let value = member.record.model_name.trim();
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_all;
    use crate::models::TestRecord;

    fn record(line: &str, station: &str, result: &str) -> TestRecord {
        TestRecord {
            line_name: line.to_string(),
            device_id: station.to_string(),
            total_result: result.to_string(),
            rpm: 1500.0,
            rpm_low: 2000.0,
            barcode: Some("BC".to_string()),
            ..Default::default()
        }
    }

    fn scenario_a() -> Vec<ClassifiedRecord> {
        let mut records = Vec::new();
        for _ in 0..10 {
            records.push(record("L1", "S1", "OK"));
        }
        for i in 0..10 {
            records.push(record("L1", "S2", if i < 2 { "NG" } else { "OK" }));
        }
        classify_all(records)
    }

    #[test]
    fn test_scenario_a_fail_count_and_rate() {
        let tables = aggregate(&scenario_a());
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.stations, vec!["S1", "S2"]);

        let fail_count = table.row("Fail Count").unwrap();
        assert_eq!(fail_count.total, MetricValue::Sum(2));
        assert_eq!(
            fail_count.stations,
            vec![MetricValue::Sum(0), MetricValue::Sum(2)]
        );

        let fail_rate = table.row("Fail Rate").unwrap();
        assert_eq!(fail_rate.total.display(), "10.00%");
        let station_rates: Vec<String> = fail_rate.stations.iter().map(|v| v.display()).collect();
        assert_eq!(station_rates, vec!["0.00%", "20.00%"]);
    }

    #[test]
    fn test_total_count_equals_station_sum() {
        let mut records = vec![
            record("L1", "S3", "OK"),
            record("L1", "S1", "NG"),
            record("L2", "S1", "OK"),
        ];
        records.extend((0..7).map(|_| record("L1", "S2", "OK")));
        let tables = aggregate(&classify_all(records));

        for table in &tables {
            let row = table.row("Total Count").unwrap();
            let station_sum: f64 = row.stations.iter().filter_map(MetricValue::raw).sum();
            assert_eq!(row.total.raw(), Some(station_sum));
            assert_eq!(row.total, MetricValue::Count(table.record_count as u64));
        }
    }

    #[test]
    fn test_lines_and_stations_sorted() {
        let records = vec![
            record("Line_B", "ST_2", "OK"),
            record("Line_A", "ST_9", "OK"),
            record("Line_B", "ST_1", "OK"),
            record("Unknown_Line", "Unknown_10_0_0_7", "NG"),
        ];
        let tables = aggregate(&classify_all(records));
        let lines: Vec<&str> = tables.iter().map(|t| t.line.as_str()).collect();
        assert_eq!(lines, vec!["Line_A", "Line_B", "Unknown_Line"]);
        assert_eq!(tables[1].stations, vec!["ST_1", "ST_2"]);
    }

    #[test]
    fn test_rate_total_uses_line_population() {
        // S1: 1 of 1 fails, S2: 0 of 3. Average of rates would be 50%.
        let records = vec![
            record("L1", "S1", "NG"),
            record("L1", "S2", "OK"),
            record("L1", "S2", "OK"),
            record("L1", "S2", "OK"),
        ];
        let tables = aggregate(&classify_all(records));
        let rate = tables[0].row("Fail Rate").unwrap();
        assert_eq!(rate.total.display(), "25.00%");
    }

    #[test]
    fn test_empty_group_rate_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(MetricValue::Rate(percentage(5, 0)).display(), "0.00%");
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_rates_within_bounds_for_binary_fields() {
        let mut records = vec![record("L1", "S1", "NG"), record("L1", "S1", "OK")];
        records[0].rpm = 0.0;
        records[1].barcode = None;
        let tables = aggregate(&classify_all(records));
        for label in ["Fail Rate", "RPM Fail Rate", "Other Fail Rate"] {
            let row = tables[0].row(label).unwrap();
            for value in std::iter::once(&row.total).chain(row.stations.iter()) {
                let pct = value.raw().unwrap();
                assert!((0.0..=100.0).contains(&pct), "{} = {}", label, pct);
            }
        }
    }

    #[test]
    fn test_noise_rate_can_exceed_hundred_percent() {
        // Spec fail and index fail on the same record are summed.
        let mut noisy = record("L1", "S1", "NG");
        noisy.intelligent_control = "OK".to_string();
        noisy.index1 = 10.0;
        noisy.index1_limit = 1.0;
        let tables = aggregate(&classify_all(vec![noisy]));
        let table = &tables[0];
        assert_eq!(table.row("Noise").unwrap().total, MetricValue::Sum(2));
        assert_eq!(table.row("Noise Rate").unwrap().total.display(), "200.00%");
    }

    #[test]
    fn test_out_control_sum_keeps_additive_value() {
        let mut fast = record("L1", "S1", "NG");
        fast.rpm = 15_000.0;
        let tables = aggregate(&classify_all(vec![fast]));
        let table = &tables[0];
        assert_eq!(table.row("Out of control").unwrap().total, MetricValue::Sum(2));
        assert_eq!(table.row("RPM NG").unwrap().total, MetricValue::Sum(1));
    }

    #[test]
    fn test_model_name_join_is_asymmetric() {
        let mut records = vec![
            record("L1", "S1", "OK"),
            record("L1", "S1", "OK"),
            record("L1", "S2", "OK"),
            record("L1", "S2", "OK"),
            record("L1", "S3", "OK"),
        ];
        records[0].model_name = "M-100".to_string();
        records[1].model_name = "M-200".to_string();
        records[2].model_name = "M-200".to_string();
        records[3].model_name = "M-300".to_string();

        let tables = aggregate(&classify_all(records));
        let row = tables[0].row("Model Name").unwrap();
        assert_eq!(row.total.display(), "M-100, M-200, M-300");
        assert_eq!(
            row.stations,
            vec![
                MetricValue::Text("M-100".to_string()),
                MetricValue::Text("M-200".to_string()),
                MetricValue::Text(String::new()),
            ]
        );
        assert_eq!(row.total.raw(), None);
    }

    #[test]
    fn test_others_counts_record_once() {
        let mut paused = record("L1", "S1", "NG");
        paused.barcode = None;
        paused.model_name = "Pause Or FreeRun".to_string();
        let tables = aggregate(&classify_all(vec![paused]));
        let table = &tables[0];
        assert_eq!(table.row("Others").unwrap().total, MetricValue::Sum(1));
        assert_eq!(table.row("PauseOrFreeRun").unwrap().total, MetricValue::Sum(1));
        assert_eq!(table.row("No Barcode").unwrap().total, MetricValue::Sum(1));
        assert_eq!(
            table.row("Other Fail Rate").unwrap().total.display(),
            "100.00%"
        );
    }
}
