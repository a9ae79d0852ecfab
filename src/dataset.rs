//! Extraction of typed test records from the merged dataset.
//!
//! Validates that the required columns exist, then reads every row into a
//! [`TestRecord`], substituting 0 or an empty string for absent and
//! non-numeric values. Substitutions are counted, never fatal.

use crate::constants::columns;
use crate::error::{ReportError, Result};
use crate::models::TestRecord;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Counts of values replaced by defaults during extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoercionStats {
    /// Optional columns absent from the dataset
    pub missing_columns: Vec<String>,
    /// Numeric cells present but not parseable
    pub non_numeric_values: usize,
    /// Null cells replaced by a default
    pub null_values: usize,
}

impl CoercionStats {
    pub fn is_clean(&self) -> bool {
        self.missing_columns.is_empty() && self.non_numeric_values == 0 && self.null_values == 0
    }
}

/// Fail fast when a required column is absent
pub fn validate_schema(df: &DataFrame) -> Result<()> {
    for column in columns::REQUIRED {
        if !has_column(df, column) {
            let lines = match text_column(df, columns::LINE_NAME)? {
                Some(values) => values.iter().flatten().collect::<BTreeSet<_>>().len(),
                None => 0,
            };
            return Err(ReportError::MissingColumn {
                column: column.to_string(),
                lines,
                records: df.height(),
            });
        }
    }
    Ok(())
}

/// Read every row of the dataset into a test record
pub fn extract_records(df: &DataFrame) -> Result<(Vec<TestRecord>, CoercionStats)> {
    validate_schema(df)?;

    let mut stats = CoercionStats::default();
    let height = df.height();

    let line_name = text_or_default(df, columns::LINE_NAME, height, &mut stats)?;
    let device_id = text_or_default(df, columns::DEVICE_ID, height, &mut stats)?;
    let total_result = text_or_default(df, columns::TOTAL_RESULT, height, &mut stats)?;
    let intelligent_control =
        text_or_default(df, columns::INTELLIGENT_CONTROL, height, &mut stats)?;
    let section = text_or_default(df, columns::SECTION, height, &mut stats)?;
    let model_name = text_or_default(df, columns::MODEL_NAME, height, &mut stats)?;
    let source_ip = text_or_default(df, columns::SOURCE_IP, height, &mut stats)?;
    let log_date = text_or_default(df, columns::LOG_DATE, height, &mut stats)?;

    // Barcode keeps the null/absent distinction for the no-barcode rule.
    let barcode = match text_column(df, columns::BARCODE)? {
        Some(values) => values,
        None => {
            stats.missing_columns.push(columns::BARCODE.to_string());
            vec![None; height]
        }
    };

    let index1 = numeric_or_default(df, columns::INDEX1, height, &mut stats)?;
    let index1_limit = numeric_or_default(df, columns::INDEX1_LIMIT, height, &mut stats)?;
    let index2 = numeric_or_default(df, columns::INDEX2, height, &mut stats)?;
    let index2_limit = numeric_or_default(df, columns::INDEX2_LIMIT, height, &mut stats)?;
    let rpm = numeric_or_default(df, columns::RPM, height, &mut stats)?;
    let rpm_low = numeric_or_default(df, columns::RPM_LOW, height, &mut stats)?;

    let mut records = Vec::with_capacity(height);
    for i in 0..height {
        records.push(TestRecord {
            line_name: line_name[i].clone(),
            device_id: device_id[i].clone(),
            total_result: total_result[i].clone(),
            index1: index1[i],
            index1_limit: index1_limit[i],
            index2: index2[i],
            index2_limit: index2_limit[i],
            rpm: rpm[i],
            rpm_low: rpm_low[i],
            intelligent_control: intelligent_control[i].clone(),
            section: section[i].clone(),
            model_name: model_name[i].clone(),
            barcode: barcode[i].clone(),
            source_ip: source_ip[i].clone(),
            log_date: log_date[i].clone(),
        });
    }

    if !stats.is_clean() {
        debug!(
            "Defaults substituted: missing columns {:?}, {} non-numeric values, {} nulls",
            stats.missing_columns, stats.non_numeric_values, stats.null_values
        );
    }

    Ok((records, stats))
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    resolve_column(df, name).is_some()
}

/// Actual column name for `name`: an exact match first, otherwise the first
/// column equal to it ignoring ASCII case
fn resolve_column(df: &DataFrame, name: &str) -> Option<String> {
    let names = df.get_column_names();
    names
        .iter()
        .find(|column| column.as_str() == name)
        .or_else(|| {
            names
                .iter()
                .find(|column| column.as_str().eq_ignore_ascii_case(name))
        })
        .map(|column| column.to_string())
}

/// Column values as strings, `None` if the column is absent
fn text_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>> {
    let Some(actual) = resolve_column(df, name) else {
        return Ok(None);
    };
    let column = df.column(&actual)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(Some(values))
}

fn text_or_default(
    df: &DataFrame,
    name: &str,
    height: usize,
    stats: &mut CoercionStats,
) -> Result<Vec<String>> {
    match text_column(df, name)? {
        Some(values) => Ok(values
            .into_iter()
            .map(|value| {
                value.unwrap_or_else(|| {
                    stats.null_values += 1;
                    String::new()
                })
            })
            .collect()),
        None => {
            stats.missing_columns.push(name.to_string());
            Ok(vec![String::new(); height])
        }
    }
}

fn numeric_or_default(
    df: &DataFrame,
    name: &str,
    height: usize,
    stats: &mut CoercionStats,
) -> Result<Vec<f64>> {
    match text_column(df, name)? {
        Some(values) => Ok(values
            .iter()
            .map(|value| match value {
                Some(text) => parse_numeric(text).unwrap_or_else(|| {
                    stats.non_numeric_values += 1;
                    0.0
                }),
                None => {
                    stats.null_values += 1;
                    0.0
                }
            })
            .collect()),
        None => {
            stats.missing_columns.push(name.to_string());
            Ok(vec![0.0; height])
        }
    }
}

/// Parse a numeric cell; NaN and unparseable text yield `None`
pub fn parse_numeric(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
}
