//! Lays aggregated line tables out as the dashboard grid.

use super::style::{CellStyle, RankTier, RowTier, StyleTable};
use crate::aggregator::{MetricValue, SummaryTable};
use crate::constants::{DASHBOARD_SHEET_NAME, METRIC_HEADER, TOTAL_COLUMN};
use crate::metrics::MetricDefinition;
use serde::Serialize;

/// Content of a grid cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Text(String),
    Metric(MetricValue),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Metric(value) => value.display(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
    /// Set by the rank highlighter
    pub rank: Option<RankTier>,
}

impl Cell {
    fn new(value: CellValue, style: CellStyle) -> Self {
        Self {
            value,
            style,
            rank: None,
        }
    }
}

/// Row of a line block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GridRow {
    /// Line name merged across `span` columns
    Title {
        text: String,
        span: usize,
        style: CellStyle,
    },
    /// `Metric`, `Total`, then station names
    Header(Vec<Cell>),
    /// Label cell, Total cell, then one cell per station
    Metric {
        metric: MetricDefinition,
        cells: Vec<Cell>,
    },
    Spacer,
}

/// Index of the first station cell within a metric row
pub const FIRST_STATION_CELL: usize = 2;

/// Rendered grid for one production line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineBlock {
    pub line: String,
    pub stations: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl LineBlock {
    /// Width of the block in columns
    pub fn width(&self) -> usize {
        self.stations.len() + FIRST_STATION_CELL
    }

    /// Cells of the metric row with the given label
    pub fn metric_cells(&self, label: &str) -> Option<&[Cell]> {
        self.rows.iter().find_map(|row| match row {
            GridRow::Metric { metric, cells } if metric.label == label => Some(cells.as_slice()),
            _ => None,
        })
    }
}

/// The `Summary_Dashboard` sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSheet {
    pub name: String,
    pub blocks: Vec<LineBlock>,
}

/// Builds line blocks from summary tables using a fixed style table
pub struct ReportBuilder<'a> {
    styles: &'a StyleTable,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(styles: &'a StyleTable) -> Self {
        Self { styles }
    }

    /// Build the dashboard sheet, one block per table in input order
    pub fn build(&self, tables: &[SummaryTable]) -> DashboardSheet {
        DashboardSheet {
            name: DASHBOARD_SHEET_NAME.to_string(),
            blocks: tables.iter().map(|table| self.build_block(table)).collect(),
        }
    }

    /// Build the block for a single line
    pub fn build_block(&self, table: &SummaryTable) -> LineBlock {
        let width = table.stations.len() + FIRST_STATION_CELL;
        let mut rows = Vec::with_capacity(table.rows.len() + 3);

        rows.push(GridRow::Title {
            text: table.line.clone(),
            span: width,
            style: self.styles.title,
        });

        let header_style = self.styles.column_header;
        let header = [METRIC_HEADER, TOTAL_COLUMN]
            .into_iter()
            .map(str::to_string)
            .chain(table.stations.iter().cloned())
            .map(|name| Cell::new(CellValue::Text(name), header_style))
            .collect();
        rows.push(GridRow::Header(header));

        for row in &table.rows {
            let style = self
                .styles
                .metric(row.metric.group, RowTier::for_header_flag(row.metric.is_group_header));

            let mut cells = Vec::with_capacity(width);
            cells.push(Cell::new(
                CellValue::Text(row.metric.label.to_string()),
                style,
            ));
            cells.push(Cell::new(CellValue::Metric(row.total.clone()), style));
            cells.extend(
                row.stations
                    .iter()
                    .map(|value| Cell::new(CellValue::Metric(value.clone()), style)),
            );

            rows.push(GridRow::Metric {
                metric: row.metric,
                cells,
            });
        }

        rows.push(GridRow::Spacer);

        LineBlock {
            line: table.line.clone(),
            stations: table.stations.clone(),
            rows,
        }
    }
}
