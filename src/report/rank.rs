//! Top-three highlighting of station cells in ranked metric rows.
//!
//! Ranking is by distinct value: every station sharing the largest value gets
//! the first tier, and so on for the second and third largest. Zero values
//! are never highlighted.

use super::builder::{CellValue, FIRST_STATION_CELL, GridRow, LineBlock};
use super::style::{RankTier, StyleTable};
use crate::constants::RANK_TIERS;

/// Assign a rank tier to each value
///
/// `None` entries (non-numeric cells) never receive a tier.
pub fn rank_tiers(values: &[Option<f64>]) -> Vec<Option<RankTier>> {
    let mut distinct: Vec<f64> = values.iter().flatten().copied().collect();
    distinct.sort_by(|a, b| b.total_cmp(a));
    distinct.dedup();
    distinct.truncate(RANK_TIERS);

    values
        .iter()
        .map(|value| {
            let value = (*value)?;
            if value == 0.0 {
                return None;
            }
            distinct
                .iter()
                .position(|top| *top == value)
                .map(|position| RankTier::ALL[position])
        })
        .collect()
}

/// Overlays rank styles on ranked metric rows
pub struct RankHighlighter<'a> {
    styles: &'a StyleTable,
}

impl<'a> RankHighlighter<'a> {
    pub fn new(styles: &'a StyleTable) -> Self {
        Self { styles }
    }

    /// Highlight every ranked row of a line block in place
    pub fn apply(&self, block: &mut LineBlock) {
        for row in &mut block.rows {
            let GridRow::Metric { metric, cells } = row else {
                continue;
            };
            if !metric.is_ranked || cells.len() <= FIRST_STATION_CELL {
                continue;
            }

            let stations = &mut cells[FIRST_STATION_CELL..];
            let values: Vec<Option<f64>> = stations
                .iter()
                .map(|cell| match &cell.value {
                    CellValue::Metric(value) => value.raw(),
                    CellValue::Text(_) => None,
                })
                .collect();

            for (cell, tier) in stations.iter_mut().zip(rank_tiers(&values)) {
                if let Some(tier) = tier {
                    cell.style = self.styles.rank(tier);
                    cell.rank = Some(tier);
                }
            }
        }
    }
}
