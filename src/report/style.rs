//! Read-only style lookup for dashboard cells.
//!
//! Metric rows are styled by `(group, tier)`: four metric groups, each with a
//! header tier and a detail tier. Rank highlights use three further styles.

use crate::metrics::StyleGroup;
use serde::Serialize;

/// Visual attributes of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    /// Background fill as `#RRGGBB`
    pub background: &'static str,
    /// Font color as `#RRGGBB`
    pub font_color: &'static str,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(background: &'static str, font_color: &'static str, bold: bool) -> Self {
        Self {
            background,
            font_color,
            bold,
        }
    }
}

/// Row tier within a metric group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RowTier {
    Header,
    Detail,
}

impl RowTier {
    pub fn for_header_flag(is_group_header: bool) -> Self {
        if is_group_header {
            RowTier::Header
        } else {
            RowTier::Detail
        }
    }
}

/// Highlight level for the 1st, 2nd and 3rd largest distinct station values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RankTier {
    First,
    Second,
    Third,
}

impl RankTier {
    pub const ALL: [RankTier; 3] = [RankTier::First, RankTier::Second, RankTier::Third];
}

/// Style pair for one metric group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupStyles {
    pub header: CellStyle,
    pub detail: CellStyle,
}

/// Complete style configuration passed to the report builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleTable {
    pub overview: GroupStyles,
    pub noise: GroupStyles,
    pub rpm: GroupStyles,
    pub others: GroupStyles,
    pub first: CellStyle,
    pub second: CellStyle,
    pub third: CellStyle,
    pub title: CellStyle,
    pub column_header: CellStyle,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            overview: GroupStyles {
                header: CellStyle::new("#1F4E78", "#FFFFFF", true),
                detail: CellStyle::new("#DDEBF7", "#000000", false),
            },
            noise: GroupStyles {
                header: CellStyle::new("#806000", "#FFFFFF", true),
                detail: CellStyle::new("#FFF2CC", "#000000", false),
            },
            rpm: GroupStyles {
                header: CellStyle::new("#375623", "#FFFFFF", true),
                detail: CellStyle::new("#E2EFDA", "#000000", false),
            },
            others: GroupStyles {
                header: CellStyle::new("#7030A0", "#FFFFFF", true),
                detail: CellStyle::new("#EDE1F5", "#000000", false),
            },
            first: CellStyle::new("#C00000", "#FFFFFF", true),
            second: CellStyle::new("#FF7C80", "#000000", true),
            third: CellStyle::new("#FFC7CE", "#9C0006", true),
            title: CellStyle::new("#002060", "#FFFFFF", true),
            column_header: CellStyle::new("#D9D9D9", "#000000", true),
        }
    }
}

impl StyleTable {
    /// Style for every cell of a metric row
    pub fn metric(&self, group: StyleGroup, tier: RowTier) -> CellStyle {
        let styles = match group {
            StyleGroup::Overview => &self.overview,
            StyleGroup::Noise => &self.noise,
            StyleGroup::Rpm => &self.rpm,
            StyleGroup::Others => &self.others,
        };
        match tier {
            RowTier::Header => styles.header,
            RowTier::Detail => styles.detail,
        }
    }

    /// Style overlaid on a ranked station cell
    pub fn rank(&self, tier: RankTier) -> CellStyle {
        match tier {
            RankTier::First => self.first,
            RankTier::Second => self.second,
            RankTier::Third => self.third,
        }
    }
}
