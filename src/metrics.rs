//! Fixed metric configuration for the summary dashboard.
//!
//! The dashboard's rows are driven entirely by [`METRICS`]: adding or
//! removing a row is a change to this table, not to the aggregator or the
//! report builder.

use crate::constants::columns;
use crate::models::DerivedField;
use serde::Serialize;

/// How a metric reduces a group of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AggregationKind {
    /// Number of records in the group
    Count,
    /// Sum of a derived field
    Sum,
    /// `100 * sum / count`, rendered as a percentage
    Rate,
    /// Distinct text values (joined for the line, first value per station)
    StringJoin,
}

/// Source of a metric's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricSource {
    Derived(DerivedField),
    ModelName,
}

impl MetricSource {
    /// Column the metric reads, as named in exports and logs
    pub fn column_name(&self) -> &'static str {
        match self {
            MetricSource::Derived(field) => field.column_name(),
            MetricSource::ModelName => columns::MODEL_NAME,
        }
    }
}

/// Visual group a metric row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StyleGroup {
    Overview,
    Noise,
    Rpm,
    Others,
}

impl StyleGroup {
    pub const ALL: [StyleGroup; 4] = [
        StyleGroup::Overview,
        StyleGroup::Noise,
        StyleGroup::Rpm,
        StyleGroup::Others,
    ];
}

/// One dashboard row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDefinition {
    pub label: &'static str,
    pub source: Option<MetricSource>,
    pub kind: AggregationKind,
    pub group: StyleGroup,
    pub is_group_header: bool,
    pub is_ranked: bool,
}

const fn metric(
    label: &'static str,
    source: Option<MetricSource>,
    kind: AggregationKind,
    group: StyleGroup,
    is_group_header: bool,
    is_ranked: bool,
) -> MetricDefinition {
    MetricDefinition {
        label,
        source,
        kind,
        group,
        is_group_header,
        is_ranked,
    }
}

use AggregationKind::{Count, Rate, StringJoin, Sum};
use DerivedField as F;
use StyleGroup::{Noise, Others, Overview, Rpm};

const fn derived(field: DerivedField) -> Option<MetricSource> {
    Some(MetricSource::Derived(field))
}

/// Dashboard rows in display order
pub static METRICS: &[MetricDefinition] = &[
    metric("Total Count", None, Count, Overview, true, false),
    metric("Fail Count", derived(F::IsFail), Sum, Overview, false, true),
    metric("Fail Rate", derived(F::IsFail), Rate, Overview, false, true),
    metric("Noise Rate", derived(F::Noise), Rate, Overview, false, true),
    metric("RPM Fail Rate", derived(F::RpmNg), Rate, Overview, false, true),
    metric("Other Fail Rate", derived(F::Others), Rate, Overview, false, true),
    metric("Noise", derived(F::Noise), Sum, Noise, true, true),
    metric("Only Index1 Fail", derived(F::OnlyIdx1), Sum, Noise, false, true),
    metric("Only Index2 Fail", derived(F::OnlyIdx2), Sum, Noise, false, true),
    metric("Index 1 & 2 both", derived(F::BothIdx), Sum, Noise, false, true),
    metric("Spec Fail", derived(F::SpecFail), Sum, Noise, false, true),
    metric("RPM NG", derived(F::RpmNg), Sum, Rpm, true, true),
    metric("Out of control", derived(F::OutControl), Sum, Rpm, false, true),
    metric("No rotate", derived(F::NoRotate), Sum, Rpm, false, true),
    metric("Others", derived(F::Others), Sum, Others, true, true),
    metric("PauseOrFreeRun", derived(F::Pause), Sum, Others, false, true),
    metric("No Barcode", derived(F::NoBarcode), Sum, Others, false, true),
    metric("Model Name", Some(MetricSource::ModelName), StringJoin, Others, false, false),
];
