//! Application constants for the test-log dashboard
//!
//! Column names, classification tokens, file naming patterns and report
//! labels shared by the ingestion collaborators and the report engine.

// =============================================================================
// Input Columns
// =============================================================================

/// Column names in the merged test-log dataset
pub mod columns {
    // Required columns
    pub const TOTAL_RESULT: &str = "Total_Result";
    pub const LINE_NAME: &str = "Line_Name";
    pub const DEVICE_ID: &str = "Device_ID";

    // Numeric instrument columns (default 0)
    pub const INDEX1: &str = "index1";
    pub const INDEX1_LIMIT: &str = "Index1_Limit";
    pub const INDEX2: &str = "index2";
    pub const INDEX2_LIMIT: &str = "Index2_Limit";
    pub const RPM: &str = "RPM";
    pub const RPM_LOW: &str = "RPM_Low";

    // Free-text columns (default empty)
    pub const INTELLIGENT_CONTROL: &str = "Intelligent_Control";
    pub const SECTION: &str = "Section";
    pub const MODEL_NAME: &str = "Model_Name";
    pub const BARCODE: &str = "Barcode";

    // Injected by the log reader
    pub const SOURCE_IP: &str = "Source_IP";
    pub const LOG_DATE: &str = "Log_Date";

    /// Columns without which no report can be produced
    pub const REQUIRED: &[&str] = &[TOTAL_RESULT, LINE_NAME, DEVICE_ID];
}

// =============================================================================
// Classification Tokens
// =============================================================================

/// Result token meaning pass, compared trimmed and case-insensitively
pub const PASS_TOKEN: &str = "OK";

/// Absolute RPM ceiling above which a unit is out of control
pub const RPM_CEILING: f64 = 10_000.0;

/// Model name marker for pause/free-run units (whitespace stripped, lowercase)
pub const PAUSE_TOKEN: &str = "pauseorfreerun";

// =============================================================================
// Device Mapping
// =============================================================================

/// Line assigned to devices missing from the mapping
pub const UNKNOWN_LINE: &str = "Unknown_Line";

/// Station prefix for devices missing from the mapping
pub const UNKNOWN_STATION_PREFIX: &str = "Unknown_";

// =============================================================================
// Files
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config.ini";

/// Extension of raw per-device log files (`<YYYYMMDD>_<ip>.txt`)
pub const LOG_FILE_EXTENSION: &str = "txt";

/// Target date format
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Merged raw-data export prefix
pub const RAW_OUTPUT_PREFIX: &str = "Daily_Summary";

/// Dashboard export prefix
pub const DASHBOARD_OUTPUT_PREFIX: &str = "Summary_Dashboard";

// =============================================================================
// Report Layout
// =============================================================================

/// Name of the dashboard sheet
pub const DASHBOARD_SHEET_NAME: &str = "Summary_Dashboard";

/// First header cell of every line block
pub const METRIC_HEADER: &str = "Metric";

/// Column aggregating the whole line
pub const TOTAL_COLUMN: &str = "Total";

/// Separator for distinct-value joins in the Total column
pub const JOIN_SEPARATOR: &str = ", ";

/// Number of rank highlight tiers
pub const RANK_TIERS: usize = 3;
