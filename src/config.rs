//! Configuration loading and device mapping.
//!
//! Reads the INI-style configuration file:
//!
//! ```text
//! [Path]
//! Source_Folder = D:/logs
//! Output_Folder = D:/reports
//!
//! [Device_Mapping]
//! 192.168.1.10 = Line_A, Station_1
//! 192.168.1.11 = Line_A, Station_2
//! ```
//!
//! Device keys are normalized to the underscore form used in log file names
//! (`192_168_1_10`).

use crate::constants::{UNKNOWN_LINE, UNKNOWN_STATION_PREFIX};
use crate::error::{ReportError, Result};
use crate::models::DeviceAssignment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Mapping from normalized device key to line and station
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMap {
    devices: BTreeMap<String, DeviceAssignment>,
}

impl DeviceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device by IP (dots or underscores)
    pub fn insert(&mut self, ip: &str, line: impl Into<String>, station: impl Into<String>) {
        self.devices.insert(
            normalize_device_key(ip),
            DeviceAssignment {
                line: line.into(),
                station: station.into(),
            },
        );
    }

    /// Line and station for a device key, falling back to `Unknown_Line`
    pub fn resolve(&self, ip_key: &str) -> DeviceAssignment {
        self.devices
            .get(&normalize_device_key(ip_key))
            .cloned()
            .unwrap_or_else(|| DeviceAssignment {
                line: UNKNOWN_LINE.to_string(),
                station: format!("{}{}", UNKNOWN_STATION_PREFIX, ip_key),
            })
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Replace dots with underscores, as in `<date>_<ip>.txt` file names
pub fn normalize_device_key(ip: &str) -> String {
    ip.trim().replace('.', "_")
}

/// Global configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Folder holding `<YYYYMMDD>_<ip>.txt` log files
    pub source_folder: PathBuf,

    /// Folder receiving the CSV and dashboard outputs
    pub output_folder: PathBuf,

    /// Maximum number of log files read concurrently
    pub workers: usize,

    pub devices: DeviceMap,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source_folder: PathBuf::from("."),
            output_folder: PathBuf::from("."),
            workers: num_cpus::get().clamp(1, 8),
            devices: DeviceMap::new(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from an INI file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReportError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::parse(&content)?;
        debug!(
            "Loaded config from {}: {} device mappings",
            path.display(),
            config.devices.len()
        );
        Ok(config)
    }

    /// Parse INI content
    pub fn parse(content: &str) -> Result<Self> {
        let mut builder = ConfigBuilder::default();
        for (line_num, line) in content.lines().enumerate() {
            builder.parse_line(line_num + 1, line)?;
        }
        builder.build()
    }

    /// Override the source folder
    pub fn with_source_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.source_folder = folder.into();
        self
    }

    /// Override the output folder
    pub fn with_output_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.output_folder = folder.into();
        self
    }

    /// Set maximum concurrent file reads
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Replace the device mapping
    pub fn with_devices(mut self, devices: DeviceMap) -> Self {
        self.devices = devices;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Path,
    DeviceMapping,
    Other,
}

/// Builder for configuration extraction
struct ConfigBuilder {
    section: Section,
    source_folder: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    devices: DeviceMap,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            section: Section::None,
            source_folder: None,
            output_folder: None,
            devices: DeviceMap::new(),
        }
    }
}

impl ConfigBuilder {
    fn parse_line(&mut self, line_num: usize, line: &str) -> Result<()> {
        let line = line.trim();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            return Ok(());
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            self.section = match name.trim().to_ascii_lowercase().as_str() {
                "path" => Section::Path,
                "device_mapping" => Section::DeviceMapping,
                _ => Section::Other,
            };
            return Ok(());
        }

        let Some((key, value)) = split_key_value(line) else {
            return Err(ReportError::configuration(format!(
                "Line {}: expected 'key = value', found '{}'",
                line_num, line
            )));
        };

        match self.section {
            Section::Path => match key.to_ascii_lowercase().as_str() {
                "source_folder" => self.source_folder = Some(PathBuf::from(value)),
                "output_folder" => self.output_folder = Some(PathBuf::from(value)),
                _ => {} // Ignore other path keys
            },
            Section::DeviceMapping => match parse_mapping(value) {
                Some((line_name, station)) => self.devices.insert(key, line_name, station),
                None => error!("Malformed mapping for IP {}: {}", key, value),
            },
            Section::None => {
                return Err(ReportError::configuration(format!(
                    "Line {}: key '{}' outside of any section",
                    line_num, key
                )));
            }
            Section::Other => {}
        }

        Ok(())
    }

    fn build(self) -> Result<ReportConfig> {
        let source_folder = self
            .source_folder
            .ok_or_else(|| ReportError::configuration("Missing [Path] Source_Folder"))?;
        let output_folder = self
            .output_folder
            .ok_or_else(|| ReportError::configuration("Missing [Path] Output_Folder"))?;

        Ok(ReportConfig {
            source_folder,
            output_folder,
            devices: self.devices,
            ..ReportConfig::default()
        })
    }
}

/// Split on the first `=` or `:`
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(['=', ':'])?;
    let key = line[..pos].trim();
    let value = line[pos + 1..].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse `"<line>, <station>"`
fn parse_mapping(value: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [line, station] if !line.is_empty() && !station.is_empty() => Some((*line, *station)),
        _ => None,
    }
}
