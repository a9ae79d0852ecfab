//! Log file discovery for a production date
//!
//! Finds per-device log files named `<YYYYMMDD>_<ip>.txt` in the source
//! folder and extracts the device key from each file name.

use crate::constants::LOG_FILE_EXTENSION;
use crate::error::{ReportError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A device log file for the target date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    /// Device key from the file name, e.g. `192_168_1_10`
    pub ip_key: String,
}

/// File discovery component for one source folder and date
#[derive(Debug)]
pub struct FileDiscovery {
    source_folder: PathBuf,
    target_date: String,
    name_pattern: Regex,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(source_folder: PathBuf, target_date: &str) -> Result<Self> {
        let name_pattern = Regex::new(&format!(
            r"^{}_(.+)\.{}$",
            regex::escape(target_date),
            LOG_FILE_EXTENSION
        ))
        .map_err(|e| ReportError::configuration(format!("Invalid file name pattern: {}", e)))?;

        Ok(Self {
            source_folder,
            target_date: target_date.to_string(),
            name_pattern,
        })
    }

    /// Discover all log files for the target date, sorted by path
    pub fn discover_log_files(&self) -> Result<Vec<LogFile>> {
        if !self.source_folder.is_dir() {
            return Err(ReportError::SourceNotFound {
                path: self.source_folder.clone(),
            });
        }

        let pattern = format!(
            "{}/{}_*.{}",
            glob::Pattern::escape(&self.source_folder.to_string_lossy()),
            self.target_date,
            LOG_FILE_EXTENSION
        );
        debug!("Searching for log files matching: {}", pattern);

        let mut files = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            if let Some(ip_key) = self.ip_key(&path) {
                files.push(LogFile { path, ip_key });
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(
            "Found {} log files for {} in {}",
            files.len(),
            self.target_date,
            self.source_folder.display()
        );

        Ok(files)
    }

    /// Device key captured from a log file name
    pub fn ip_key(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        self.name_pattern
            .captures(name)
            .map(|caps| caps[1].to_string())
    }
}
