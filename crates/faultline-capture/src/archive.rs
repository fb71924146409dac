//! Report archive
//!
//! Persists rendered reports as structured JSON files under the archive
//! directory (`fault-{date}-{uuid8}.json`) and manages the resulting set:
//! list, read, delete.

use std::path::{Path, PathBuf};

use chrono::Utc;
use faultline_core::domain::{FaultSignature, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A rendered report as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedReport {
    pub id: String,
    pub timestamp: String,
    pub version: String,
    pub kind: String,
    pub file: String,
    pub line: u32,
    pub severity: Severity,
    /// The full rendered (already scrubbed) report text
    pub report: String,
}

impl ArchivedReport {
    /// Wraps a rendered report with its signature metadata.
    pub fn new(signature: &FaultSignature, severity: Severity, report: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            kind: signature.kind.clone(),
            file: signature.file.clone(),
            line: signature.line,
            severity,
            report: report.into(),
        }
    }
}

/// Entry in the report archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub id: String,
    pub date: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// Manages the directory of archived report files.
pub struct ReportArchive {
    archive_dir: PathBuf,
}

impl ReportArchive {
    /// Creates a new archive pointing at `archive_dir`.
    pub fn new(archive_dir: PathBuf) -> Self {
        Self { archive_dir }
    }

    /// Returns the default archive directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("faultline")
            .join("reports")
    }

    /// Saves a report, creating the directory if needed.
    ///
    /// File name: `fault-{date}-{uuid8}.json`
    pub fn save(&self, report: &ArchivedReport) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.archive_dir)?;

        let date = Utc::now().format("%Y%m%d");
        let short_id = &report.id[..8];
        let filename = format!("fault-{date}-{short_id}.json");
        let path = self.archive_dir.join(filename);

        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        Ok(path)
    }

    /// Lists all archived reports, most recent date first.
    pub fn list(&self) -> anyhow::Result<Vec<ArchiveEntry>> {
        if !self.archive_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.archive_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().is_some_and(|e| e == "json") {
                let stem = path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();

                let (date, id) = parse_archive_filename(&stem);
                let metadata = entry.metadata()?;

                entries.push(ArchiveEntry {
                    id,
                    date,
                    size_bytes: metadata.len(),
                    path,
                });
            }
        }

        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    /// Reads a report by its ID (filename stem fragment match).
    pub fn read(&self, id: &str) -> anyhow::Result<Option<Value>> {
        for entry in self.list()? {
            if entry_matches(&entry, id) {
                let content = std::fs::read_to_string(&entry.path)?;
                let value: Value = serde_json::from_str(&content)?;
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Deletes a report by its ID. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> anyhow::Result<bool> {
        for entry in self.list()? {
            if entry_matches(&entry, id) {
                std::fs::remove_file(&entry.path)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Deletes all reports. Returns the number removed.
    pub fn delete_all(&self) -> anyhow::Result<u32> {
        let mut count = 0;
        for entry in self.list()? {
            if std::fs::remove_file(&entry.path).is_ok() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Returns the archive directory path.
    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }
}

fn entry_matches(entry: &ArchiveEntry, id: &str) -> bool {
    entry.id == id
        || entry
            .path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .contains(id)
}

/// Parses a filename like `fault-20260825-a1b2c3d4` into (date, id).
fn parse_archive_filename(stem: &str) -> (String, String) {
    let parts: Vec<&str> = stem.splitn(3, '-').collect();
    match parts.len() {
        3 => (parts[1].to_string(), parts[2].to_string()),
        2 => (parts[1].to_string(), stem.to_string()),
        _ => (String::new(), stem.to_string()),
    }
}
