//! File log sink
//!
//! Appends rendered reports to `faultline.err` (errors) or `faultline.log`
//! (warnings) in the configured log directory, creating the directory on
//! first use. Writes are also mirrored to tracing so reports show up in the
//! structured log stream.

use std::io::Write;
use std::path::{Path, PathBuf};

use faultline_core::domain::Severity;
use faultline_core::ports::ILogSink;

/// Two-file append-only log sink.
pub struct FileLogSink {
    log_dir: PathBuf,
}

impl FileLogSink {
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }

    /// Path of the channel file for `severity`.
    pub fn channel_path(&self, severity: Severity) -> PathBuf {
        self.log_dir
            .join(format!("faultline.{}", severity.file_extension()))
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

#[async_trait::async_trait]
impl ILogSink for FileLogSink {
    async fn write(&self, severity: Severity, text: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.log_dir)?;

        let path = self.channel_path(severity);
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        file.write_all(text.as_bytes())?;
        file.write_all(b"\n")?;

        match severity {
            Severity::Error => tracing::error!(path = %path.display(), "report written"),
            Severity::Warning => tracing::warn!(path = %path.display(), "report written"),
        }
        Ok(())
    }

    fn describe(&self, severity: Severity) -> String {
        self.channel_path(severity).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_appends_to_channel_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileLogSink::new(dir.path().to_path_buf());

        sink.write(Severity::Error, "* first report").await.unwrap();
        sink.write(Severity::Error, "* second report").await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("faultline.err")).unwrap();
        assert!(content.contains("* first report\n"));
        assert!(content.contains("* second report\n"));
    }

    #[tokio::test]
    async fn test_channels_are_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileLogSink::new(dir.path().to_path_buf());

        sink.write(Severity::Error, "boom").await.unwrap();
        sink.write(Severity::Warning, "hmm").await.unwrap();

        assert!(dir.path().join("faultline.err").exists());
        assert!(dir.path().join("faultline.log").exists());
        let warnings = std::fs::read_to_string(dir.path().join("faultline.log")).unwrap();
        assert!(warnings.contains("hmm"));
        assert!(!warnings.contains("boom"));
    }

    #[tokio::test]
    async fn test_write_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("faultline");
        let sink = FileLogSink::new(nested.clone());

        sink.write(Severity::Warning, "report").await.unwrap();
        assert!(nested.join("faultline.log").exists());
    }

    #[test]
    fn test_describe_names_channel_file() {
        let sink = FileLogSink::new(PathBuf::from("/var/log/app"));
        assert_eq!(sink.describe(Severity::Error), "/var/log/app/faultline.err");
        assert_eq!(sink.describe(Severity::Warning), "/var/log/app/faultline.log");
    }
}
