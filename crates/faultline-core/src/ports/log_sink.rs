//! Log sink port (driven/secondary port)
//!
//! Two-channel text sink for rendered reports. The reporter treats a failed
//! write as a signal to fall back to email notification, so implementations
//! must surface write errors instead of swallowing them.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because failures at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - A sink write is a single best-effort attempt; no retries.

use crate::domain::Severity;

/// Port trait for report log channels
#[async_trait::async_trait]
pub trait ILogSink: Send + Sync {
    /// Writes `text` to the channel selected by `severity`.
    ///
    /// # Errors
    /// Returns an error when the write could not be completed; the caller
    /// decides how to degrade.
    async fn write(&self, severity: Severity, text: &str) -> anyhow::Result<()>;

    /// Human-readable description of where `severity` ends up
    /// (e.g. a file path), used in fallback notification mails.
    fn describe(&self, severity: Severity) -> String;
}
