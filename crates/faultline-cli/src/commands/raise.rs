//! Raise command - Push a synthetic exception through the pipeline
//!
//! Builds a fault event at the CLI call site, archives the rendered report,
//! and registers it with an `ExceptionReporter` wired to the configured log
//! directory. Useful for verifying a deployment end to end.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use faultline_capture::{render_report, ArchivedReport, ReportArchive};
use faultline_core::domain::{synthetic_event, Severity};
use faultline_core::ports::IMailTransport;
use faultline_notify::{
    ExceptionReporter, FileLogSink, HttpMailer, MemoryOccurrenceStore, RegisterOptions,
};

use crate::commands::load_config;
use crate::output::{get_formatter, OutputFormat};

/// Arguments for `faultline raise`
#[derive(Debug, Args)]
pub struct RaiseCommand {
    /// Exception kind (e.g. "ValueError")
    #[arg(long)]
    kind: String,

    /// Exception message
    #[arg(long)]
    message: String,

    /// Escalate to an administrator email
    #[arg(long)]
    alert_admin: bool,

    /// Log channel: "error" or "warning"
    #[arg(long, default_value = "error")]
    severity: String,
}

/// Mail transport used when no relay endpoint is configured.
struct UnconfiguredMailer;

#[async_trait::async_trait]
impl IMailTransport for UnconfiguredMailer {
    async fn send(&self, _from: &str, _to: &str, _subject: &str, _body: &str) -> Result<()> {
        bail!("mail relay endpoint is not configured")
    }
}

impl RaiseCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let (_, config) = load_config(config_path);
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let severity = parse_severity(&self.severity)?;

        let mail: Arc<dyn IMailTransport> = match &config.notify.mail_endpoint {
            Some(endpoint) => Arc::new(HttpMailer::new(endpoint.clone())),
            None => Arc::new(UnconfiguredMailer),
        };

        let reporter = ExceptionReporter::new(
            Arc::new(FileLogSink::new(config.logging.log_dir.clone())),
            mail,
            Arc::new(MemoryOccurrenceStore::new()),
            config.site.clone(),
            config.notify.admin_policy,
            config.scrub.clone(),
        );

        // The event is built here so the report points at the CLI invocation.
        let event = synthetic_event(&self.kind, &self.message);
        let signature = event.signature();

        let archive = ReportArchive::new(config.logging.archive_dir.clone());
        let report = render_report(&event, &config.scrub);
        let archived = ArchivedReport::new(&signature, severity, report);
        let archived_path = archive.save(&archived)?;

        let mut options = RegisterOptions {
            severity,
            ..RegisterOptions::default()
        };
        if self.alert_admin {
            options = options.alert_admin();
        }

        if reporter.register(event, options).await {
            if matches!(format, OutputFormat::Json) {
                formatter.print_json(&serde_json::json!({
                    "registered": true,
                    "kind": signature.kind,
                    "file": signature.file,
                    "line": signature.line,
                    "archived": archived_path.display().to_string(),
                }));
            } else {
                formatter.success(&format!("Registered {}", signature));
                formatter.info(&format!("Archived as {}", archived_path.display()));
            }
        } else {
            formatter.error(&format!("Failed to register {}", signature));
        }

        Ok(())
    }
}

fn parse_severity(value: &str) -> Result<Severity> {
    match value {
        "error" => Ok(Severity::Error),
        "warning" => Ok(Severity::Warning),
        other => bail!("unknown severity '{}', expected 'error' or 'warning'", other),
    }
}
