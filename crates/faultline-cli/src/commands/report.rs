//! Report command - Browse archived exception reports
//!
//! Provides the `faultline report` CLI command with subcommands:
//! - `list`: Show all archived reports
//! - `view <id>`: Display a specific report
//! - `delete`: Remove reports from the archive

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use faultline_capture::ReportArchive;

use crate::commands::load_config;
use crate::output::{get_formatter, JsonFormatter, OutputFormat, OutputFormatter};

/// Report archive subcommands
#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// List all archived exception reports
    List,
    /// View a specific report
    View {
        /// Report ID or filename fragment
        id: String,
        /// Show raw JSON instead of the rendered report text
        #[arg(long)]
        json: bool,
    },
    /// Delete reports from the archive
    Delete {
        /// Specific report ID to delete
        id: Option<String>,
        /// Delete all reports
        #[arg(long)]
        all: bool,
    },
}

impl ReportCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let (_, config) = load_config(config_path);
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let archive = ReportArchive::new(config.logging.archive_dir.clone());

        match self {
            ReportCommand::List => {
                let entries = archive.list()?;
                if entries.is_empty() {
                    formatter.info("No reports found.");
                    return Ok(());
                }
                formatter.archive_listing(&entries);
            }

            ReportCommand::View { id, json } => match archive.read(id)? {
                Some(value) => {
                    // `--json` forces raw output even in human mode.
                    if *json {
                        JsonFormatter.report_document(&value);
                    } else {
                        formatter.report_document(&value);
                    }
                }
                None => {
                    formatter.error(&format!("Report '{}' not found", id));
                }
            },

            ReportCommand::Delete { id, all } => {
                if *all {
                    let count = archive.delete_all()?;
                    formatter.success(&format!("Deleted {} report(s)", count));
                } else if let Some(ref report_id) = id {
                    if archive.delete(report_id)? {
                        formatter.success(&format!("Deleted report '{}'", report_id));
                    } else {
                        formatter.error(&format!("Report '{}' not found", report_id));
                    }
                } else {
                    formatter.error("Specify a report ID or use --all");
                }
            }
        }

        Ok(())
    }
}
