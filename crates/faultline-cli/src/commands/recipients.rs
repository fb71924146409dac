//! Recipients command - Resolve the current emergency recipients
//!
//! Parses the configured emergency schedule and prints who would receive an
//! emergency notification right now (or at a given time of day).

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, NaiveTime};
use clap::Args;
use faultline_notify::EmergencySchedule;

use crate::commands::load_config;
use crate::output::{get_formatter, OutputFormat};

/// Arguments for `faultline recipients`
#[derive(Debug, Args)]
pub struct RecipientsCommand {
    /// Resolve at this time of day instead of now (HH:MM)
    #[arg(long)]
    at: Option<String>,
}

impl RecipientsCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let (_, config) = load_config(config_path);

        let schedule = EmergencySchedule::from_map(&config.notify.emergency_schedule)
            .context("Invalid emergency schedule in configuration")?;

        let when = self.resolve_time()?;
        let recipients = schedule.resolve_recipients(when, &config.site.admin_email);

        if matches!(format, OutputFormat::Json) {
            formatter.print_json(&serde_json::json!({
                "at": when.format("%Y-%m-%d %H:%M").to_string(),
                "recipients": recipients.iter().collect::<Vec<_>>(),
            }));
        } else {
            formatter.success(&format!(
                "Emergency recipients at {}:",
                when.format("%Y-%m-%d %H:%M")
            ));
            for recipient in &recipients {
                formatter.info(recipient);
            }
        }

        Ok(())
    }

    fn resolve_time(&self) -> Result<NaiveDateTime> {
        let now = Local::now().naive_local();
        match &self.at {
            None => Ok(now),
            Some(at) => {
                let time = NaiveTime::parse_from_str(at, "%H:%M")
                    .with_context(|| format!("Invalid time '{}', expected HH:MM", at))?;
                Ok(now.date().and_time(time))
            }
        }
    }
}
