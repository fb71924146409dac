//! Config command - View and validate Faultline configuration
//!
//! Provides the `faultline config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Validates the configuration file and reports errors

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use crate::commands::load_config;
use crate::output::{get_formatter, OutputFormat};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(format, config_path).await,
            ConfigCommand::Validate => self.execute_validate(format, config_path).await,
        }
    }

    async fn execute_show(&self, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let (path, config) = load_config(config_path);

        info!(config_path = %path.display(), "Showing configuration");

        if matches!(format, OutputFormat::Json) {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    async fn execute_validate(
        &self,
        format: OutputFormat,
        config_path: Option<&Path>,
    ) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let (path, config) = load_config(config_path);

        let errors = config.validate();

        if matches!(format, OutputFormat::Json) {
            formatter.print_json(&serde_json::json!({
                "path": path.display().to_string(),
                "valid": errors.is_empty(),
                "errors": errors
                    .iter()
                    .map(|e| serde_json::json!({"field": e.field, "message": e.message}))
                    .collect::<Vec<_>>(),
            }));
        } else if errors.is_empty() {
            formatter.success(&format!("Configuration is valid ({})", path.display()));
        } else {
            formatter.error(&format!(
                "Configuration has {} error(s) ({})",
                errors.len(),
                path.display()
            ));
            for error in &errors {
                formatter.info(&format!("{}: {}", error.field, error.message));
            }
        }

        Ok(())
    }
}
