//! Faultline CLI - Command-line interface for Faultline
//!
//! Provides commands for:
//! - Browsing the archived report store
//! - Raising a synthetic exception through the full reporting pipeline
//! - Viewing and validating configuration
//! - Resolving the current emergency recipients

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    config::ConfigCommand, raise::RaiseCommand, recipients::RecipientsCommand,
    report::ReportCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "faultline", version, about = "Exception capture and notification toolkit")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse and manage archived exception reports
    #[command(subcommand)]
    Report(ReportCommand),
    /// Raise a synthetic exception through the reporting pipeline
    Raise(RaiseCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Show the currently resolved emergency recipients
    Recipients(RecipientsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Report(cmd) => cmd.execute(format, config_path).await,
        Commands::Raise(cmd) => cmd.execute(format, config_path).await,
        Commands::Config(cmd) => cmd.execute(format, config_path).await,
        Commands::Recipients(cmd) => cmd.execute(format, config_path).await,
    }
}
