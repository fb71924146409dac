//! CLI command implementations

pub mod config;
pub mod raise;
pub mod recipients;
pub mod report;

use std::path::{Path, PathBuf};

use faultline_core::config::Config;

/// Loads configuration from the override path or the default location.
pub fn load_config(config_path: Option<&Path>) -> (PathBuf, Config) {
    let path = config_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&path);
    (path, config)
}
