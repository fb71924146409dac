//! Configuration module for Faultline.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AdminNotifyPolicy;

/// Top-level configuration for Faultline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub notify: NotifyConfig,
    pub scrub: ScrubConfig,
    pub logging: LoggingConfig,
    pub cloudfs: CloudFsConfig,
}

/// Site identity and operator contact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name used in mail sender identities.
    pub name: String,
    /// Public URL of the site, appended to mail subjects.
    pub url: String,
    /// Administrator address: sender and recipient of exception mails.
    pub admin_email: String,
    /// Support address: sender of emergency notifications.
    pub support_email: String,
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// When to email administrators about exceptions.
    pub admin_policy: AdminNotifyPolicy,
    /// Emergency schedule: time window -> comma-separated recipients.
    ///
    /// Windows are `HH:MM-HH:MM`, optionally prefixed with a weekday name
    /// (`Sunday 22:00-06:00`). The `*` entry always applies.
    pub emergency_schedule: BTreeMap<String, String>,
    /// HTTP endpoint of the mail relay; `None` disables outbound mail.
    pub mail_endpoint: Option<String>,
}

/// Secret-scrubbing settings for diagnostic reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubConfig {
    /// Values always added to the redaction set (e.g. the database password).
    pub always_redact: Vec<String>,
    /// Token substituted for redacted values.
    pub placeholder: String,
    /// Maximum rendered length of a variable before truncation.
    pub truncate_limit: usize,
}

/// Logging / report archive settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Directory holding `faultline.err` and `faultline.log`.
    pub log_dir: PathBuf,
    /// Directory where rendered reports are archived as JSON.
    pub archive_dir: PathBuf,
}

/// Cloud filesystem connector settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudFsConfig {
    /// OAuth application (client) ID. `None` until configured.
    pub app_id: Option<String>,
    /// Redirect URI sent to the authorization endpoint.
    pub redirect_uri: String,
    /// Base URL of the remote filesystem API.
    pub api_base: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/faultline/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("faultline")
            .join("config.yaml")
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Faultline".to_string(),
            url: "http://localhost".to_string(),
            admin_email: "admin@localhost".to_string(),
            support_email: "support@localhost".to_string(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            admin_policy: AdminNotifyPolicy::default(),
            emergency_schedule: BTreeMap::new(),
            mail_endpoint: None,
        }
    }
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            always_redact: Vec::new(),
            placeholder: "<*****>".to_string(),
            truncate_limit: 500,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("faultline");
        Self {
            level: "info".to_string(),
            log_dir: data_dir.clone(),
            archive_dir: data_dir.join("reports"),
        }
    }
}

// CloudFsConfig derives Default; an empty api_base is caught by validate()
// only when an app_id is configured.

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"scrub.truncate_limit"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- site ---
        for (field, value) in [
            ("site.admin_email", &self.site.admin_email),
            ("site.support_email", &self.site.support_email),
        ] {
            if !value.contains('@') {
                errors.push(ValidationError {
                    field: field.into(),
                    message: format!("not an email address: {}", value),
                });
            }
        }
        if self.site.url.is_empty() {
            errors.push(ValidationError {
                field: "site.url".into(),
                message: "must not be empty".into(),
            });
        }

        // --- notify ---
        for window in self.notify.emergency_schedule.keys() {
            if window != "*" && !window.contains('-') {
                errors.push(ValidationError {
                    field: "notify.emergency_schedule".into(),
                    message: format!(
                        "invalid window '{}'; expected 'HH:MM-HH:MM' or '*'",
                        window
                    ),
                });
            }
        }

        // --- scrub ---
        if self.scrub.placeholder.is_empty() {
            errors.push(ValidationError {
                field: "scrub.placeholder".into(),
                message: "must not be empty".into(),
            });
        }
        if self.scrub.truncate_limit == 0 {
            errors.push(ValidationError {
                field: "scrub.truncate_limit".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.scrub.always_redact.iter().any(|v| v.is_empty()) {
            errors.push(ValidationError {
                field: "scrub.always_redact".into(),
                message: "empty strings are never redacted".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        // --- cloudfs ---
        if self.cloudfs.app_id.is_some() {
            if self.cloudfs.api_base.is_empty() {
                errors.push(ValidationError {
                    field: "cloudfs.api_base".into(),
                    message: "required when cloudfs.app_id is set".into(),
                });
            }
            if self.cloudfs.redirect_uri.is_empty() {
                errors.push(ValidationError {
                    field: "cloudfs.redirect_uri".into(),
                    message: "required when cloudfs.app_id is set".into(),
                });
            }
        }

        errors
    }
}

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use faultline_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .site_admin_email("ops@example.org")
///     .scrub_always_redact(vec!["dbsecret".into()])
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- site ---

    pub fn site_name(mut self, name: impl Into<String>) -> Self {
        self.config.site.name = name.into();
        self
    }

    pub fn site_url(mut self, url: impl Into<String>) -> Self {
        self.config.site.url = url.into();
        self
    }

    pub fn site_admin_email(mut self, email: impl Into<String>) -> Self {
        self.config.site.admin_email = email.into();
        self
    }

    pub fn site_support_email(mut self, email: impl Into<String>) -> Self {
        self.config.site.support_email = email.into();
        self
    }

    // --- notify ---

    pub fn notify_admin_policy(mut self, policy: AdminNotifyPolicy) -> Self {
        self.config.notify.admin_policy = policy;
        self
    }

    pub fn notify_emergency_window(
        mut self,
        window: impl Into<String>,
        recipients: impl Into<String>,
    ) -> Self {
        self.config
            .notify
            .emergency_schedule
            .insert(window.into(), recipients.into());
        self
    }

    pub fn notify_mail_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.notify.mail_endpoint = Some(endpoint.into());
        self
    }

    // --- scrub ---

    pub fn scrub_always_redact(mut self, values: Vec<String>) -> Self {
        self.config.scrub.always_redact = values;
        self
    }

    pub fn scrub_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.scrub.placeholder = placeholder.into();
        self
    }

    pub fn scrub_truncate_limit(mut self, limit: usize) -> Self {
        self.config.scrub.truncate_limit = limit;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn logging_log_dir(mut self, dir: PathBuf) -> Self {
        self.config.logging.log_dir = dir;
        self
    }

    pub fn logging_archive_dir(mut self, dir: PathBuf) -> Self {
        self.config.logging.archive_dir = dir;
        self
    }

    // --- cloudfs ---

    pub fn cloudfs_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.config.cloudfs.app_id = Some(app_id.into());
        self
    }

    pub fn cloudfs_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.cloudfs.redirect_uri = uri.into();
        self
    }

    pub fn cloudfs_api_base(mut self, base: impl Into<String>) -> Self {
        self.config.cloudfs.api_base = base.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
