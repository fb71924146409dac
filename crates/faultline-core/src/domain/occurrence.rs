//! Occurrence records and admin notification policy
//!
//! An occurrence record tracks one fault signature across requests so that a
//! recurring failure notifies administrators once instead of on every hit.
//! Persistence and atomicity belong to the `IOccurrenceStore` adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// When to email administrators about an exception.
///
/// Mirrors the legacy numeric setting: `0` disabled, `1` first occurrence
/// only (or when explicitly requested), anything greater always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminNotifyPolicy {
    /// Never email administrators
    Disabled,
    /// Email on the first occurrence of a signature, or when escalated
    FirstOnly,
    /// Email on every notifiable occurrence
    Always,
}

impl AdminNotifyPolicy {
    /// Parses the legacy numeric representation.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => AdminNotifyPolicy::Disabled,
            1 => AdminNotifyPolicy::FirstOnly,
            _ => AdminNotifyPolicy::Always,
        }
    }
}

impl Default for AdminNotifyPolicy {
    fn default() -> Self {
        AdminNotifyPolicy::FirstOnly
    }
}

impl std::str::FromStr for AdminNotifyPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(AdminNotifyPolicy::Disabled),
            "first_only" => Ok(AdminNotifyPolicy::FirstOnly),
            "always" => Ok(AdminNotifyPolicy::Always),
            other => Err(DomainError::InvalidPolicy(other.to_string())),
        }
    }
}

/// Persisted state of one fault signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    /// Whether this occurrence should trigger an admin notification
    pub should_notify: bool,
    /// Human-readable recurrence summary, prepended to notification mails
    pub pretty_info: String,
    /// How many times this signature has been seen
    pub seen_count: u64,
    /// First time the signature was recorded
    pub first_seen: DateTime<Utc>,
    /// Most recent time the signature was recorded
    pub last_seen: DateTime<Utc>,
}

impl OccurrenceRecord {
    /// Record for a signature seen for the first time.
    pub fn first(now: DateTime<Utc>) -> Self {
        Self {
            should_notify: true,
            pretty_info: String::new(),
            seen_count: 1,
            first_seen: now,
            last_seen: now,
        }
    }

    /// Builds the recurrence summary for notification mails.
    pub fn summarize(&self, signature: &super::fault::FaultSignature) -> String {
        format!(
            "{} has been seen {} time(s) since {} (last: {})",
            signature,
            self.seen_count,
            self.first_seen.format("%Y-%m-%d %H:%M:%S"),
            self.last_seen.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}
