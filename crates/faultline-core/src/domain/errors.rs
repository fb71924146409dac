//! Domain error types
//!
//! Validation failures for values the domain parses itself: schedule time
//! windows and notification policy names.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid emergency-schedule time window (expected `HH:MM-HH:MM`,
    /// optionally prefixed with a weekday)
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),

    /// Unknown admin notification policy name
    #[error("Invalid notify policy: {0}")]
    InvalidPolicy(String),
}
