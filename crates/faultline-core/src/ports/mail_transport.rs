//! Mail transport port (driven/secondary port)
//!
//! Fire-and-forget synchronous-style mail delivery. The reporter sends at
//! most one message per registered fault; emergency notification fans out
//! one message per recipient.
//!
//! ## Design Notes
//!
//! - Delivery failures propagate to the caller; the reporter's outer guard
//!   decides whether they are fatal.
//! - No retry or queueing semantics at this boundary.

/// Port trait for outbound administrator email
#[async_trait::async_trait]
pub trait IMailTransport: Send + Sync {
    /// Sends a single message.
    ///
    /// # Arguments
    /// * `from` - Sender address
    /// * `to` - Recipient address
    /// * `subject` - Message subject
    /// * `body` - Plain-text body
    async fn send(&self, from: &str, to: &str, subject: &str, body: &str)
        -> anyhow::Result<()>;
}
