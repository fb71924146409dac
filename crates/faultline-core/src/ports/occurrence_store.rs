//! Occurrence store port (driven/secondary port)
//!
//! Persistent per-signature records used to suppress duplicate admin
//! notifications for recurring faults.
//!
//! ## Design Notes
//!
//! - `get_or_create` must be atomic per signature: concurrent requests
//!   hitting the same fault must not both observe `should_notify == true`
//!   after one of them has notified. That atomicity is the adapter's
//!   responsibility (transaction, entry lock, ...).
//! - Records returned are snapshots; mutating them does not write back.

use crate::domain::{FaultSignature, OccurrenceRecord};

/// Port trait for fault occurrence tracking
#[async_trait::async_trait]
pub trait IOccurrenceStore: Send + Sync {
    /// Fetches the record for `signature`, creating it on first sight, and
    /// increments its seen counter.
    async fn get_or_create(&self, signature: &FaultSignature)
        -> anyhow::Result<OccurrenceRecord>;

    /// Marks the signature as having been notified, suppressing
    /// `should_notify` for subsequent occurrences.
    async fn mark_notified(&self, signature: &FaultSignature) -> anyhow::Result<()>;
}
