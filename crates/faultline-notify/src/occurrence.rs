//! In-memory occurrence store
//!
//! Tracks fault signatures for the lifetime of the process. The dashmap entry
//! API gives the per-signature atomicity the port requires without a global
//! lock.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use faultline_core::domain::{FaultSignature, OccurrenceRecord};
use faultline_core::ports::IOccurrenceStore;

/// Process-local occurrence store.
///
/// State does not survive restarts, so every signature notifies again after
/// a restart. A persistent adapter would implement the same port.
#[derive(Default)]
pub struct MemoryOccurrenceStore {
    records: DashMap<FaultSignature, OccurrenceRecord>,
}

impl MemoryOccurrenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct signatures seen.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl IOccurrenceStore for MemoryOccurrenceStore {
    async fn get_or_create(&self, signature: &FaultSignature) -> anyhow::Result<OccurrenceRecord> {
        let now = Utc::now();
        let mut snapshot = match self.records.entry(signature.clone()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                record.seen_count += 1;
                record.last_seen = now;
                record.clone()
            }
            Entry::Vacant(vacant) => vacant.insert(OccurrenceRecord::first(now)).clone(),
        };
        snapshot.pretty_info = snapshot.summarize(signature);
        Ok(snapshot)
    }

    async fn mark_notified(&self, signature: &FaultSignature) -> anyhow::Result<()> {
        if let Some(mut record) = self.records.get_mut(signature) {
            record.should_notify = false;
        }
        Ok(())
    }
}
