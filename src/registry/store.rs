//! In-memory record store using `DashMap`.

use super::{DogFields, DogRecord, RecordStore};
use crate::{Error, Result};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// In-memory [`RecordStore`], keyed by record id.
pub struct MemoryRecordStore {
    records: DashMap<String, DogRecord>,
    next_id: AtomicU64,
}

impl MemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Total records across all owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryRecordStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<DogRecord>> {
        let mut records: Vec<DogRecord> = self
            .records
            .iter()
            .filter(|r| r.owner_id() == owner_id)
            .map(|r| r.value().clone())
            .collect();

        // Insertion order; ids break timestamp ties
        records.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| id_seq(a.id()).cmp(&id_seq(b.id())))
        });

        Ok(records)
    }

    async fn insert(&self, record: DogRecord) -> Result<DogRecord> {
        let id = format!("dog-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = record.with_id(id.clone());
        self.records.insert(id, record.clone());
        debug!(id = record.id(), owner_id = record.owner_id(), "Inserted record");
        Ok(record)
    }

    async fn update(&self, id: &str, fields: DogFields) -> Result<DogRecord> {
        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("dog record {id}")))?;
        record.apply(fields);
        debug!(id, "Updated record");
        Ok(record.value().clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.records
            .remove(id)
            .ok_or_else(|| Error::NotFound(format!("dog record {id}")))?;
        debug!(id, "Deleted record");
        Ok(())
    }
}

fn id_seq(id: &str) -> u64 {
    id.strip_prefix("dog-")
        .and_then(|n| n.parse().ok())
        .unwrap_or(u64::MAX)
}
