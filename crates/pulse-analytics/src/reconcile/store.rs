//! Outlier record store seam and an in-memory implementation.

use pulse_core::errors::StoreError;

use crate::samples::MetricCategory;

use super::types::{NewOutlierRecord, StoredOutlierRecord};

/// Persistence seam for outlier records. Implemented by the caller's
/// persistence layer; `InMemoryOutlierStore` serves tests and embedded use.
pub trait OutlierRecordStore {
    /// Unresolved records of one category.
    fn unresolved(&self, category: MetricCategory) -> Result<Vec<StoredOutlierRecord>, StoreError>;

    /// Insert a record and return it with its assigned id.
    fn insert(&mut self, record: NewOutlierRecord) -> Result<StoredOutlierRecord, StoreError>;

    /// Mark a record resolved. Resolving an already resolved record keeps
    /// the original resolution time.
    fn resolve(&mut self, id: u64, at: i64) -> Result<(), StoreError>;

    /// All records, resolved or not.
    fn records(&self) -> Result<Vec<StoredOutlierRecord>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryOutlierStore {
    records: Vec<StoredOutlierRecord>,
    next_id: u64,
}

impl InMemoryOutlierStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl OutlierRecordStore for InMemoryOutlierStore {
    fn unresolved(&self, category: MetricCategory) -> Result<Vec<StoredOutlierRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.category == category && !r.is_resolved())
            .cloned()
            .collect())
    }

    fn insert(&mut self, record: NewOutlierRecord) -> Result<StoredOutlierRecord, StoreError> {
        self.next_id += 1;
        let stored = StoredOutlierRecord {
            id: self.next_id,
            entity_id: record.entity_id,
            category: record.category,
            severity: record.severity,
            method: record.method,
            score: record.score,
            factors: record.factors,
            identified_at: record.identified_at,
            resolved_at: None,
        };
        self.records.push(stored.clone());
        Ok(stored)
    }

    fn resolve(&mut self, id: u64, at: i64) -> Result<(), StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::RecordNotFound { id })?;
        if record.resolved_at.is_none() {
            record.resolved_at = Some(at);
        }
        Ok(())
    }

    fn records(&self) -> Result<Vec<StoredOutlierRecord>, StoreError> {
        Ok(self.records.clone())
    }
}
