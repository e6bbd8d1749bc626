//! Outlier record and reconciliation types.

use serde::{Deserialize, Serialize};

use crate::outliers::{OutlierMethod, OutlierResult, Severity};
use crate::samples::MetricCategory;

/// A persisted outlier record as returned by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOutlierRecord {
    pub id: u64,
    pub entity_id: String,
    pub category: MetricCategory,
    pub severity: Severity,
    pub method: OutlierMethod,
    pub score: f64,
    pub factors: Vec<String>,
    /// Unix seconds.
    pub identified_at: i64,
    pub resolved_at: Option<i64>,
}

impl StoredOutlierRecord {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// A record to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOutlierRecord {
    pub entity_id: String,
    pub category: MetricCategory,
    pub severity: Severity,
    pub method: OutlierMethod,
    pub score: f64,
    pub factors: Vec<String>,
    pub identified_at: i64,
}

impl NewOutlierRecord {
    pub fn from_result(result: &OutlierResult, category: MetricCategory, now: i64) -> Self {
        Self {
            entity_id: result.entity_id.clone(),
            category,
            severity: result.severity,
            method: result.method,
            score: result.score,
            factors: result.factors.to_vec(),
            identified_at: now,
        }
    }
}

/// A detection dropped because it is already covered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressedDetection {
    pub entity_id: String,
    /// The unresolved record that covers it, `None` for a repeat within the batch.
    pub existing_record_id: Option<u64>,
}

/// Which detections to persist and which to drop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationPlan {
    pub to_persist: Vec<OutlierResult>,
    pub suppressed: Vec<SuppressedDetection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub persisted: Vec<StoredOutlierRecord>,
    pub suppressed: usize,
}
