//! Reconciliation of fresh detections against stored unresolved outlier records.
//!
//! A detection is new only when no unresolved record exists for the same
//! entity and category. Re-running detection on unchanged data therefore
//! persists nothing the second time.

pub mod reconciler;
pub mod store;
pub mod summary;
pub mod types;

pub use reconciler::{reconcile, reconcile_and_persist};
pub use store::{InMemoryOutlierStore, OutlierRecordStore};
pub use summary::{summarize_records, OutlierSummary, RecordFilter};
pub use types::{
    NewOutlierRecord, ReconcileOutcome, ReconciliationPlan, StoredOutlierRecord,
    SuppressedDetection,
};
