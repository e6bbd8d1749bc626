//! Planning and persisting reconciled detections.

use pulse_core::errors::StoreError;
use pulse_core::events::types::{DuplicateSuppressedEvent, OutlierRecordedEvent};
use pulse_core::events::EventDispatcher;
use pulse_core::tracing::metrics;
use pulse_core::types::{FxHashMap, FxHashSet};

use crate::outliers::OutlierResult;
use crate::samples::MetricCategory;

use super::store::OutlierRecordStore;
use super::types::{
    NewOutlierRecord, ReconcileOutcome, ReconciliationPlan, StoredOutlierRecord,
    SuppressedDetection,
};

/// Split `results` into detections to persist and duplicates.
///
/// A detection is a duplicate when an unresolved record of `category`
/// exists for its entity, or when the same entity already appeared earlier
/// in `results`. Input order is preserved.
pub fn reconcile(
    category: MetricCategory,
    results: &[OutlierResult],
    unresolved: &[StoredOutlierRecord],
) -> ReconciliationPlan {
    let existing: FxHashMap<&str, u64> = unresolved
        .iter()
        .filter(|r| r.category == category && !r.is_resolved())
        .map(|r| (r.entity_id.as_str(), r.id))
        .collect();

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut plan = ReconciliationPlan::default();
    for result in results {
        let entity_id = result.entity_id.as_str();
        if let Some(&record_id) = existing.get(entity_id) {
            plan.suppressed.push(SuppressedDetection {
                entity_id: entity_id.to_string(),
                existing_record_id: Some(record_id),
            });
        } else if !seen.insert(entity_id) {
            plan.suppressed.push(SuppressedDetection {
                entity_id: entity_id.to_string(),
                existing_record_id: None,
            });
        } else {
            plan.to_persist.push(result.clone());
        }
    }
    plan
}

/// Reconcile against the store's unresolved records and insert the new ones.
///
/// Emits an event per persisted record and per suppressed duplicate. A store
/// error aborts the call; records inserted before it stay persisted.
pub fn reconcile_and_persist<S: OutlierRecordStore + ?Sized>(
    store: &mut S,
    category: MetricCategory,
    results: &[OutlierResult],
    now: i64,
    dispatcher: &EventDispatcher,
) -> Result<ReconcileOutcome, StoreError> {
    let unresolved = store.unresolved(category)?;
    let plan = reconcile(category, results, &unresolved);

    let mut outcome = ReconcileOutcome {
        persisted: Vec::with_capacity(plan.to_persist.len()),
        suppressed: plan.suppressed.len(),
    };

    for duplicate in &plan.suppressed {
        dispatcher.emit_duplicate_suppressed(&DuplicateSuppressedEvent {
            entity_id: duplicate.entity_id.clone(),
            category: category.name().to_string(),
            existing_record_id: duplicate.existing_record_id,
        });
    }

    for result in &plan.to_persist {
        let stored = store.insert(NewOutlierRecord::from_result(result, category, now))?;
        dispatcher.emit_outlier_recorded(&OutlierRecordedEvent {
            record_id: stored.id,
            entity_id: stored.entity_id.clone(),
            category: category.name().to_string(),
            severity: stored.severity.name().to_string(),
            method: stored.method.external_label().to_string(),
        });
        outcome.persisted.push(stored);
    }

    tracing::debug!(
        category = %category,
        { metrics::RECORDS_PERSISTED } = outcome.persisted.len(),
        { metrics::DUPLICATES_SUPPRESSED } = outcome.suppressed,
        "outlier reconciliation complete"
    );
    Ok(outcome)
}
