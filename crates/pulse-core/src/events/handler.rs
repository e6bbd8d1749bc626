//! AnalyticsEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for reacting to analytics outcomes (alerting, focus-group creation).
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. `Send + Sync` is required
/// because batch runs dispatch from worker threads.
pub trait AnalyticsEventHandler: Send + Sync {
    // ---- Outliers ----
    fn on_outlier_recorded(&self, _event: &OutlierRecordedEvent) {}
    fn on_duplicate_suppressed(&self, _event: &DuplicateSuppressedEvent) {}

    // ---- KPIs ----
    fn on_kpi_alert(&self, _event: &KpiAlertEvent) {}

    // ---- Batch ----
    fn on_batch_item_failed(&self, _event: &BatchItemFailedEvent) {}
    fn on_batch_complete(&self, _event: &BatchCompleteEvent) {}
}
