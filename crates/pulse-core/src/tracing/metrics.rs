//! Structured field names used in Pulse log events.
//!
//! Keeping the names in one place makes log queries and dashboards stable
//! across modules.

/// Outlier detection: number of entities analyzed.
pub const POPULATION_SIZE: &str = "population_size";

/// Outlier detection: number of entities flagged.
pub const OUTLIERS_FLAGGED: &str = "outliers_flagged";

/// Outlier detection: method label.
pub const OUTLIER_METHOD: &str = "outlier_method";

/// Reconciliation: records persisted.
pub const RECORDS_PERSISTED: &str = "records_persisted";

/// Reconciliation: detections suppressed as duplicates.
pub const DUPLICATES_SUPPRESSED: &str = "duplicates_suppressed";

/// KPI dashboard: critical alerts raised.
pub const KPI_ALERTS: &str = "kpi_alerts";

/// Batch: items skipped after a failure.
pub const BATCH_FAILURES: &str = "batch_failures";

/// Batch: total wall time in milliseconds.
pub const BATCH_DURATION_MS: &str = "batch_duration_ms";
