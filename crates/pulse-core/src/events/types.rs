//! Event payload types.

/// Payload for `on_outlier_recorded`.
#[derive(Debug, Clone)]
pub struct OutlierRecordedEvent {
    pub record_id: u64,
    pub entity_id: String,
    pub category: String,
    pub severity: String,
    pub method: String,
}

/// Payload for `on_duplicate_suppressed`.
#[derive(Debug, Clone)]
pub struct DuplicateSuppressedEvent {
    pub entity_id: String,
    pub category: String,
    /// Id of the unresolved record that already covers this detection,
    /// `None` when the duplicate came from the same batch.
    pub existing_record_id: Option<u64>,
}

/// Payload for `on_kpi_alert`.
#[derive(Debug, Clone)]
pub struct KpiAlertEvent {
    pub kpi_id: String,
    pub name: String,
    pub current_value: f64,
    pub target_value: f64,
    pub deviation_percentage: f64,
}

/// Payload for `on_batch_item_failed`.
#[derive(Debug, Clone)]
pub struct BatchItemFailedEvent {
    pub item: String,
    pub message: String,
    pub error_code: String,
}

/// Payload for `on_batch_complete`.
#[derive(Debug, Clone)]
pub struct BatchCompleteEvent {
    pub succeeded: usize,
    pub failed: usize,
    pub duration_ms: u64,
}
