//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::AnalyticsEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AnalyticsEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn AnalyticsEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn AnalyticsEventHandler)>(&self, event_name: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::error!(event = event_name, "event handler panicked");
            }
        }
    }

    // ---- Outliers ----
    pub fn emit_outlier_recorded(&self, event: &OutlierRecordedEvent) {
        self.emit("outlier_recorded", |h| h.on_outlier_recorded(event));
    }

    pub fn emit_duplicate_suppressed(&self, event: &DuplicateSuppressedEvent) {
        self.emit("duplicate_suppressed", |h| h.on_duplicate_suppressed(event));
    }

    // ---- KPIs ----
    pub fn emit_kpi_alert(&self, event: &KpiAlertEvent) {
        self.emit("kpi_alert", |h| h.on_kpi_alert(event));
    }

    // ---- Batch ----
    pub fn emit_batch_item_failed(&self, event: &BatchItemFailedEvent) {
        self.emit("batch_item_failed", |h| h.on_batch_item_failed(event));
    }

    pub fn emit_batch_complete(&self, event: &BatchCompleteEvent) {
        self.emit("batch_complete", |h| h.on_batch_complete(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
