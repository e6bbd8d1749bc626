//! Parallel batch runner.

use std::time::Instant;

use pulse_core::config::PulseConfig;
use pulse_core::errors::{AnalyticsError, BatchError, BatchResult, PulseErrorCode};
use pulse_core::events::types::{BatchCompleteEvent, BatchItemFailedEvent};
use pulse_core::events::EventDispatcher;
use pulse_core::tracing::metrics;
use pulse_core::traits::{Cancellable, CancellationToken};
use rayon::prelude::*;

use crate::kpi::evaluate_series;
use crate::outliers::{detect_with_report, DetectionConfig, DetectionReport};
use crate::reconcile::{reconcile_and_persist, OutlierRecordStore};
use crate::samples::{Population, TimeSeries};

use super::types::{CategoryOutcome, KpiBatchItem, KpiBatchOutput, PopulationBatchItem};

/// Runs KPI and outlier recomputation over many items.
///
/// CPU work fans out over rayon, on a dedicated pool when a thread count is
/// configured. Cancellation is checked before each item; items not started
/// when the token fires are reported as cancelled.
pub struct BatchRunner {
    pool: Option<rayon::ThreadPool>,
    cancel: CancellationToken,
    dispatcher: EventDispatcher,
    max_outlier_percentage_warn: f64,
}

impl BatchRunner {
    pub fn new(config: &PulseConfig, dispatcher: EventDispatcher) -> Self {
        let threads = config.batch.effective_threads();
        let pool = if threads > 0 {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    tracing::warn!(threads, error = %e, "falling back to the global rayon pool");
                    None
                }
            }
        } else {
            None
        };
        Self {
            pool,
            cancel: CancellationToken::new(),
            dispatcher,
            max_outlier_percentage_warn: config.analytics.effective_max_outlier_percentage_warn(),
        }
    }

    /// Token shared with this runner; cancelling it stops later items.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Evaluate every KPI against its latest measurement.
    pub fn run_kpi_batch(&self, items: &[KpiBatchItem]) -> BatchResult<Vec<KpiBatchOutput>> {
        let started = Instant::now();
        let outcomes: Vec<(String, Result<KpiBatchOutput, BatchError>)> = self.install(|| {
            items
                .par_iter()
                .map(|item| (item.kpi_id.clone(), self.evaluate_item(item)))
                .collect()
        });
        self.collect(outcomes, started)
    }

    fn evaluate_item(&self, item: &KpiBatchItem) -> Result<KpiBatchOutput, BatchError> {
        self.check_cancelled(&item.kpi_id)?;
        let series = TimeSeries::new(item.kpi_id.clone(), item.measurements.clone())?;
        let result = evaluate_series(&item.definition, &series).ok_or(
            AnalyticsError::InsufficientData {
                required: 1,
                actual: 0,
            },
        )?;
        Ok(KpiBatchOutput {
            kpi_id: item.kpi_id.clone(),
            result,
        })
    }

    /// Detect outliers per category in parallel, then reconcile serially
    /// against `store` in input order.
    pub fn run_outlier_batch<S: OutlierRecordStore + ?Sized>(
        &self,
        items: &[PopulationBatchItem],
        config: &DetectionConfig,
        store: &mut S,
        now: i64,
    ) -> BatchResult<Vec<CategoryOutcome>> {
        let started = Instant::now();
        let reports: Vec<(String, Result<DetectionReport, BatchError>)> = self.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let label = item.category.name().to_string();
                    (label, self.detect_item(item, config))
                })
                .collect()
        });

        let outcomes = reports
            .into_iter()
            .map(|(label, report)| {
                let outcome = report.and_then(|report| {
                    self.check_cancelled(&label)?;
                    let reconciled = reconcile_and_persist(
                        &mut *store,
                        report.category,
                        &report.outliers,
                        now,
                        &self.dispatcher,
                    )?;
                    Ok(CategoryOutcome {
                        category: report.category,
                        report,
                        reconciled,
                    })
                });
                (label, outcome)
            })
            .collect();
        self.collect(outcomes, started)
    }

    fn detect_item(
        &self,
        item: &PopulationBatchItem,
        config: &DetectionConfig,
    ) -> Result<DetectionReport, BatchError> {
        self.check_cancelled(item.category.name())?;
        let population = Population::new(item.category, item.samples.clone())?;
        let report = detect_with_report(&population, config);
        if report.exceeds_share(self.max_outlier_percentage_warn) {
            tracing::warn!(
                category = %item.category,
                outlier_percentage = report.outlier_percentage,
                limit = self.max_outlier_percentage_warn,
                "unusually high share of entities flagged"
            );
        }
        Ok(report)
    }

    fn check_cancelled(&self, item: &str) -> Result<(), BatchError> {
        if self.cancel.is_cancelled() {
            return Err(BatchError::Cancelled {
                item: item.to_string(),
            });
        }
        Ok(())
    }

    /// Split per-item outcomes into data and non-fatal errors, emitting events.
    fn collect<T: Send>(
        &self,
        outcomes: Vec<(String, Result<T, BatchError>)>,
        started: Instant,
    ) -> BatchResult<Vec<T>> {
        let mut result = BatchResult::new(Vec::with_capacity(outcomes.len()));
        for (item, outcome) in outcomes {
            match outcome {
                Ok(data) => result.data.push(data),
                Err(error) => {
                    tracing::warn!(item = %item, error = %error, "batch item skipped");
                    self.dispatcher.emit_batch_item_failed(&BatchItemFailedEvent {
                        item: item.clone(),
                        message: error.to_string(),
                        error_code: error.error_code().to_string(),
                    });
                    result.add_error(item, error);
                }
            }
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        self.dispatcher.emit_batch_complete(&BatchCompleteEvent {
            succeeded: result.data.len(),
            failed: result.error_count(),
            duration_ms,
        });
        tracing::info!(
            succeeded = result.data.len(),
            { metrics::BATCH_FAILURES } = result.error_count(),
            { metrics::BATCH_DURATION_MS } = duration_ms,
            "batch complete"
        );
        result
    }
}

impl std::fmt::Debug for BatchRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRunner")
            .field("dedicated_pool", &self.pool.is_some())
            .field("cancelled", &self.cancel.is_cancelled())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
