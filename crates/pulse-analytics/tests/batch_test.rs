//! Batch recomputation: partial failure, cancellation, and events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pulse_analytics::batch::{BatchRunner, KpiBatchItem, PopulationBatchItem};
use pulse_analytics::kpi::KpiDefinition;
use pulse_analytics::outliers::{DetectionConfig, OutlierMethod};
use pulse_analytics::reconcile::{InMemoryOutlierStore, OutlierRecordStore};
use pulse_analytics::samples::{MetricCategory, MetricSample};
use pulse_core::config::PulseConfig;
use pulse_core::errors::{BatchError, PulseErrorCode};
use pulse_core::events::types::{BatchCompleteEvent, BatchItemFailedEvent};
use pulse_core::events::{AnalyticsEventHandler, EventDispatcher};
use pulse_core::traits::Cancellable;

#[derive(Default)]
struct BatchCounter {
    failed: AtomicUsize,
    completed: AtomicUsize,
}

impl AnalyticsEventHandler for BatchCounter {
    fn on_batch_item_failed(&self, _event: &BatchItemFailedEvent) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_batch_complete(&self, _event: &BatchCompleteEvent) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

fn kpi(kpi_id: &str, target: f64, values: &[f64]) -> KpiBatchItem {
    KpiBatchItem {
        kpi_id: kpi_id.into(),
        definition: KpiDefinition::with_target(Some(target)),
        measurements: values
            .iter()
            .enumerate()
            .map(|(i, &v)| MetricSample::new(kpi_id, v, i as i64 * 86_400))
            .collect(),
    }
}

fn population(category: MetricCategory, outlier: f64) -> PopulationBatchItem {
    let mut samples: Vec<MetricSample> = (0..16)
        .map(|i| MetricSample::new(format!("emp-{i:02}"), 70.0, 0))
        .collect();
    samples.push(MetricSample::new("emp-16", outlier, 0));
    PopulationBatchItem { category, samples }
}

#[test]
fn test_kpi_batch_skips_failures() {
    let counter = Arc::new(BatchCounter::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(counter.clone());
    let runner = BatchRunner::new(&PulseConfig::default(), dispatcher);

    let items: Vec<KpiBatchItem> = (0..50)
        .map(|i| kpi(&format!("kpi-{i}"), 100.0, &[90.0, 95.0, 100.0 + i as f64]))
        .chain(std::iter::once(kpi("broken", 100.0, &[f64::NAN])))
        .collect();
    let result = runner.run_kpi_batch(&items);

    assert_eq!(result.data.len(), 50);
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors[0].0, "broken");
    assert_eq!(result.errors[0].1.error_code(), "INVALID_SAMPLE");
    assert_eq!(counter.failed.load(Ordering::SeqCst), 1);
    assert_eq!(counter.completed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_outlier_batch_reconciles_per_category() {
    let runner = BatchRunner::new(&PulseConfig::default(), EventDispatcher::new());
    let config = DetectionConfig::new(OutlierMethod::ZScore, 2.0).unwrap();
    let mut store = InMemoryOutlierStore::new();
    let mut duplicate = population(MetricCategory::Performance, 10.0);
    duplicate.samples.push(MetricSample::new("emp-00", 71.0, 0));

    let items = vec![
        population(MetricCategory::Engagement, 10.0),
        population(MetricCategory::Satisfaction, 140.0),
        duplicate,
    ];
    let result = runner.run_outlier_batch(&items, &config, &mut store, 1_700_000_000);

    assert_eq!(result.data.len(), 2);
    assert_eq!(result.error_count(), 1);
    assert!(matches!(result.errors[0].1, BatchError::Sample(_)));
    assert_eq!(store.records().unwrap().len(), 2);

    let rerun = runner.run_outlier_batch(&items[..2], &config, &mut store, 1_700_000_100);
    assert!(rerun.data.iter().all(|c| c.reconciled.persisted.is_empty()));
    assert_eq!(store.records().unwrap().len(), 2);
}

#[test]
fn test_cancellation_marks_remaining_items() {
    let runner = BatchRunner::new(&PulseConfig::default(), EventDispatcher::new());
    let token = runner.cancellation_token();
    token.cancel();

    let items = vec![kpi("a", 10.0, &[10.0]), kpi("b", 10.0, &[11.0])];
    let result = runner.run_kpi_batch(&items);
    assert!(result.data.is_empty());
    assert_eq!(result.error_count(), 2);
    assert!(result
        .errors
        .iter()
        .all(|(_, e)| e.error_code() == "CANCELLED"));
}
