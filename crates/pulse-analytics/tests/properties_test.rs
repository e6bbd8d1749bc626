//! Property-based tests for detection and reconciliation invariants.

use proptest::prelude::*;

use pulse_analytics::outliers::policy::zscore_severity;
use pulse_analytics::outliers::{detect, DetectionConfig, OutlierMethod};
use pulse_analytics::reconcile::{reconcile_and_persist, InMemoryOutlierStore};
use pulse_analytics::samples::{MetricCategory, MetricSample, Population};
use pulse_analytics::trends::linear_trend_percentage;
use pulse_core::events::EventDispatcher;

fn population(values: &[f64]) -> Population {
    let samples = values
        .iter()
        .enumerate()
        .map(|(i, &v)| MetricSample::new(format!("emp-{i:04}"), v, 0))
        .collect();
    Population::new(MetricCategory::Performance, samples).unwrap()
}

fn method() -> impl Strategy<Value = OutlierMethod> {
    prop_oneof![
        Just(OutlierMethod::ZScore),
        Just(OutlierMethod::Iqr),
        Just(OutlierMethod::RobustMad),
    ]
}

proptest! {
    /// Below the method minimum nothing is ever flagged.
    #[test]
    fn prop_below_minimum_is_empty(
        method in method(),
        threshold in 1.0f64..5.0,
        values in prop::collection::vec(-1000.0f64..1000.0, 0..3),
    ) {
        let config = DetectionConfig::new(method, threshold).unwrap();
        prop_assert!(detect(&population(&values), &config).is_empty());
    }

    /// Detection is deterministic and leaves the population untouched.
    #[test]
    fn prop_deterministic_and_non_mutating(
        method in method(),
        threshold in 1.0f64..5.0,
        values in prop::collection::vec(1.0f64..5.0, 3..120),
    ) {
        let pop = population(&values);
        let before = pop.clone();
        let config = DetectionConfig::new(method, threshold).unwrap();
        let first = detect(&pop, &config);
        let second = detect(&pop, &config);
        prop_assert_eq!(first, second);
        prop_assert_eq!(pop, before);
    }

    /// Results are always sorted by descending deviation.
    #[test]
    fn prop_sorted_by_deviation(
        method in method(),
        values in prop::collection::vec(0.0f64..100.0, 4..120),
    ) {
        let config = DetectionConfig::new(method, 1.5).unwrap();
        let results = detect(&population(&values), &config);
        for pair in results.windows(2) {
            prop_assert!(pair[0].deviation >= pair[1].deviation);
        }
    }

    /// Identical values never produce a z-score outlier.
    #[test]
    fn prop_zero_variance_zscore_empty(value in -100.0f64..100.0, n in 3usize..200) {
        let config = DetectionConfig::new(OutlierMethod::ZScore, 1.0).unwrap();
        prop_assert!(detect(&population(&vec![value; n]), &config).is_empty());
    }

    /// A larger |z| never yields a lower severity tier.
    #[test]
    fn prop_zscore_severity_monotonic(a in 0.0f64..10.0, b in 0.0f64..10.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(zscore_severity(hi) >= zscore_severity(lo));
    }

    /// Every flagged z-score entity really crosses the threshold.
    #[test]
    fn prop_zscore_flags_respect_threshold(
        threshold in 1.0f64..5.0,
        values in prop::collection::vec(0.0f64..100.0, 3..80),
    ) {
        let config = DetectionConfig::new(OutlierMethod::ZScore, threshold).unwrap();
        for result in detect(&population(&values), &config) {
            prop_assert!(result.deviation >= threshold);
            prop_assert!(result.confidence.unwrap_or(0.0) <= 99.0);
        }
    }

    /// A second reconciliation of the same detections persists nothing.
    #[test]
    fn prop_reconciliation_idempotent(
        method in method(),
        values in prop::collection::vec(0.0f64..100.0, 4..60),
    ) {
        let config = DetectionConfig::new(method, 1.5).unwrap();
        let results = detect(&population(&values), &config);
        let dispatcher = EventDispatcher::new();
        let mut store = InMemoryOutlierStore::new();
        let first = reconcile_and_persist(
            &mut store, MetricCategory::Performance, &results, 0, &dispatcher,
        ).unwrap();
        let second = reconcile_and_persist(
            &mut store, MetricCategory::Performance, &results, 1, &dispatcher,
        ).unwrap();
        prop_assert_eq!(first.persisted.len(), results.len());
        prop_assert!(second.persisted.is_empty());
        prop_assert_eq!(second.suppressed, results.len());
    }

    /// A constant series has no trend.
    #[test]
    fn prop_constant_series_no_trend(value in 1.0f64..1000.0, n in 2usize..50) {
        prop_assert!(linear_trend_percentage(&vec![value; n]).abs() < 1e-9);
    }
}
