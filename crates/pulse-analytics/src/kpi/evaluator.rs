//! KPI evaluation against target, alert bounds, and measurement history.

use crate::samples::TimeSeries;
use crate::stats::{self, round_to};
use crate::trends::{halves_trend_classification, linear_trend_percentage, TrendDirection};

use super::policy;
use super::types::{KpiAnalyticsResult, KpiDefinition};

/// Evaluate a KPI with only a target.
pub fn evaluate(current: f64, target: Option<f64>, measurements: &TimeSeries) -> KpiAnalyticsResult {
    evaluate_definition(current, &KpiDefinition::with_target(target), measurements)
}

/// Evaluate the latest measurement of a series. `None` for an empty series.
pub fn evaluate_series(
    definition: &KpiDefinition,
    measurements: &TimeSeries,
) -> Option<KpiAnalyticsResult> {
    let current = measurements.latest()?.value;
    Some(evaluate_definition(current, definition, measurements))
}

pub fn evaluate_definition(
    current: f64,
    definition: &KpiDefinition,
    measurements: &TimeSeries,
) -> KpiAnalyticsResult {
    let values = measurements.values();

    let (trend, trend_percentage) = if values.len() < 2 {
        (TrendDirection::InsufficientData, 0.0)
    } else {
        (
            halves_trend_classification(&values),
            round_to(linear_trend_percentage(&values) * 100.0, 2),
        )
    };

    let target = definition.target_value;
    let target_achievement_percentage = target
        .filter(|t| *t != 0.0)
        .map(|t| round_to(current / t * 100.0, 2));
    let deviation_percentage = target
        .and_then(|t| policy::deviation_percentage(current, t))
        .map(|d| round_to(d, 2));

    let variance = if values.len() > 1 {
        stats::population_variance(&values).ok().map(|v| round_to(v, 2))
    } else {
        None
    };

    let result = KpiAnalyticsResult {
        current_value: current,
        average: stats::mean(&values).ok().map(|m| round_to(m, 2)),
        min: values.iter().copied().reduce(f64::min),
        max: values.iter().copied().reduce(f64::max),
        trend,
        trend_percentage,
        target_achievement_percentage,
        on_target: target.map(|t| policy::is_on_target(current, t)),
        variance,
        measurement_count: values.len(),
        deviation_percentage,
        critical_alert: target.is_some_and(|t| policy::is_critical(current, t)),
        threshold_breach: definition.threshold_breach(current),
    };

    tracing::trace!(
        kpi = measurements.entity_id(),
        trend = %result.trend,
        critical = result.critical_alert,
        "kpi evaluated"
    );
    result
}
