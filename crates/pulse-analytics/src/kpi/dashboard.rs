//! Dashboard roll-up across many KPIs.

use std::cmp::Ordering;

use pulse_core::config::KpiConfig;
use pulse_core::events::types::KpiAlertEvent;
use pulse_core::events::EventDispatcher;
use pulse_core::tracing::metrics;

use crate::stats::round_to;
use crate::trends::{classify_momentum, linear_trend_percentage, Momentum};

use super::policy;
use super::types::{KpiAlert, KpiDashboardSummary, KpiSnapshot};

/// Count on/off-target KPIs, momentum, and critical alerts.
///
/// Alerts are sorted by descending deviation and truncated to the configured
/// limit; each kept alert is dispatched as a KPI alert event.
pub fn summarize_dashboard(
    snapshots: &[KpiSnapshot],
    config: &KpiConfig,
    dispatcher: &EventDispatcher,
) -> KpiDashboardSummary {
    let mut summary = KpiDashboardSummary {
        total: snapshots.len(),
        ..Default::default()
    };
    let mut alerts = Vec::new();

    for snapshot in snapshots {
        if let Some(target) = snapshot.target_value {
            summary.with_targets += 1;
            match snapshot.current_value {
                None => summary.without_data += 1,
                Some(current) => {
                    if policy::is_on_target(current, target) {
                        summary.on_target += 1;
                    } else {
                        summary.off_target += 1;
                    }
                    if let Some(alert) = critical_alert(snapshot, current, target) {
                        alerts.push(alert);
                    }
                }
            }
        }

        match momentum(&snapshot.recent_values, config) {
            Some(Momentum::Up) => summary.trending_up += 1,
            Some(Momentum::Down) => summary.trending_down += 1,
            _ => {}
        }
    }

    alerts.sort_by(|a, b| {
        b.deviation_percentage
            .partial_cmp(&a.deviation_percentage)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.kpi_id.cmp(&b.kpi_id))
    });
    alerts.truncate(config.effective_alert_limit());

    for alert in &alerts {
        dispatcher.emit_kpi_alert(&KpiAlertEvent {
            kpi_id: alert.kpi_id.clone(),
            name: alert.name.clone(),
            current_value: alert.current_value,
            target_value: alert.target_value,
            deviation_percentage: alert.deviation_percentage,
        });
    }

    summary.target_achievement_rate = if summary.with_targets == 0 {
        0.0
    } else {
        round_to(summary.on_target as f64 / summary.with_targets as f64 * 100.0, 2)
    };
    summary.alerts = alerts;

    tracing::debug!(
        kpis = summary.total,
        { metrics::KPI_ALERTS } = summary.alerts.len(),
        trending_up = summary.trending_up,
        trending_down = summary.trending_down,
        "kpi dashboard summarized"
    );
    summary
}

fn critical_alert(snapshot: &KpiSnapshot, current: f64, target: f64) -> Option<KpiAlert> {
    if !policy::is_critical(current, target) {
        return None;
    }
    let deviation = policy::deviation_percentage(current, target)?;
    Some(KpiAlert {
        kpi_id: snapshot.kpi_id.clone(),
        name: snapshot.name.clone(),
        current_value: current,
        target_value: target,
        deviation_percentage: round_to(deviation, 2),
        priority: snapshot.priority.clone(),
    })
}

/// Momentum over the most recent `trend_window` values, `None` below the minimum.
fn momentum(recent_values: &[f64], config: &KpiConfig) -> Option<Momentum> {
    let window = config.effective_trend_window();
    let start = recent_values.len().saturating_sub(window);
    let windowed = &recent_values[start..];
    if windowed.len() < config.effective_trend_min_points() {
        return None;
    }
    Some(classify_momentum(
        linear_trend_percentage(windowed),
        config.effective_momentum_threshold(),
    ))
}
