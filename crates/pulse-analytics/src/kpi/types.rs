//! KPI definitions, results, and dashboard types.

use serde::{Deserialize, Serialize};

use crate::trends::TrendDirection;

/// Target and alert bounds of a KPI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiDefinition {
    pub target_value: Option<f64>,
    pub alert_threshold_low: Option<f64>,
    pub alert_threshold_high: Option<f64>,
}

impl KpiDefinition {
    pub fn with_target(target_value: Option<f64>) -> Self {
        Self {
            target_value,
            ..Default::default()
        }
    }

    /// Which configured alert bound `value` crosses, if any.
    pub fn threshold_breach(&self, value: f64) -> Option<ThresholdBreach> {
        if self.alert_threshold_low.is_some_and(|low| value < low) {
            Some(ThresholdBreach::BelowLow)
        } else if self.alert_threshold_high.is_some_and(|high| value > high) {
            Some(ThresholdBreach::AboveHigh)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBreach {
    BelowLow,
    AboveHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiAnalyticsResult {
    pub current_value: f64,
    /// 2 decimals. `None` without measurements.
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub trend: TrendDirection,
    /// Linear trend in percent, 2 decimals.
    pub trend_percentage: f64,
    /// `current / target * 100`, 2 decimals. Omitted without a nonzero target.
    pub target_achievement_percentage: Option<f64>,
    pub on_target: Option<bool>,
    /// Population variance, 2 decimals. `None` below 2 measurements.
    pub variance: Option<f64>,
    pub measurement_count: usize,
    /// `|current - target| / target * 100`, 2 decimals.
    pub deviation_percentage: Option<f64>,
    pub critical_alert: bool,
    pub threshold_breach: Option<ThresholdBreach>,
}

/// Current state of one KPI as seen by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub kpi_id: String,
    pub name: String,
    pub priority: Option<String>,
    pub current_value: Option<f64>,
    pub target_value: Option<f64>,
    /// Oldest first.
    pub recent_values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiAlert {
    pub kpi_id: String,
    pub name: String,
    pub current_value: f64,
    pub target_value: f64,
    /// 2 decimals.
    pub deviation_percentage: f64,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiDashboardSummary {
    pub total: usize,
    /// KPIs with a target, measured or not.
    pub with_targets: usize,
    pub on_target: usize,
    pub off_target: usize,
    /// KPIs with a target but no current value.
    pub without_data: usize,
    /// `on_target / with_targets * 100`, 2 decimals.
    pub target_achievement_rate: f64,
    pub trending_up: usize,
    pub trending_down: usize,
    pub alerts: Vec<KpiAlert>,
}
