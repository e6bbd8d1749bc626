//! KPI dashboard configuration.
//!
//! The on-target band and critical deviation are fixed policy and are not
//! configurable here.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KpiConfig {
    /// Most recent measurements used for momentum. Default: 5.
    pub trend_window: Option<usize>,
    /// Minimum measurements for momentum. Default: 3.
    pub trend_min_points: Option<usize>,
    /// Linear trend fraction that counts as trending. Default: 0.05.
    pub momentum_threshold: Option<f64>,
    /// Maximum alerts in a dashboard summary. Default: 10.
    pub alert_limit: Option<usize>,
}

impl KpiConfig {
    pub fn effective_trend_window(&self) -> usize {
        self.trend_window.unwrap_or(constants::DEFAULT_TREND_WINDOW)
    }

    pub fn effective_trend_min_points(&self) -> usize {
        self.trend_min_points
            .unwrap_or(constants::DEFAULT_TREND_MIN_POINTS)
    }

    pub fn effective_momentum_threshold(&self) -> f64 {
        self.momentum_threshold
            .unwrap_or(constants::DEFAULT_MOMENTUM_THRESHOLD)
    }

    pub fn effective_alert_limit(&self) -> usize {
        self.alert_limit.unwrap_or(constants::DEFAULT_ALERT_LIMIT)
    }
}
