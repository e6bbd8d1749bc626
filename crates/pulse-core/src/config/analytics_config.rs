//! Outlier analytics configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for outlier detection defaults and threshold bounds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Default method label (`z_score`, `iqr`, `isolation_forest`). Default: `z_score`.
    pub default_method: Option<String>,
    /// Default threshold when the caller supplies none. Default: 2.0.
    pub default_threshold: Option<f64>,
    /// Lowest threshold accepted for z-score/robust detection. Default: 1.0.
    pub min_threshold: Option<f64>,
    /// Highest threshold accepted for z-score/robust detection. Default: 5.0.
    pub max_threshold: Option<f64>,
    /// Flag share (percent) above which a run logs a warning. Default: 25.0.
    pub max_outlier_percentage_warn: Option<f64>,
}

impl AnalyticsConfig {
    pub fn effective_default_method(&self) -> &str {
        self.default_method
            .as_deref()
            .unwrap_or(constants::DEFAULT_OUTLIER_METHOD)
    }

    pub fn effective_default_threshold(&self) -> f64 {
        self.default_threshold
            .unwrap_or(constants::DEFAULT_OUTLIER_THRESHOLD)
    }

    pub fn effective_min_threshold(&self) -> f64 {
        self.min_threshold.unwrap_or(constants::DEFAULT_MIN_THRESHOLD)
    }

    pub fn effective_max_threshold(&self) -> f64 {
        self.max_threshold.unwrap_or(constants::DEFAULT_MAX_THRESHOLD)
    }

    pub fn effective_max_outlier_percentage_warn(&self) -> f64 {
        self.max_outlier_percentage_warn
            .unwrap_or(constants::DEFAULT_MAX_OUTLIER_PERCENTAGE_WARN)
    }
}

/// Configuration for stored outlier summaries.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutlierSummaryConfig {
    /// Days counted as "recent". Default: 7.
    pub recent_window_days: Option<u32>,
}

impl OutlierSummaryConfig {
    pub fn effective_recent_window_days(&self) -> u32 {
        self.recent_window_days
            .unwrap_or(constants::DEFAULT_RECENT_WINDOW_DAYS)
    }
}
