//! Survey response quality screening configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SurveyQualityConfig {
    /// Fraction of the median below which a response is too fast. Default: 0.2.
    pub fast_ratio: Option<f64>,
    /// Multiple of the median above which a response is too slow. Default: 5.0.
    pub slow_ratio: Option<f64>,
    /// Flagged share that triggers the penalty. Default: 0.10.
    pub max_outlier_share: Option<f64>,
    /// Score penalty. Default: 20.
    pub penalty: Option<u32>,
}

impl SurveyQualityConfig {
    pub fn effective_fast_ratio(&self) -> f64 {
        self.fast_ratio.unwrap_or(constants::DEFAULT_FAST_RATIO)
    }

    pub fn effective_slow_ratio(&self) -> f64 {
        self.slow_ratio.unwrap_or(constants::DEFAULT_SLOW_RATIO)
    }

    pub fn effective_max_outlier_share(&self) -> f64 {
        self.max_outlier_share
            .unwrap_or(constants::DEFAULT_MAX_OUTLIER_SHARE)
    }

    pub fn effective_penalty(&self) -> u32 {
        self.penalty.unwrap_or(constants::DEFAULT_QUALITY_PENALTY)
    }
}
