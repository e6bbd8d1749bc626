//! Detection with summary counts and an explicit insufficient-data flag.

use serde::{Deserialize, Serialize};

use crate::samples::{MetricCategory, Population};
use crate::stats;

use super::detector::{detect, DetectionConfig};
use super::policy::POLICY_VERSION;
use super::types::{OutlierMethod, OutlierResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub outliers: Vec<OutlierResult>,
    pub total_outliers: usize,
    pub total_analyzed: usize,
    /// Percent of analyzed entities flagged, 2 decimals.
    pub outlier_percentage: f64,
    pub method: OutlierMethod,
    pub threshold: f64,
    pub category: MetricCategory,
    /// The population was below the method minimum, so nothing was analyzed.
    pub insufficient_data: bool,
    /// Severity policy the results were graded under.
    pub policy_version: u32,
}

impl DetectionReport {
    /// True when the flagged share exceeds `max_percentage`.
    pub fn exceeds_share(&self, max_percentage: f64) -> bool {
        self.outlier_percentage > max_percentage
    }
}

/// `detect` plus the counts the HTTP layer reports.
pub fn detect_with_report(population: &Population, config: &DetectionConfig) -> DetectionReport {
    let total_analyzed = population.len();
    let insufficient_data = total_analyzed < config.method().min_population();
    let outliers = detect(population, config);
    let outlier_percentage = if total_analyzed == 0 {
        0.0
    } else {
        stats::round_to(outliers.len() as f64 / total_analyzed as f64 * 100.0, 2)
    };

    DetectionReport {
        total_outliers: outliers.len(),
        outliers,
        total_analyzed,
        outlier_percentage,
        method: config.method(),
        threshold: config.threshold(),
        category: population.category(),
        insufficient_data,
        policy_version: POLICY_VERSION,
    }
}
