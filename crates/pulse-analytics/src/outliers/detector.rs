//! Method dispatch, threshold validation, and result ordering.

use std::cmp::Ordering;

use pulse_core::config::AnalyticsConfig;
use pulse_core::constants;
use pulse_core::errors::AnalyticsError;
use pulse_core::tracing::metrics;

use crate::samples::Population;

use super::types::{OutlierMethod, OutlierResult};
use super::{iqr, robust_mad, zscore};

/// A validated method/threshold pair.
///
/// Construction is the configuration boundary: an unknown method or a
/// threshold outside the accepted range fails here, so `detect` itself
/// never errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionConfig {
    method: OutlierMethod,
    threshold: f64,
}

impl DetectionConfig {
    /// Validate against the default `[1.0, 5.0]` range for z-score/robust.
    pub fn new(method: OutlierMethod, threshold: f64) -> Result<Self, AnalyticsError> {
        Self::with_bounds(
            method,
            threshold,
            constants::DEFAULT_MIN_THRESHOLD,
            constants::DEFAULT_MAX_THRESHOLD,
        )
    }

    /// Validate with explicit bounds. IQR only requires a positive multiplier.
    pub fn with_bounds(
        method: OutlierMethod,
        threshold: f64,
        min: f64,
        max: f64,
    ) -> Result<Self, AnalyticsError> {
        if !threshold.is_finite() {
            return Err(AnalyticsError::NonFiniteThreshold(threshold));
        }
        let in_range = match method {
            OutlierMethod::Iqr => threshold > 0.0,
            OutlierMethod::ZScore | OutlierMethod::RobustMad => {
                (min..=max).contains(&threshold)
            }
        };
        if !in_range {
            let (min, max) = match method {
                OutlierMethod::Iqr => (0.0, f64::INFINITY),
                _ => (min, max),
            };
            return Err(AnalyticsError::ThresholdOutOfRange {
                method: method.external_label().to_string(),
                threshold,
                min,
                max,
            });
        }
        Ok(Self { method, threshold })
    }

    /// Parse a method label and validate with the default range.
    pub fn from_label(label: &str, threshold: f64) -> Result<Self, AnalyticsError> {
        Self::new(OutlierMethod::parse(label)?, threshold)
    }

    /// Resolve a request against configured defaults and bounds.
    pub fn from_config(
        config: &AnalyticsConfig,
        method: Option<&str>,
        threshold: Option<f64>,
    ) -> Result<Self, AnalyticsError> {
        let method = OutlierMethod::parse(method.unwrap_or(config.effective_default_method()))?;
        Self::with_bounds(
            method,
            threshold.unwrap_or(config.effective_default_threshold()),
            config.effective_min_threshold(),
            config.effective_max_threshold(),
        )
    }

    pub fn method(&self) -> OutlierMethod {
        self.method
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Detect outliers in `population`.
///
/// Returns an empty result below the method's minimum population size.
/// Results are sorted by descending deviation, ties by entity id.
pub fn detect(population: &Population, config: &DetectionConfig) -> Vec<OutlierResult> {
    let samples = population.samples();
    let mut results = match config.method {
        OutlierMethod::ZScore => zscore::detect(samples, config.threshold),
        OutlierMethod::Iqr => iqr::detect(samples, config.threshold),
        OutlierMethod::RobustMad => robust_mad::detect(samples),
    };
    sort_by_deviation(&mut results);

    tracing::debug!(
        { metrics::OUTLIER_METHOD } = config.method.name(),
        { metrics::POPULATION_SIZE } = samples.len(),
        { metrics::OUTLIERS_FLAGGED } = results.len(),
        category = %population.category(),
        "outlier detection complete"
    );
    results
}

pub(crate) fn sort_by_deviation(results: &mut [OutlierResult]) {
    results.sort_by(|a, b| {
        b.deviation
            .partial_cmp(&a.deviation)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.entity_id.cmp(&b.entity_id))
    });
}
