//! Population z-score detection.
//!
//! `z = (value - mean) / stddev` with stddev dividing by N. A population with
//! zero spread has z = 0 everywhere and flags nothing.

use crate::samples::MetricSample;
use crate::stats;

use super::policy;
use super::types::{factor_number, DeviationType, OutlierMethod, OutlierResult};

/// Flag every sample with `|z| >= threshold`. Results are in input order.
pub fn detect(samples: &[MetricSample], threshold: f64) -> Vec<OutlierResult> {
    if samples.len() < policy::MIN_ZSCORE_POPULATION {
        return Vec::new();
    }

    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let (Ok(mean), Ok(stddev)) = (stats::mean(&values), stats::population_stddev(&values)) else {
        return Vec::new();
    };
    if stddev <= 0.0 || !stddev.is_finite() {
        return Vec::new();
    }

    samples
        .iter()
        .filter_map(|sample| {
            let z = (sample.value - mean) / stddev;
            let abs_z = z.abs();
            if abs_z < threshold {
                return None;
            }
            let z_rounded = stats::round_to(z, 2);
            Some(OutlierResult {
                entity_id: sample.entity_id.clone(),
                score: sample.value,
                deviation_type: if z < 0.0 {
                    DeviationType::Low
                } else {
                    DeviationType::High
                },
                severity: policy::zscore_severity(abs_z),
                method: OutlierMethod::ZScore,
                factors: [
                    format!("Z-score: {}", factor_number(z_rounded)),
                    format!(
                        "Deviation from mean: {}",
                        factor_number(stats::round_to(sample.value - mean, 2))
                    ),
                ]
                .into_iter()
                .collect(),
                z_score: Some(z_rounded),
                confidence: Some(policy::zscore_confidence(abs_z)),
                deviation: abs_z,
            })
        })
        .collect()
}
