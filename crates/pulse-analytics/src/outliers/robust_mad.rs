//! Median/MAD detection.
//!
//! Flags `|value - median| > 2.5 * mad`. The multiplier is fixed policy and
//! the method has a single severity tier. With MAD = 0 any value off the
//! median is flagged.

use crate::samples::MetricSample;
use crate::stats;

use super::policy;
use super::types::{factor_number, DeviationType, OutlierMethod, OutlierResult};

pub fn detect(samples: &[MetricSample]) -> Vec<OutlierResult> {
    if samples.len() < policy::MIN_ROBUST_MAD_POPULATION {
        return Vec::new();
    }

    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let (Ok(median), Ok(mad)) = (stats::median(&values), stats::mad(&values)) else {
        return Vec::new();
    };
    let limit = policy::MAD_MULTIPLIER * mad;

    samples
        .iter()
        .filter_map(|sample| {
            let distance = (sample.value - median).abs();
            if distance <= limit {
                return None;
            }
            Some(OutlierResult {
                entity_id: sample.entity_id.clone(),
                score: sample.value,
                deviation_type: if sample.value < median {
                    DeviationType::Low
                } else {
                    DeviationType::High
                },
                severity: policy::robust_mad_severity(),
                method: OutlierMethod::RobustMad,
                factors: [
                    "Isolation Forest outlier".to_string(),
                    format!(
                        "Deviation from median: {}",
                        factor_number(stats::round_to(distance, 2))
                    ),
                ]
                .into_iter()
                .collect(),
                z_score: None,
                confidence: None,
                deviation: distance,
            })
        })
        .collect()
}
