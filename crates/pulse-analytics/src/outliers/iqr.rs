//! IQR detection with Tukey fences.
//!
//! Fences are `[q1 - k*iqr, q3 + k*iqr]` with `k` the caller's threshold.
//! A zero IQR collapses both fences onto the quartiles, so any value off
//! them is flagged.

use crate::samples::MetricSample;
use crate::stats;

use super::policy;
use super::types::{factor_number, DeviationType, OutlierMethod, OutlierResult};

pub fn detect(samples: &[MetricSample], multiplier: f64) -> Vec<OutlierResult> {
    if samples.len() < policy::MIN_IQR_POPULATION {
        return Vec::new();
    }

    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let (Ok((q1, q3)), Ok(median)) = (stats::quartiles(&values), stats::median(&values)) else {
        return Vec::new();
    };
    let iqr = q3 - q1;
    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;

    samples
        .iter()
        .filter(|s| s.value < lower || s.value > upper)
        .map(|sample| OutlierResult {
            entity_id: sample.entity_id.clone(),
            score: sample.value,
            deviation_type: if sample.value < lower {
                DeviationType::Low
            } else {
                DeviationType::High
            },
            severity: policy::iqr_severity(sample.value, q1, q3, iqr),
            method: OutlierMethod::Iqr,
            factors: [
                "IQR outlier".to_string(),
                format!("Value: {}", factor_number(sample.value)),
                format!(
                    "Range: [{}, {}]",
                    factor_number(stats::round_to(lower, 2)),
                    factor_number(stats::round_to(upper, 2))
                ),
            ]
            .into_iter()
            .collect(),
            z_score: None,
            confidence: None,
            deviation: (sample.value - median).abs(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outliers::types::Severity;

    fn samples(values: &[f64]) -> Vec<MetricSample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| MetricSample::new(format!("emp-{i}"), v, 0))
            .collect()
    }

    #[test]
    fn test_iqr_no_outliers() {
        let values: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        assert!(detect(&samples(&values), 1.5).is_empty());
    }

    #[test]
    fn test_iqr_flags_only_extreme() {
        let results = detect(&samples(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]), 1.5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity_id, "emp-5");
        assert_eq!(results[0].severity, Severity::High);
        assert_eq!(results[0].deviation_type, DeviationType::High);
        assert_eq!(results[0].factors.as_slice(), [
            "IQR outlier".to_string(),
            "Value: 100.0".to_string(),
            "Range: [-1.5, 8.5]".to_string(),
        ]);
        assert!(results[0].z_score.is_none());
        assert!(results[0].confidence.is_none());
    }

    #[test]
    fn test_iqr_medium_between_fences() {
        // q1 = 2.25, q3 = 4.75, iqr = 2.5: fences [-1.5, 8.5], widened [-5.25, 12.25]
        let results = detect(&samples(&[1.0, 2.0, 3.0, 4.0, 5.0, 10.0]), 1.5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Medium);
    }

    #[test]
    fn test_zero_iqr_flags_off_quartile_values() {
        let mut values = vec![10.0; 8];
        values[3] = 11.0;
        let results = detect(&samples(&values), 1.5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity_id, "emp-3");
        assert_eq!(results[0].severity, Severity::High);
    }

    #[test]
    fn test_below_minimum() {
        assert!(detect(&samples(&[1.0, 2.0, 100.0]), 1.5).is_empty());
    }
}
