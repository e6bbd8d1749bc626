//! Sample, population, and time series types.

use std::fmt;

use pulse_core::errors::SampleError;
use pulse_core::types::FxHashSet;
use serde::{Deserialize, Serialize};

/// Metric family a population was drawn from. Also the outlier record category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Engagement,
    Performance,
    Satisfaction,
    Attendance,
    SurveyScore,
    KpiValue,
}

impl MetricCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Engagement => "engagement",
            Self::Performance => "performance",
            Self::Satisfaction => "satisfaction",
            Self::Attendance => "attendance",
            Self::SurveyScore => "survey_score",
            Self::KpiValue => "kpi_value",
        }
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One numeric observation for one entity.
///
/// `value` is already normalized to the caller's documented scale
/// (1-5 Likert, 0-100 percentage, ...). The core never rescales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub entity_id: String,
    pub value: f64,
    /// Unix seconds.
    pub timestamp: i64,
}

impl MetricSample {
    pub fn new(entity_id: impl Into<String>, value: f64, timestamp: i64) -> Self {
        Self {
            entity_id: entity_id.into(),
            value,
            timestamp,
        }
    }

    fn validate(&self) -> Result<(), SampleError> {
        if self.entity_id.trim().is_empty() {
            return Err(SampleError::EmptyEntityId);
        }
        if !self.value.is_finite() {
            return Err(SampleError::NonFiniteValue {
                entity_id: self.entity_id.clone(),
                value: self.value,
            });
        }
        Ok(())
    }
}

/// Cross-sectional set of samples, one per entity, for a single category.
///
/// Invariant: entity ids are unique and every value is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Population {
    category: MetricCategory,
    samples: Vec<MetricSample>,
}

impl Population {
    pub fn new(category: MetricCategory, samples: Vec<MetricSample>) -> Result<Self, SampleError> {
        let mut seen = FxHashSet::default();
        for sample in &samples {
            sample.validate()?;
            if !seen.insert(sample.entity_id.as_str()) {
                return Err(SampleError::DuplicateEntity(sample.entity_id.clone()));
            }
        }
        Ok(Self { category, samples })
    }

    pub fn category(&self) -> MetricCategory {
        self.category
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Ordered-by-timestamp samples for a single entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    entity_id: String,
    samples: Vec<MetricSample>,
}

impl TimeSeries {
    /// Validate and sort `samples` by timestamp. Equal timestamps keep input order.
    pub fn new(entity_id: impl Into<String>, mut samples: Vec<MetricSample>) -> Result<Self, SampleError> {
        let entity_id = entity_id.into();
        if entity_id.trim().is_empty() {
            return Err(SampleError::EmptyEntityId);
        }
        for sample in &samples {
            if !sample.value.is_finite() {
                return Err(SampleError::NonFiniteValue {
                    entity_id: entity_id.clone(),
                    value: sample.value,
                });
            }
        }
        samples.sort_by_key(|s| s.timestamp);
        Ok(Self { entity_id, samples })
    }

    /// Build a series from values already in chronological order.
    pub fn from_values(entity_id: impl Into<String>, values: &[f64]) -> Result<Self, SampleError> {
        let entity_id = entity_id.into();
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, &v)| MetricSample::new(entity_id.clone(), v, i as i64))
            .collect();
        Self::new(entity_id, samples)
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_rejects_duplicates() {
        let err = Population::new(
            MetricCategory::Engagement,
            vec![
                MetricSample::new("emp-1", 60.0, 0),
                MetricSample::new("emp-1", 70.0, 0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SampleError::DuplicateEntity(id) if id == "emp-1"));
    }

    #[test]
    fn test_population_rejects_nan() {
        let err = Population::new(
            MetricCategory::Performance,
            vec![MetricSample::new("emp-1", f64::NAN, 0)],
        )
        .unwrap_err();
        assert!(matches!(err, SampleError::NonFiniteValue { .. }));
    }

    #[test]
    fn test_population_rejects_blank_id() {
        let err = Population::new(
            MetricCategory::Performance,
            vec![MetricSample::new("  ", 3.0, 0)],
        )
        .unwrap_err();
        assert!(matches!(err, SampleError::EmptyEntityId));
    }

    #[test]
    fn test_time_series_sorted_by_timestamp() {
        let series = TimeSeries::new(
            "kpi-1",
            vec![
                MetricSample::new("kpi-1", 3.0, 300),
                MetricSample::new("kpi-1", 1.0, 100),
                MetricSample::new("kpi-1", 2.0, 200),
            ],
        )
        .unwrap();
        assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.latest().map(|s| s.value), Some(3.0));
    }
}
