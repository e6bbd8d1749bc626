//! Extraction of per-entity samples from heterogeneous source records.
//!
//! Each extractor groups records by entity and collapses them to one value:
//! - survey responses: mean of numeric answers per response, then mean per entity
//! - performance reviews: latest rating per entity
//! - KPI values: mean per entity
//!
//! Entities listed in `roster` without usable data go through the caller's
//! `MissingValuePolicy` instead of a hardcoded fallback score.

use pulse_core::errors::SampleError;
use pulse_core::types::FxHashMap;
use serde::{Deserialize, Serialize};

use super::types::{MetricCategory, MetricSample, Population};

/// What to do with an entity that has no usable data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MissingValuePolicy {
    /// Leave the entity out of the population.
    #[default]
    Skip,
    /// Use the given value, on the same scale as the metric.
    Default(f64),
    /// Fail with `SampleError::MissingValue`.
    Reject,
}

/// One answer in a survey response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurveyAnswer {
    Numeric(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponseRecord {
    pub entity_id: String,
    pub answers: Vec<(String, SurveyAnswer)>,
    pub submitted_at: i64,
}

impl SurveyResponseRecord {
    /// Mean of the numeric answers, `None` when there are none.
    fn numeric_mean(&self) -> Option<f64> {
        let (sum, count) = self
            .answers
            .iter()
            .filter_map(|(_, a)| match a {
                SurveyAnswer::Numeric(v) if v.is_finite() => Some(*v),
                _ => None,
            })
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReviewRecord {
    pub entity_id: String,
    pub rating: f64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiValueRecord {
    pub entity_id: String,
    pub value: f64,
    pub recorded_at: i64,
}

/// Running mean plus the latest timestamp seen for an entity.
#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
    latest: i64,
}

impl Accumulator {
    fn push(&mut self, value: f64, at: i64) {
        self.sum += value;
        self.count += 1;
        self.latest = if self.count == 1 { at } else { self.latest.max(at) };
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Build a population from survey responses.
pub fn from_survey_responses(
    category: MetricCategory,
    responses: &[SurveyResponseRecord],
    roster: &[String],
    missing: MissingValuePolicy,
) -> Result<Population, SampleError> {
    let mut per_entity: FxHashMap<&str, Accumulator> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for response in responses {
        let Some(mean) = response.numeric_mean() else {
            continue;
        };
        let acc = per_entity
            .entry(response.entity_id.as_str())
            .or_insert_with(|| {
                order.push(response.entity_id.as_str());
                Accumulator::default()
            });
        acc.push(mean, response.submitted_at);
    }
    let samples = order
        .iter()
        .filter_map(|id| {
            per_entity
                .get(id)
                .map(|acc| MetricSample::new(*id, acc.mean(), acc.latest))
        })
        .collect();
    finish(category, samples, roster, missing)
}

/// Build a population from the latest performance review of each entity.
pub fn from_performance_reviews(
    reviews: &[PerformanceReviewRecord],
    roster: &[String],
    missing: MissingValuePolicy,
) -> Result<Population, SampleError> {
    let mut latest: FxHashMap<&str, &PerformanceReviewRecord> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for review in reviews {
        match latest.get(review.entity_id.as_str()) {
            Some(existing) if existing.created_at >= review.created_at => {}
            Some(_) => {
                latest.insert(review.entity_id.as_str(), review);
            }
            None => {
                order.push(review.entity_id.as_str());
                latest.insert(review.entity_id.as_str(), review);
            }
        }
    }
    let samples = order
        .iter()
        .filter_map(|id| {
            latest
                .get(id)
                .map(|r| MetricSample::new(*id, r.rating, r.created_at))
        })
        .collect();
    finish(MetricCategory::Performance, samples, roster, missing)
}

/// Build a population from KPI values, averaged per entity.
pub fn from_kpi_values(
    values: &[KpiValueRecord],
    roster: &[String],
    missing: MissingValuePolicy,
) -> Result<Population, SampleError> {
    let mut per_entity: FxHashMap<&str, Accumulator> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for record in values {
        if !record.value.is_finite() {
            return Err(SampleError::NonFiniteValue {
                entity_id: record.entity_id.clone(),
                value: record.value,
            });
        }
        let acc = per_entity
            .entry(record.entity_id.as_str())
            .or_insert_with(|| {
                order.push(record.entity_id.as_str());
                Accumulator::default()
            });
        acc.push(record.value, record.recorded_at);
    }
    let samples = order
        .iter()
        .filter_map(|id| {
            per_entity
                .get(id)
                .map(|acc| MetricSample::new(*id, acc.mean(), acc.latest))
        })
        .collect();
    finish(MetricCategory::KpiValue, samples, roster, missing)
}

/// Apply the missing-value policy for roster entities and validate.
fn finish(
    category: MetricCategory,
    mut samples: Vec<MetricSample>,
    roster: &[String],
    missing: MissingValuePolicy,
) -> Result<Population, SampleError> {
    let present: Vec<String> = samples.iter().map(|s| s.entity_id.clone()).collect();
    for entity_id in roster {
        if present.iter().any(|p| p == entity_id) {
            continue;
        }
        match missing {
            MissingValuePolicy::Skip => {}
            MissingValuePolicy::Default(value) => {
                samples.push(MetricSample::new(entity_id.clone(), value, 0));
            }
            MissingValuePolicy::Reject => {
                return Err(SampleError::MissingValue(entity_id.clone()));
            }
        }
    }
    tracing::trace!(category = %category, samples = samples.len(), "extracted population");
    Population::new(category, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: &[f64]) -> Vec<(String, SurveyAnswer)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("q{i}"), SurveyAnswer::Numeric(*v)))
            .collect()
    }

    #[test]
    fn test_survey_mean_of_means() {
        let responses = vec![
            SurveyResponseRecord {
                entity_id: "emp-1".into(),
                answers: answers(&[4.0, 2.0]),
                submitted_at: 10,
            },
            SurveyResponseRecord {
                entity_id: "emp-1".into(),
                answers: answers(&[5.0]),
                submitted_at: 20,
            },
            SurveyResponseRecord {
                entity_id: "emp-2".into(),
                answers: vec![("comment".into(), SurveyAnswer::Text("fine".into()))],
                submitted_at: 30,
            },
        ];
        let pop = from_survey_responses(
            MetricCategory::SurveyScore,
            &responses,
            &[],
            MissingValuePolicy::Skip,
        )
        .unwrap();
        assert_eq!(pop.len(), 1);
        assert_eq!(pop.samples()[0].value, 4.0);
        assert_eq!(pop.samples()[0].timestamp, 20);
    }

    #[test]
    fn test_latest_review_wins() {
        let reviews = vec![
            PerformanceReviewRecord {
                entity_id: "emp-1".into(),
                rating: 2.0,
                created_at: 100,
            },
            PerformanceReviewRecord {
                entity_id: "emp-1".into(),
                rating: 4.5,
                created_at: 200,
            },
            PerformanceReviewRecord {
                entity_id: "emp-1".into(),
                rating: 3.0,
                created_at: 150,
            },
        ];
        let pop = from_performance_reviews(&reviews, &[], MissingValuePolicy::Skip).unwrap();
        assert_eq!(pop.values(), vec![4.5]);
    }

    #[test]
    fn test_missing_policy_default_and_reject() {
        let roster = vec!["emp-1".to_string(), "emp-9".to_string()];
        let values = vec![KpiValueRecord {
            entity_id: "emp-1".into(),
            value: 80.0,
            recorded_at: 1,
        }];

        let pop = from_kpi_values(&values, &roster, MissingValuePolicy::Default(65.0)).unwrap();
        assert_eq!(pop.values(), vec![80.0, 65.0]);

        let skipped = from_kpi_values(&values, &roster, MissingValuePolicy::Skip).unwrap();
        assert_eq!(skipped.len(), 1);

        let err = from_kpi_values(&values, &roster, MissingValuePolicy::Reject).unwrap_err();
        assert!(matches!(err, SampleError::MissingValue(id) if id == "emp-9"));
    }
}
