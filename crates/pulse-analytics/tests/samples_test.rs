//! Sample extraction from source records.

use pulse_analytics::outliers::{detect, DetectionConfig, OutlierMethod};
use pulse_analytics::samples::{
    from_kpi_values, from_performance_reviews, from_survey_responses, KpiValueRecord,
    MetricCategory, MissingValuePolicy, PerformanceReviewRecord, SurveyAnswer,
    SurveyResponseRecord,
};
use pulse_core::errors::SampleError;

fn response(entity_id: &str, scores: &[f64], at: i64) -> SurveyResponseRecord {
    SurveyResponseRecord {
        entity_id: entity_id.into(),
        answers: scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (format!("q{i}"), SurveyAnswer::Numeric(s)))
            .chain(std::iter::once((
                "comment".to_string(),
                SurveyAnswer::Text("n/a".into()),
            )))
            .collect(),
        submitted_at: at,
    }
}

#[test]
fn test_survey_population_feeds_detection() {
    let mut responses: Vec<SurveyResponseRecord> = (0..7)
        .map(|i| response(&format!("emp-{i}"), &[4.0, 4.0], 100))
        .collect();
    responses.push(response("emp-7", &[1.0, 1.0], 100));

    let population = from_survey_responses(
        MetricCategory::SurveyScore,
        &responses,
        &[],
        MissingValuePolicy::Skip,
    )
    .unwrap();
    assert_eq!(population.len(), 8);
    assert_eq!(population.category(), MetricCategory::SurveyScore);

    let config = DetectionConfig::new(OutlierMethod::ZScore, 2.0).unwrap();
    let results = detect(&population, &config);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entity_id, "emp-7");
}

#[test]
fn test_survey_answers_deserialize_untagged() {
    let answer: SurveyAnswer = serde_json::from_str("4.5").unwrap();
    assert_eq!(answer, SurveyAnswer::Numeric(4.5));
    let answer: SurveyAnswer = serde_json::from_str("\"great team\"").unwrap();
    assert_eq!(answer, SurveyAnswer::Text("great team".into()));
}

#[test]
fn test_reviews_use_latest_per_entity() {
    let reviews = vec![
        PerformanceReviewRecord {
            entity_id: "emp-1".into(),
            rating: 3.0,
            created_at: 10,
        },
        PerformanceReviewRecord {
            entity_id: "emp-2".into(),
            rating: 4.0,
            created_at: 10,
        },
        PerformanceReviewRecord {
            entity_id: "emp-1".into(),
            rating: 4.5,
            created_at: 20,
        },
    ];
    let population = from_performance_reviews(&reviews, &[], MissingValuePolicy::Skip).unwrap();
    assert_eq!(population.category(), MetricCategory::Performance);
    assert_eq!(population.values(), vec![4.5, 4.0]);
}

#[test]
fn test_kpi_values_averaged() {
    let values = vec![
        KpiValueRecord {
            entity_id: "emp-1".into(),
            value: 80.0,
            recorded_at: 1,
        },
        KpiValueRecord {
            entity_id: "emp-1".into(),
            value: 90.0,
            recorded_at: 2,
        },
    ];
    let population = from_kpi_values(&values, &[], MissingValuePolicy::Skip).unwrap();
    assert_eq!(population.values(), vec![85.0]);
    assert_eq!(population.samples()[0].timestamp, 2);
}

#[test]
fn test_missing_value_default_is_explicit() {
    let roster = vec!["emp-1".to_string(), "emp-2".to_string()];
    let responses = vec![response("emp-1", &[3.0], 0)];

    let skipped = from_survey_responses(
        MetricCategory::Engagement,
        &responses,
        &roster,
        MissingValuePolicy::Skip,
    )
    .unwrap();
    assert_eq!(skipped.len(), 1);

    let defaulted = from_survey_responses(
        MetricCategory::Engagement,
        &responses,
        &roster,
        MissingValuePolicy::Default(3.5),
    )
    .unwrap();
    assert_eq!(defaulted.values(), vec![3.0, 3.5]);
}

#[test]
fn test_non_finite_kpi_value_rejected() {
    let values = vec![KpiValueRecord {
        entity_id: "emp-1".into(),
        value: f64::INFINITY,
        recorded_at: 1,
    }];
    let err = from_kpi_values(&values, &[], MissingValuePolicy::Skip).unwrap_err();
    assert!(matches!(err, SampleError::NonFiniteValue { .. }));
}
