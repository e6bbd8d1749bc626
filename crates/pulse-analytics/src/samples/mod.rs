//! Metric samples: the uniform numeric input of the analytics core.
//!
//! Raw survey responses, performance reviews, and KPI values are turned
//! into one `MetricSample` per entity and validated into a `Population`
//! (cross-sectional) or a `TimeSeries` (longitudinal, one entity).

pub mod extraction;
pub mod types;

pub use extraction::{
    from_kpi_values, from_performance_reviews, from_survey_responses, KpiValueRecord,
    MissingValuePolicy, PerformanceReviewRecord, SurveyAnswer, SurveyResponseRecord,
};
pub use types::{MetricCategory, MetricSample, Population, TimeSeries};
