//! KPI target/trend evaluation and dashboard summaries.

pub mod dashboard;
pub mod evaluator;
pub mod policy;
pub mod types;

pub use dashboard::summarize_dashboard;
pub use evaluator::{evaluate, evaluate_definition, evaluate_series};
pub use types::{
    KpiAlert, KpiAnalyticsResult, KpiDashboardSummary, KpiDefinition, KpiSnapshot,
    ThresholdBreach,
};
