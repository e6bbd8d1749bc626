//! Batch inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::kpi::{KpiAnalyticsResult, KpiDefinition};
use crate::outliers::DetectionReport;
use crate::reconcile::ReconcileOutcome;
use crate::samples::{MetricCategory, MetricSample};

/// Raw measurements of one KPI, validated into a `TimeSeries` by the runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiBatchItem {
    pub kpi_id: String,
    pub definition: KpiDefinition,
    pub measurements: Vec<MetricSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiBatchOutput {
    pub kpi_id: String,
    pub result: KpiAnalyticsResult,
}

/// Raw samples of one category, validated into a `Population` by the runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationBatchItem {
    pub category: MetricCategory,
    pub samples: Vec<MetricSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOutcome {
    pub category: MetricCategory,
    pub report: DetectionReport,
    pub reconciled: ReconcileOutcome,
}
