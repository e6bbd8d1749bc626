//! Pulse analytics engine.
//!
//! Turns per-employee metric samples into outlier detections and KPI
//! trend/target analytics, and reconciles detections against stored
//! unresolved outlier records. Everything here is synchronous and pure
//! except the batch runner, which fans work out over rayon.

pub mod batch;
pub mod calibration;
pub mod kpi;
pub mod outliers;
pub mod reconcile;
pub mod samples;
pub mod stats;
pub mod survey_quality;
pub mod trends;

pub use kpi::{evaluate, KpiAnalyticsResult};
pub use outliers::{detect, detect_with_report, DetectionConfig, OutlierMethod, OutlierResult};
pub use reconcile::{reconcile, reconcile_and_persist, OutlierRecordStore};
pub use samples::{MetricCategory, MetricSample, Population, TimeSeries};
pub use trends::{halves_trend_classification, linear_trend_percentage, TrendDirection};
