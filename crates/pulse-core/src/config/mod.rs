//! Configuration system for Pulse.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod analytics_config;
pub mod batch_config;
pub mod calibration_config;
pub mod kpi_config;
pub mod pulse_config;
pub mod survey_quality_config;

pub use analytics_config::{AnalyticsConfig, OutlierSummaryConfig};
pub use batch_config::BatchConfig;
pub use calibration_config::CalibrationConfig;
pub use kpi_config::KpiConfig;
pub use pulse_config::{CliOverrides, PulseConfig};
pub use survey_quality_config::SurveyQualityConfig;
