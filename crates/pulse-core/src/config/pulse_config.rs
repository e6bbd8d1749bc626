//! Top-level Pulse configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AnalyticsConfig, BatchConfig, CalibrationConfig, KpiConfig, OutlierSummaryConfig,
    SurveyQualityConfig,
};
use crate::errors::ConfigError;

/// Known outlier method labels, external and internal.
const METHOD_LABELS: [&str; 6] = [
    "z_score",
    "zscore",
    "iqr",
    "isolation_forest",
    "robust_mad",
    "mad",
];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PULSE_*`)
/// 3. Project config (`pulse.toml` in project root)
/// 4. User config (`~/.pulse/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PulseConfig {
    pub analytics: AnalyticsConfig,
    pub outliers: OutlierSummaryConfig,
    pub kpi: KpiConfig,
    pub calibration: CalibrationConfig,
    pub survey_quality: SurveyQualityConfig,
    pub batch: BatchConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub outlier_method: Option<String>,
    pub outlier_threshold: Option<f64>,
    pub kpi_alert_limit: Option<usize>,
    pub batch_threads: Option<usize>,
}

impl PulseConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("pulse.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: PulseConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &PulseConfig) -> Result<(), ConfigError> {
        let analytics = &config.analytics;
        if let Some(ref method) = analytics.default_method {
            if !METHOD_LABELS.contains(&method.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "analytics.default_method".to_string(),
                    message: format!("unknown method '{method}'"),
                });
            }
        }
        let min = analytics.effective_min_threshold();
        let max = analytics.effective_max_threshold();
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::ValidationFailed {
                field: "analytics.min_threshold".to_string(),
                message: "thresholds must be finite with 0 < min_threshold <= max_threshold"
                    .to_string(),
            });
        }
        let default_threshold = analytics.effective_default_threshold();
        if !(min..=max).contains(&default_threshold) {
            return Err(ConfigError::ValidationFailed {
                field: "analytics.default_threshold".to_string(),
                message: format!("must be between {min} and {max}"),
            });
        }
        if let Some(share) = analytics.max_outlier_percentage_warn {
            if !(0.0..=100.0).contains(&share) {
                return Err(ConfigError::ValidationFailed {
                    field: "analytics.max_outlier_percentage_warn".to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if config.outliers.recent_window_days == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "outliers.recent_window_days".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let kpi = &config.kpi;
        if kpi.effective_trend_min_points() < 2 {
            return Err(ConfigError::ValidationFailed {
                field: "kpi.trend_min_points".to_string(),
                message: "must be at least 2".to_string(),
            });
        }
        if kpi.effective_trend_window() < kpi.effective_trend_min_points() {
            return Err(ConfigError::ValidationFailed {
                field: "kpi.trend_window".to_string(),
                message: "must be at least kpi.trend_min_points".to_string(),
            });
        }
        let momentum = kpi.effective_momentum_threshold();
        if !momentum.is_finite() || momentum < 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "kpi.momentum_threshold".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }

        let factor = config.calibration.effective_adjustment_factor();
        if !(0.0..=1.0).contains(&factor) {
            return Err(ConfigError::ValidationFailed {
                field: "calibration.adjustment_factor".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if config.calibration.effective_min_peers() < 2 {
            return Err(ConfigError::ValidationFailed {
                field: "calibration.min_peers".to_string(),
                message: "must be at least 2".to_string(),
            });
        }

        let survey = &config.survey_quality;
        if survey.effective_fast_ratio() >= 1.0 || survey.effective_fast_ratio() < 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "survey_quality.fast_ratio".to_string(),
                message: "must be in [0.0, 1.0)".to_string(),
            });
        }
        if survey.effective_slow_ratio() <= 1.0 {
            return Err(ConfigError::ValidationFailed {
                field: "survey_quality.slow_ratio".to_string(),
                message: "must be greater than 1.0".to_string(),
            });
        }
        if survey.effective_penalty() > 100 {
            return Err(ConfigError::ValidationFailed {
                field: "survey_quality.penalty".to_string(),
                message: "must be between 0 and 100".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.pulse/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PulseConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PulseConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut PulseConfig, other: &PulseConfig) {
        // Analytics
        if other.analytics.default_method.is_some() {
            base.analytics.default_method = other.analytics.default_method.clone();
        }
        if other.analytics.default_threshold.is_some() {
            base.analytics.default_threshold = other.analytics.default_threshold;
        }
        if other.analytics.min_threshold.is_some() {
            base.analytics.min_threshold = other.analytics.min_threshold;
        }
        if other.analytics.max_threshold.is_some() {
            base.analytics.max_threshold = other.analytics.max_threshold;
        }
        if other.analytics.max_outlier_percentage_warn.is_some() {
            base.analytics.max_outlier_percentage_warn =
                other.analytics.max_outlier_percentage_warn;
        }

        // Outlier summaries
        if other.outliers.recent_window_days.is_some() {
            base.outliers.recent_window_days = other.outliers.recent_window_days;
        }

        // KPI
        if other.kpi.trend_window.is_some() {
            base.kpi.trend_window = other.kpi.trend_window;
        }
        if other.kpi.trend_min_points.is_some() {
            base.kpi.trend_min_points = other.kpi.trend_min_points;
        }
        if other.kpi.momentum_threshold.is_some() {
            base.kpi.momentum_threshold = other.kpi.momentum_threshold;
        }
        if other.kpi.alert_limit.is_some() {
            base.kpi.alert_limit = other.kpi.alert_limit;
        }

        // Calibration
        if other.calibration.adjustment_factor.is_some() {
            base.calibration.adjustment_factor = other.calibration.adjustment_factor;
        }
        if other.calibration.min_peers.is_some() {
            base.calibration.min_peers = other.calibration.min_peers;
        }
        if other.calibration.z_cutoff.is_some() {
            base.calibration.z_cutoff = other.calibration.z_cutoff;
        }

        // Survey quality
        if other.survey_quality.fast_ratio.is_some() {
            base.survey_quality.fast_ratio = other.survey_quality.fast_ratio;
        }
        if other.survey_quality.slow_ratio.is_some() {
            base.survey_quality.slow_ratio = other.survey_quality.slow_ratio;
        }
        if other.survey_quality.max_outlier_share.is_some() {
            base.survey_quality.max_outlier_share = other.survey_quality.max_outlier_share;
        }
        if other.survey_quality.penalty.is_some() {
            base.survey_quality.penalty = other.survey_quality.penalty;
        }

        // Batch
        if other.batch.threads.is_some() {
            base.batch.threads = other.batch.threads;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PULSE_ANALYTICS_DEFAULT_METHOD`, `PULSE_KPI_ALERT_LIMIT`, etc.
    fn apply_env_overrides(config: &mut PulseConfig) {
        if let Ok(val) = std::env::var("PULSE_ANALYTICS_DEFAULT_METHOD") {
            config.analytics.default_method = Some(val);
        }
        if let Ok(val) = std::env::var("PULSE_ANALYTICS_DEFAULT_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.analytics.default_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_OUTLIERS_RECENT_WINDOW_DAYS") {
            if let Ok(v) = val.parse::<u32>() {
                config.outliers.recent_window_days = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_KPI_TREND_WINDOW") {
            if let Ok(v) = val.parse::<usize>() {
                config.kpi.trend_window = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_KPI_ALERT_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.kpi.alert_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_BATCH_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.batch.threads = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PulseConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.outlier_method {
            config.analytics.default_method = Some(v.clone());
        }
        if let Some(v) = cli.outlier_threshold {
            config.analytics.default_threshold = Some(v);
        }
        if let Some(v) = cli.kpi_alert_limit {
            config.kpi.alert_limit = Some(v);
        }
        if let Some(v) = cli.batch_threads {
            config.batch.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.pulse/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".pulse"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
