//! Tests for the Pulse configuration system.

use std::sync::Mutex;

use pulse_core::config::pulse_config::{CliOverrides, PulseConfig};
use pulse_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all PULSE_ env vars to prevent cross-test contamination.
fn clear_pulse_env_vars() {
    for key in [
        "PULSE_ANALYTICS_DEFAULT_METHOD",
        "PULSE_ANALYTICS_DEFAULT_THRESHOLD",
        "PULSE_OUTLIERS_RECENT_WINDOW_DAYS",
        "PULSE_KPI_TREND_WINDOW",
        "PULSE_KPI_ALERT_LIMIT",
        "PULSE_BATCH_THREADS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_four_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_pulse_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("pulse.toml"),
        r#"
[analytics]
default_threshold = 2.5

[kpi]
alert_limit = 3
trend_window = 6
"#,
    )
    .unwrap();

    std::env::set_var("PULSE_KPI_TREND_WINDOW", "8");

    let cli = CliOverrides {
        kpi_alert_limit: Some(7),
        ..Default::default()
    };

    let config = PulseConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats project
    assert_eq!(config.kpi.alert_limit, Some(7));
    // env beats project
    assert_eq!(config.kpi.trend_window, Some(8));
    // project beats defaults
    assert_eq!(config.analytics.effective_default_threshold(), 2.5);

    clear_pulse_env_vars();
}

#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_pulse_env_vars();

    let dir = tempdir();
    let config = PulseConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.analytics.effective_default_method(), "z_score");
    assert_eq!(config.analytics.effective_default_threshold(), 2.0);
    assert_eq!(config.analytics.effective_min_threshold(), 1.0);
    assert_eq!(config.analytics.effective_max_threshold(), 5.0);
    assert_eq!(config.kpi.effective_trend_window(), 5);
    assert_eq!(config.kpi.effective_trend_min_points(), 3);
    assert_eq!(config.kpi.effective_alert_limit(), 10);
    assert_eq!(config.outliers.effective_recent_window_days(), 7);
    assert_eq!(config.calibration.effective_min_peers(), 3);
    assert_eq!(config.survey_quality.effective_penalty(), 20);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = PulseConfig::from_toml("[analytics\ndefault_threshold = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_unknown_method_fails_validation() {
    let err = PulseConfig::from_toml(
        r#"
[analytics]
default_method = "isolation_forest_v2"
"#,
    )
    .unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "analytics.default_method")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_default_threshold_outside_bounds_fails() {
    let err = PulseConfig::from_toml(
        r#"
[analytics]
default_threshold = 7.5
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_trend_window_smaller_than_min_points_fails() {
    let err = PulseConfig::from_toml(
        r#"
[kpi]
trend_window = 2
trend_min_points = 3
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { field, .. } if field == "kpi.trend_window"));
}

#[test]
fn test_unknown_keys_ignored() {
    let config = PulseConfig::from_toml(
        r#"
[analytics]
default_method = "iqr"
some_future_knob = true

[dashboards]
theme = "dark"
"#,
    )
    .unwrap();
    assert_eq!(config.analytics.effective_default_method(), "iqr");
}

#[test]
fn test_toml_round_trip_preserves_overrides() {
    let config = PulseConfig::from_toml(
        r#"
[calibration]
adjustment_factor = 0.5

[survey_quality]
slow_ratio = 4.0
"#,
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let again = PulseConfig::from_toml(&text).unwrap();
    assert_eq!(again.calibration.effective_adjustment_factor(), 0.5);
    assert_eq!(again.survey_quality.effective_slow_ratio(), 4.0);
}

#[test]
fn test_invalid_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_pulse_env_vars();

    std::env::set_var("PULSE_KPI_ALERT_LIMIT", "lots");
    let dir = tempdir();
    let config = PulseConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.kpi.alert_limit, None);

    clear_pulse_env_vars();
}
