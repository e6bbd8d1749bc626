//! Shared constants for the Pulse analytics engine.

// ---- Outlier detection defaults ----

/// Default outlier method, in its external (HTTP-facing) label.
pub const DEFAULT_OUTLIER_METHOD: &str = "z_score";

/// Default outlier threshold.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 2.0;

/// Lowest accepted threshold for z-score and robust detection.
pub const DEFAULT_MIN_THRESHOLD: f64 = 1.0;

/// Highest accepted threshold for z-score and robust detection.
pub const DEFAULT_MAX_THRESHOLD: f64 = 5.0;

/// Flag share (percent of analyzed entities) above which a detection run logs a warning.
pub const DEFAULT_MAX_OUTLIER_PERCENTAGE_WARN: f64 = 25.0;

/// Days counted as "recent" in outlier summaries.
pub const DEFAULT_RECENT_WINDOW_DAYS: u32 = 7;

// ---- KPI defaults ----

/// Most recent measurements considered for dashboard momentum.
pub const DEFAULT_TREND_WINDOW: usize = 5;

/// Minimum measurements for dashboard momentum.
pub const DEFAULT_TREND_MIN_POINTS: usize = 3;

/// Linear trend fraction beyond which a KPI counts as trending.
pub const DEFAULT_MOMENTUM_THRESHOLD: f64 = 0.05;

/// Maximum alerts returned by a dashboard summary.
pub const DEFAULT_ALERT_LIMIT: usize = 10;

// ---- Calibration defaults ----

/// Fraction of the distance to the peer mean removed by calibration.
pub const DEFAULT_ADJUSTMENT_FACTOR: f64 = 0.3;

/// Minimum peer reviews for calibration.
pub const DEFAULT_MIN_PEERS: usize = 3;

/// |z| beyond which a rating is calibrated.
pub const DEFAULT_CALIBRATION_Z_CUTOFF: f64 = 2.0;

// ---- Survey quality defaults ----

/// Completion faster than this fraction of the median is suspicious.
pub const DEFAULT_FAST_RATIO: f64 = 0.2;

/// Completion slower than this multiple of the median is unusual.
pub const DEFAULT_SLOW_RATIO: f64 = 5.0;

/// Share of flagged responses above which the survey is penalized.
pub const DEFAULT_MAX_OUTLIER_SHARE: f64 = 0.10;

/// Quality score penalty for a high outlier rate.
pub const DEFAULT_QUALITY_PENALTY: u32 = 20;

/// Seconds per day, used for resolution time and recency windows.
pub const SECONDS_PER_DAY: i64 = 86_400;
