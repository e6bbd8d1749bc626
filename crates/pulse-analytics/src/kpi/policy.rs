//! Fixed KPI policy. Every KPI code path classifies through these helpers.

/// A KPI is on target within this fraction of its target's magnitude.
///
/// The band is `|target| * ON_TARGET_BAND`, so a negative target (a loss or
/// net-outflow KPI) gets a symmetric band too instead of one that never matches.
pub const ON_TARGET_BAND: f64 = 0.05;

/// Deviation (percent of target) beyond which a KPI raises a critical alert.
pub const CRITICAL_DEVIATION_PERCENT: f64 = 20.0;

/// `|current - target| / |target| * 100`, `None` for a zero target.
pub fn deviation_percentage(current: f64, target: f64) -> Option<f64> {
    (target != 0.0).then(|| (current - target).abs() / target.abs() * 100.0)
}

/// `|current - target| <= |target| * 5%`.
pub fn is_on_target(current: f64, target: f64) -> bool {
    (current - target).abs() <= target.abs() * ON_TARGET_BAND
}

/// Deviation strictly above 20 %.
pub fn is_critical(current: f64, target: f64) -> bool {
    deviation_percentage(current, target).is_some_and(|d| d > CRITICAL_DEVIATION_PERCENT)
}
