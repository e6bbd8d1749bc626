//! Outlier severity policy.
//!
//! All call sites classify through these functions so severity tiers stay
//! consistent across the analytics and focus-group paths. Bump
//! `POLICY_VERSION` whenever a cut-off changes.

use super::types::Severity;

pub const POLICY_VERSION: u32 = 1;

pub const MIN_ZSCORE_POPULATION: usize = 3;
pub const MIN_IQR_POPULATION: usize = 4;
pub const MIN_ROBUST_MAD_POPULATION: usize = 3;

/// |z| at or above which a z-score outlier is critical.
pub const ZSCORE_CRITICAL: f64 = 3.0;
/// |z| at or above which a z-score outlier is high.
pub const ZSCORE_HIGH: f64 = 2.5;

/// IQR multiplier of the widened fence that separates high from medium.
pub const IQR_HIGH_MULTIPLIER: f64 = 3.0;

/// Multiple of MAD beyond which a value is flagged by `robust_mad`.
pub const MAD_MULTIPLIER: f64 = 2.5;

pub const CONFIDENCE_CAP: f64 = 99.0;

pub fn zscore_severity(abs_z: f64) -> Severity {
    if abs_z >= ZSCORE_CRITICAL {
        Severity::Critical
    } else if abs_z >= ZSCORE_HIGH {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// `min(99, round(|z| / 3 * 100, 1))`.
pub fn zscore_confidence(abs_z: f64) -> f64 {
    crate::stats::round_to(abs_z / ZSCORE_CRITICAL * 100.0, 1).min(CONFIDENCE_CAP)
}

/// High when outside `[q1 - 3*iqr, q3 + 3*iqr]`, medium otherwise.
pub fn iqr_severity(value: f64, q1: f64, q3: f64, iqr: f64) -> Severity {
    let low = q1 - IQR_HIGH_MULTIPLIER * iqr;
    let high = q3 + IQR_HIGH_MULTIPLIER * iqr;
    if value < low || value > high {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// `robust_mad` does not tier.
pub fn robust_mad_severity() -> Severity {
    Severity::Medium
}
