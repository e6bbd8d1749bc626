//! Analytics errors.

use super::error_code::{self, PulseErrorCode};

/// Errors raised at the boundary of the analytics core.
///
/// Only configuration mistakes are hard errors. Small populations and
/// degenerate inputs resolve to neutral results inside the algorithms;
/// `InsufficientData` surfaces solely from the descriptive statistics
/// functions, which detectors guard before calling.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Unknown outlier method: {0}")]
    UnknownMethod(String),

    #[error("Threshold {threshold} for {method} outside [{min}, {max}]")]
    ThresholdOutOfRange {
        method: String,
        threshold: f64,
        min: f64,
        max: f64,
    },

    #[error("Threshold must be a finite number, got {0}")]
    NonFiniteThreshold(f64),

    #[error("Insufficient data: need at least {required} values, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

impl AnalyticsError {
    /// True for the errors that indicate a caller bug rather than a data condition.
    pub fn is_invalid_configuration(&self) -> bool {
        !matches!(self, Self::InsufficientData { .. })
    }
}

impl PulseErrorCode for AnalyticsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_DATA,
            _ => error_code::INVALID_CONFIGURATION,
        }
    }
}
