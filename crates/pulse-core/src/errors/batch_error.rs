//! Batch errors and non-fatal error collection.

use super::error_code::{self, PulseErrorCode};
use super::{AnalyticsError, SampleError, StoreError};

/// Errors that can occur for a single item of a batch recomputation.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Sample error: {0}")]
    Sample(#[from] SampleError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Batch item {item} cancelled")]
    Cancelled { item: String },
}

impl PulseErrorCode for BatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Sample(e) => e.error_code(),
            Self::Analytics(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Cancelled { .. } => error_code::CANCELLED,
        }
    }
}

/// Result of a batch run that accumulates non-fatal errors.
/// Failed items are skipped; the rest of the batch still completes.
#[derive(Debug, Default)]
pub struct BatchResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run, keyed by item.
    pub errors: Vec<(String, BatchError)>,
}

impl<T: Default> BatchResult<T> {
    /// Create a new batch result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Record a skipped item.
    pub fn add_error(&mut self, item: impl Into<String>, error: BatchError) {
        self.errors.push((item.into(), error));
    }

    /// Returns true if no item failed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of skipped items.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
