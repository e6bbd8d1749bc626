//! Outlier record store errors.

use super::error_code::{self, PulseErrorCode};

/// Errors reported by an outlier record store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend error: {message}")]
    Backend { message: String },

    #[error("Outlier record not found: {id}")]
    RecordNotFound { id: u64 },
}

impl PulseErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Backend { .. } => error_code::STORE_ERROR,
            Self::RecordNotFound { .. } => error_code::RECORD_NOT_FOUND,
        }
    }
}
