//! Sample validation errors.

use super::error_code::{self, PulseErrorCode};

/// Errors raised while turning raw records into populations or series.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("Duplicate entity in population: {0}")]
    DuplicateEntity(String),

    #[error("Non-finite value {value} for entity {entity_id}")]
    NonFiniteValue { entity_id: String, value: f64 },

    #[error("Sample has an empty entity id")]
    EmptyEntityId,

    #[error("No value for entity {0} and no default configured")]
    MissingValue(String),
}

impl PulseErrorCode for SampleError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_SAMPLE
    }
}
