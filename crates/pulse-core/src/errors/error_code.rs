//! PulseErrorCode trait for the HTTP boundary.

/// Trait for converting Pulse errors to stable error codes.
/// Every error enum implements this so the CRUD layer can map failures
/// to structured responses without matching on variants.
pub trait PulseErrorCode {
    /// Returns the error code string (e.g., "INVALID_CONFIGURATION").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_CONFIGURATION: &str = "INVALID_CONFIGURATION";
pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
pub const INVALID_SAMPLE: &str = "INVALID_SAMPLE";
pub const STORE_ERROR: &str = "STORE_ERROR";
pub const RECORD_NOT_FOUND: &str = "RECORD_NOT_FOUND";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CANCELLED: &str = "CANCELLED";
