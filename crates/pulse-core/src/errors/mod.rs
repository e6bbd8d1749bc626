//! Error handling for Pulse.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analytics_error;
pub mod batch_error;
pub mod config_error;
pub mod error_code;
pub mod sample_error;
pub mod store_error;

pub use analytics_error::AnalyticsError;
pub use batch_error::{BatchError, BatchResult};
pub use config_error::ConfigError;
pub use error_code::PulseErrorCode;
pub use sample_error::SampleError;
pub use store_error::StoreError;
