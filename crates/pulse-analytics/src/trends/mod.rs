//! Trend calculation over ordered measurements.
//!
//! Two separate algorithms serve different callers:
//! - `linear_trend_percentage`: OLS slope scaled to total modeled change
//! - `halves_trend_classification`: compares first-half and second-half means

pub mod halves;
pub mod linear;
pub mod types;

pub use halves::{halves_trend_classification, halves_trend_percentage};
pub use linear::{linear_trend_percentage, ols_slope};
pub use types::{classify_momentum, Momentum, TrendDirection};
