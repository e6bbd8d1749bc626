//! Outlier detection over a cross-sectional population.
//!
//! Three interchangeable methods share one result contract:
//! - `zscore`: population z-score with tiered severity
//! - `iqr`: Tukey fences on linear-interpolation quartiles
//! - `robust_mad`: distance from the median in units of MAD
//!
//! Severity cut-offs and minimum sizes live in `policy`.

pub mod detector;
pub mod iqr;
pub mod policy;
pub mod report;
pub mod robust_mad;
pub mod types;
pub mod zscore;

pub use detector::{detect, DetectionConfig};
pub use report::{detect_with_report, DetectionReport};
pub use types::{DeviationType, OutlierMethod, OutlierResult, Severity};
