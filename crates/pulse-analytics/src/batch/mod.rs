//! Batch recomputation across many KPIs and populations.
//!
//! Items are independent: a failing item is skipped, logged, reported as a
//! non-fatal error, and the rest of the batch completes.

pub mod runner;
pub mod types;

pub use runner::BatchRunner;
pub use types::{CategoryOutcome, KpiBatchItem, KpiBatchOutput, PopulationBatchItem};
