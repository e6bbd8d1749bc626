//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec sized for outlier explanation factors (usually 2-3).
pub type FactorVec<T> = SmallVec<[T; 3]>;
