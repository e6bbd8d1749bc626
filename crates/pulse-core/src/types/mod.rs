//! Shared data structures for Pulse.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet};
