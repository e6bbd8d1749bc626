//! Pulse core: errors, configuration, tracing, events, and shared types
//! for the HR analytics engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;
