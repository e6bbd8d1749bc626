//! Descriptive statistics over plain `f64` slices.

pub mod descriptive;

pub use descriptive::{
    is_constant, mad, mean, median, percentile, population_stddev, population_variance,
    quartiles, round_to,
};
