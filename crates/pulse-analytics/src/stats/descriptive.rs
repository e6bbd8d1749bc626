//! Mean, population spread, median, linear-interpolation percentiles, and MAD.
//!
//! Every function fails with `AnalyticsError::InsufficientData` on an empty
//! slice. A zero spread is a valid result, never an error; callers decide
//! what a zero denominator means for them.

use std::cmp::Ordering;

use pulse_core::errors::AnalyticsError;
use statrs::statistics::Statistics;

fn ensure_non_empty(values: &[f64]) -> Result<(), AnalyticsError> {
    if values.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    Ok(())
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

pub fn mean(values: &[f64]) -> Result<f64, AnalyticsError> {
    ensure_non_empty(values)?;
    Ok(values.iter().mean())
}

/// Variance dividing by N. Exactly 0.0 when every value is equal.
pub fn population_variance(values: &[f64]) -> Result<f64, AnalyticsError> {
    ensure_non_empty(values)?;
    if is_constant(values) {
        return Ok(0.0);
    }
    Ok(values.iter().population_variance())
}

/// Standard deviation dividing by N. Exactly 0.0 when every value is equal.
pub fn population_stddev(values: &[f64]) -> Result<f64, AnalyticsError> {
    ensure_non_empty(values)?;
    if is_constant(values) {
        return Ok(0.0);
    }
    Ok(values.iter().population_std_dev())
}

/// True when every value equals the first. Running sums over identical
/// values can leave a rounding residue, so constant input is short-circuited.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

pub fn median(values: &[f64]) -> Result<f64, AnalyticsError> {
    percentile(values, 50.0)
}

/// Percentile `p` in `[0, 100]` with linear interpolation between closest ranks.
///
/// `rank = p/100 * (n - 1)`; the result interpolates `sorted[floor(rank)]`
/// and `sorted[ceil(rank)]`.
pub fn percentile(values: &[f64], p: f64) -> Result<f64, AnalyticsError> {
    ensure_non_empty(values)?;
    Ok(percentile_sorted(&sorted_copy(values), p))
}

/// `(q1, q3)` using linear-interpolation percentiles.
pub fn quartiles(values: &[f64]) -> Result<(f64, f64), AnalyticsError> {
    ensure_non_empty(values)?;
    let sorted = sorted_copy(values);
    Ok((percentile_sorted(&sorted, 25.0), percentile_sorted(&sorted, 75.0)))
}

/// Median absolute deviation from the median. Unscaled.
pub fn mad(values: &[f64]) -> Result<f64, AnalyticsError> {
    let center = median(values)?;
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let p = p.clamp(0.0, 100.0);
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}
