//! First-half versus second-half comparison.
//!
//! The series splits at `n / 2`; for odd n the middle value belongs to the
//! second half.

use super::types::TrendDirection;

fn half_means(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let (first, second) = values.split_at(values.len() / 2);
    let first_avg = first.iter().sum::<f64>() / first.len() as f64;
    let second_avg = second.iter().sum::<f64>() / second.len() as f64;
    Some((first_avg, second_avg))
}

/// `Improving` when the second-half mean is higher, `Declining` when lower,
/// `Stable` when equal, `InsufficientData` below 2 values.
pub fn halves_trend_classification(values: &[f64]) -> TrendDirection {
    match half_means(values) {
        None => TrendDirection::InsufficientData,
        Some((first, second)) if second > first => TrendDirection::Improving,
        Some((first, second)) if second < first => TrendDirection::Declining,
        Some(_) => TrendDirection::Stable,
    }
}

/// `(second_avg - first_avg) / first_avg * 100`, or 0.0 for n < 2 or a zero first half.
pub fn halves_trend_percentage(values: &[f64]) -> f64 {
    match half_means(values) {
        Some((first, second)) if first != 0.0 => (second - first) / first * 100.0,
        _ => 0.0,
    }
}
