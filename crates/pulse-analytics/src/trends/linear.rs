//! Least-squares trend over index positions.

/// OLS slope of `values` against `0..n`. Returns 0.0 for n < 2.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n_f;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let x_diff = i as f64 - x_mean;
        numerator += x_diff * (y - y_mean);
        denominator += x_diff * x_diff;
    }

    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    numerator / denominator
}

/// Total modeled change across the series as a fraction of the first value.
///
/// `slope * (n - 1) / values[0]`. Returns 0.0 for n < 2 or a zero first value.
/// The result is a fraction: 0.25 means +25 %.
pub fn linear_trend_percentage(values: &[f64]) -> f64 {
    if values.len() < 2 || values[0] == 0.0 {
        return 0.0;
    }
    ols_slope(values) * (values.len() - 1) as f64 / values[0]
}
