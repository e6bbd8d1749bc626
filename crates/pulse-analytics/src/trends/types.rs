//! Trend classification types.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl TrendDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dashboard momentum of a KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Momentum {
    Up,
    Down,
    Flat,
}

/// Classify a linear trend fraction against a symmetric threshold.
/// Strictly beyond `threshold` counts as moving.
pub fn classify_momentum(trend_fraction: f64, threshold: f64) -> Momentum {
    if trend_fraction > threshold {
        Momentum::Up
    } else if trend_fraction < -threshold {
        Momentum::Down
    } else {
        Momentum::Flat
    }
}
