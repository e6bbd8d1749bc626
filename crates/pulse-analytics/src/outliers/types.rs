//! Core types for outlier detection.

use std::fmt;

use pulse_core::errors::AnalyticsError;
use pulse_core::types::collections::FactorVec;
use serde::{Deserialize, Serialize};

use super::policy;

/// Severity tier of a flagged entity. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side of the distribution an outlier falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationType {
    Low,
    High,
}

/// Detection method.
///
/// Serialized with the HTTP-facing labels; `RobustMad` is exposed as
/// `isolation_forest` for compatibility, though it is a median/MAD rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutlierMethod {
    #[serde(rename = "z_score", alias = "zscore")]
    ZScore,
    #[serde(rename = "iqr")]
    Iqr,
    #[serde(rename = "isolation_forest", alias = "robust_mad", alias = "mad")]
    RobustMad,
}

impl OutlierMethod {
    pub const ALL: [OutlierMethod; 3] = [Self::ZScore, Self::Iqr, Self::RobustMad];

    /// Parse an internal or external label. Unknown labels are a configuration error.
    pub fn parse(label: &str) -> Result<Self, AnalyticsError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "zscore" | "z_score" => Ok(Self::ZScore),
            "iqr" => Ok(Self::Iqr),
            "robust_mad" | "isolation_forest" | "mad" => Ok(Self::RobustMad),
            _ => Err(AnalyticsError::UnknownMethod(label.to_string())),
        }
    }

    /// Internal name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZScore => "zscore",
            Self::Iqr => "iqr",
            Self::RobustMad => "robust_mad",
        }
    }

    /// Label used by the HTTP layer.
    pub fn external_label(&self) -> &'static str {
        match self {
            Self::ZScore => "z_score",
            Self::Iqr => "iqr",
            Self::RobustMad => "isolation_forest",
        }
    }

    /// Smallest population the method analyzes.
    pub fn min_population(&self) -> usize {
        match self {
            Self::ZScore => policy::MIN_ZSCORE_POPULATION,
            Self::Iqr => policy::MIN_IQR_POPULATION,
            Self::RobustMad => policy::MIN_ROBUST_MAD_POPULATION,
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One flagged entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierResult {
    pub entity_id: String,
    /// The analyzed value.
    pub score: f64,
    pub deviation_type: DeviationType,
    pub severity: Severity,
    pub method: OutlierMethod,
    pub factors: FactorVec<String>,
    /// Signed z-score, 2 decimals. Z-score method only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    /// 0-99. Z-score method only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Sort key: |z| for z-score, |value - median| otherwise.
    pub deviation: f64,
}

/// Render a number the way factor strings expect: integral values keep one decimal.
pub(crate) fn factor_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(OutlierMethod::parse("z_score").unwrap(), OutlierMethod::ZScore);
        assert_eq!(OutlierMethod::parse("ZScore").unwrap(), OutlierMethod::ZScore);
        assert_eq!(OutlierMethod::parse("iqr").unwrap(), OutlierMethod::Iqr);
        assert_eq!(
            OutlierMethod::parse("isolation_forest").unwrap(),
            OutlierMethod::RobustMad
        );
        assert_eq!(OutlierMethod::parse("mad").unwrap(), OutlierMethod::RobustMad);
    }

    #[test]
    fn test_parse_unknown_is_error() {
        let err = OutlierMethod::parse("dbscan").unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_external_labels_round_trip() {
        for method in OutlierMethod::ALL {
            assert_eq!(OutlierMethod::parse(method.external_label()).unwrap(), method);
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.external_label()));
        }
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_factor_number() {
        assert_eq!(factor_number(3.0), "3.0");
        assert_eq!(factor_number(2.65), "2.65");
        assert_eq!(factor_number(-1.5), "-1.5");
    }
}
