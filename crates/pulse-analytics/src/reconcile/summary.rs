//! Roll-up of stored outlier records.

use std::collections::BTreeMap;

use pulse_core::config::OutlierSummaryConfig;
use pulse_core::constants::SECONDS_PER_DAY;
use serde::{Deserialize, Serialize};

use crate::outliers::Severity;
use crate::samples::MetricCategory;
use crate::stats::round_to;

use super::types::StoredOutlierRecord;

/// Optional record filter applied before summarizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub severity: Option<Severity>,
    pub resolved: Option<bool>,
}

impl RecordFilter {
    pub fn matches(&self, record: &StoredOutlierRecord) -> bool {
        self.severity.map_or(true, |s| record.severity == s)
            && self.resolved.map_or(true, |r| record.is_resolved() == r)
    }

    pub fn apply<'a>(&self, records: &'a [StoredOutlierRecord]) -> Vec<&'a StoredOutlierRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSummary {
    pub total: usize,
    /// Always holds all four tiers.
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_category: BTreeMap<MetricCategory, usize>,
    /// Identified within the recent window.
    pub recent: usize,
    /// Percent of records resolved, 2 decimals.
    pub resolution_rate: f64,
    /// Mean whole days from identification to resolution over resolved records.
    pub average_resolution_days: f64,
}

/// Summarize `records`. "Recent" means identified within the configured window before `now`.
pub fn summarize_records<'a, I>(
    records: I,
    now: i64,
    config: &OutlierSummaryConfig,
) -> OutlierSummary
where
    I: IntoIterator<Item = &'a StoredOutlierRecord>,
{
    let window_days = config.effective_recent_window_days();
    let recent_cutoff = now - i64::from(window_days) * SECONDS_PER_DAY;
    let mut by_severity: BTreeMap<Severity, usize> =
        Severity::ALL.iter().map(|s| (*s, 0)).collect();
    let mut by_category = BTreeMap::new();
    let mut total = 0usize;
    let mut recent = 0usize;
    let mut resolved = 0usize;
    let mut resolution_days = 0i64;

    for record in records {
        total += 1;
        *by_severity.entry(record.severity).or_insert(0) += 1;
        *by_category.entry(record.category).or_insert(0) += 1;
        if record.identified_at >= recent_cutoff {
            recent += 1;
        }
        if let Some(resolved_at) = record.resolved_at {
            resolved += 1;
            resolution_days += (resolved_at - record.identified_at).div_euclid(SECONDS_PER_DAY);
        }
    }

    OutlierSummary {
        total,
        by_severity,
        by_category,
        recent,
        resolution_rate: if total == 0 {
            0.0
        } else {
            round_to(resolved as f64 / total as f64 * 100.0, 2)
        },
        average_resolution_days: if resolved == 0 {
            0.0
        } else {
            resolution_days as f64 / resolved as f64
        },
    }
}
