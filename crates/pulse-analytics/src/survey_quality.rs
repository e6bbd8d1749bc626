//! Survey response screening by completion time.

use pulse_core::config::SurveyQualityConfig;
use serde::{Deserialize, Serialize};

use crate::stats::{self, round_to};

pub const HIGH_OUTLIER_RATE_FLAG: &str = "high_outlier_rate";

const FULL_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTiming {
    pub response_id: String,
    /// Missing or zero means the time was not recorded.
    pub completion_time_seconds: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionIssue {
    SuspiciouslyFast,
    UnusuallySlow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedResponse {
    pub response_id: String,
    pub issue: CompletionIssue,
    pub completion_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyQualityReport {
    pub total_responses: usize,
    /// Mean of recorded times, 2 decimals. 0 when none were recorded.
    pub average_completion_time: f64,
    pub median_completion_time: Option<f64>,
    pub outlier_responses: Vec<FlaggedResponse>,
    pub validation_flags: Vec<String>,
    /// 0-100. 0 when there are no responses.
    pub response_quality_score: u32,
}

pub fn check_completion_times(
    responses: &[ResponseTiming],
    config: &SurveyQualityConfig,
) -> SurveyQualityReport {
    let recorded: Vec<(&ResponseTiming, f64)> = responses
        .iter()
        .filter_map(|r| {
            r.completion_time_seconds
                .filter(|t| t.is_finite() && *t > 0.0)
                .map(|t| (r, t))
        })
        .collect();
    let times: Vec<f64> = recorded.iter().map(|(_, t)| *t).collect();

    let average_completion_time = stats::mean(&times).map(|m| round_to(m, 2)).unwrap_or(0.0);
    let median = upper_median(&times);

    let mut outlier_responses = Vec::new();
    if let Some(median) = median {
        let fast = median * config.effective_fast_ratio();
        let slow = median * config.effective_slow_ratio();
        for (response, time) in &recorded {
            let issue = if *time < fast {
                CompletionIssue::SuspiciouslyFast
            } else if *time > slow {
                CompletionIssue::UnusuallySlow
            } else {
                continue;
            };
            outlier_responses.push(FlaggedResponse {
                response_id: response.response_id.clone(),
                issue,
                completion_time: *time,
            });
        }
    }

    let mut validation_flags = Vec::new();
    let response_quality_score = if responses.is_empty() {
        0
    } else {
        let share_limit = responses.len() as f64 * config.effective_max_outlier_share();
        if outlier_responses.len() as f64 > share_limit {
            validation_flags.push(HIGH_OUTLIER_RATE_FLAG.to_string());
            FULL_SCORE.saturating_sub(config.effective_penalty())
        } else {
            FULL_SCORE
        }
    };

    tracing::debug!(
        responses = responses.len(),
        flagged = outlier_responses.len(),
        score = response_quality_score,
        "survey quality checked"
    );

    SurveyQualityReport {
        total_responses: responses.len(),
        average_completion_time,
        median_completion_time: median,
        outlier_responses,
        validation_flags,
        response_quality_score,
    }
}

/// Upper-middle element of the sorted times; no interpolation for even counts.
fn upper_median(times: &[f64]) -> Option<f64> {
    let mut sorted = times.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.get(sorted.len() / 2).copied()
}
