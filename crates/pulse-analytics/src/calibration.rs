//! Peer calibration of performance review ratings.
//!
//! A rating whose peer z-score exceeds the cut-off moves toward the peer
//! mean by a fixed fraction of the distance.

use pulse_core::config::CalibrationConfig;
use serde::{Deserialize, Serialize};

use crate::stats::{self, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalibrationOutcome {
    InsufficientPeers {
        peer_count: usize,
    },
    Calibrated {
        original: f64,
        /// 2 decimals.
        calibrated: f64,
        /// 2 decimals.
        peer_average: f64,
        /// 2 decimals; 0 when peers have no spread.
        z_score: f64,
        peer_count: usize,
        /// The rating was moved toward the peer mean.
        adjusted: bool,
    },
}

pub fn calibrate_rating(
    rating: f64,
    peer_ratings: &[f64],
    config: &CalibrationConfig,
) -> CalibrationOutcome {
    let peer_count = peer_ratings.len();
    if peer_count < config.effective_min_peers() {
        return CalibrationOutcome::InsufficientPeers { peer_count };
    }
    let (Ok(peer_average), Ok(peer_std)) =
        (stats::mean(peer_ratings), stats::population_stddev(peer_ratings))
    else {
        return CalibrationOutcome::InsufficientPeers { peer_count };
    };

    let z = if peer_std > 0.0 {
        (rating - peer_average) / peer_std
    } else {
        0.0
    };
    let adjusted = z.abs() > config.effective_z_cutoff();
    let calibrated = if adjusted {
        rating - config.effective_adjustment_factor() * (rating - peer_average)
    } else {
        rating
    };

    tracing::debug!(peer_count, z_score = z, adjusted, "rating calibrated");
    CalibrationOutcome::Calibrated {
        original: rating,
        calibrated: round_to(calibrated, 2),
        peer_average: round_to(peer_average, 2),
        z_score: round_to(z, 2),
        peer_count,
        adjusted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_peers() {
        let outcome = calibrate_rating(4.0, &[3.0, 3.5], &CalibrationConfig::default());
        assert_eq!(outcome, CalibrationOutcome::InsufficientPeers { peer_count: 2 });
    }

    #[test]
    fn test_outlier_rating_moves_toward_mean() {
        // peers: mean 3.0, stddev 0.5
        let peers = [2.5, 3.5, 2.5, 3.5];
        let outcome = calibrate_rating(5.0, &peers, &CalibrationConfig::default());
        let CalibrationOutcome::Calibrated {
            calibrated,
            peer_average,
            z_score,
            adjusted,
            ..
        } = outcome
        else {
            panic!("expected calibration");
        };
        assert!(adjusted);
        assert_eq!(peer_average, 3.0);
        assert_eq!(z_score, 4.0);
        assert_eq!(calibrated, 4.4);
    }

    #[test]
    fn test_low_outlier_moves_up() {
        let peers = [2.5, 3.5, 2.5, 3.5];
        let outcome = calibrate_rating(1.0, &peers, &CalibrationConfig::default());
        assert!(matches!(
            outcome,
            CalibrationOutcome::Calibrated { calibrated, adjusted: true, .. } if calibrated == 1.6
        ));
    }

    #[test]
    fn test_within_cutoff_unchanged() {
        let peers = [2.5, 3.5, 2.5, 3.5];
        let outcome = calibrate_rating(3.5, &peers, &CalibrationConfig::default());
        assert!(matches!(
            outcome,
            CalibrationOutcome::Calibrated { calibrated, adjusted: false, .. } if calibrated == 3.5
        ));
    }

    #[test]
    fn test_identical_peers_never_adjust() {
        let outcome = calibrate_rating(1.0, &[4.0, 4.0, 4.0], &CalibrationConfig::default());
        assert!(matches!(
            outcome,
            CalibrationOutcome::Calibrated { z_score, adjusted: false, .. } if z_score == 0.0
        ));
    }
}
