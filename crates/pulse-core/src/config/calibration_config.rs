//! Performance review calibration configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Fraction of the distance to the peer mean removed. Default: 0.3.
    pub adjustment_factor: Option<f64>,
    /// Minimum peer reviews. Default: 3.
    pub min_peers: Option<usize>,
    /// |z| beyond which a rating is adjusted. Default: 2.0.
    pub z_cutoff: Option<f64>,
}

impl CalibrationConfig {
    pub fn effective_adjustment_factor(&self) -> f64 {
        self.adjustment_factor
            .unwrap_or(constants::DEFAULT_ADJUSTMENT_FACTOR)
    }

    pub fn effective_min_peers(&self) -> usize {
        self.min_peers.unwrap_or(constants::DEFAULT_MIN_PEERS)
    }

    pub fn effective_z_cutoff(&self) -> f64 {
        self.z_cutoff
            .unwrap_or(constants::DEFAULT_CALIBRATION_Z_CUTOFF)
    }
}
