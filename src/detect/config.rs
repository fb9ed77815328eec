//! Configuration for dislocation detection

use serde::{Deserialize, Serialize};

use crate::core::{DashError, DashResult};

/// Largest neighbourhood half-width accepted by `validate`
pub const MAX_WINDOW: usize = 64;

/// Dislocation detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DislocationConfig {
    /// Window size (strikes on each side, excluding center)
    /// Default: 2 (5-point neighborhood)
    pub window: usize,

    /// Z-score threshold for candidate detection
    /// |z| >= threshold marks a candidate
    /// Default: 2.5
    pub threshold: f64,

    /// Non-maximum suppression radius (strikes)
    /// Default: 1
    pub suppression_radius: usize,

    /// Minimum scale (MAD) to avoid division by near-zero
    /// Default: 1e-6
    pub epsilon: f64,
}

impl Default for DislocationConfig {
    fn default() -> Self {
        Self {
            window: 2,
            threshold: 2.5,
            suppression_radius: 1,
            epsilon: 1e-6,
        }
    }
}

impl DislocationConfig {
    /// Lower threshold, more dislocations
    pub fn sensitive() -> Self {
        Self {
            threshold: 2.0,
            ..Default::default()
        }
    }

    /// Higher threshold, fewer dislocations
    pub fn strict() -> Self {
        Self {
            threshold: 3.5,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.window == 0 {
            return Err(DashError::invalid_input("detection window must be at least 1"));
        }
        if self.window > MAX_WINDOW {
            return Err(DashError::invalid_input(format!(
                "detection window must be at most {}, got {}",
                MAX_WINDOW, self.window
            )));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(DashError::invalid_input(format!(
                "detection threshold must be positive, got {}",
                self.threshold
            )));
        }
        if !(self.epsilon > 0.0) {
            return Err(DashError::invalid_input("detection epsilon must be positive"));
        }
        Ok(())
    }
}
