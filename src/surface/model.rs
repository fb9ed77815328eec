//! Synthetic implied volatility model
//!
//! Closed-form smile + term structure used to populate the surface:
//!
//! iv(s, m) = base + smile(s) + term(m) + bump(s, m)
//!
//! where `smile(s) = a·(s/N − ½)²` is convex with its minimum at the middle
//! strike, `term(m) = b·√(m/N)` rises with maturity, and `bump` is a fixed
//! excess at one seeded coordinate.

use serde::{Deserialize, Serialize};

use crate::core::{DashError, DashResult};

/// Fixed vol excess injected at one grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalySeed {
    pub strike_idx: usize,
    pub maturity_idx: usize,
    pub bump: f64,
}

impl Default for AnomalySeed {
    fn default() -> Self {
        Self {
            strike_idx: 7,
            maturity_idx: 3,
            bump: 0.08,
        }
    }
}

/// Largest grid resolution accepted by `validate`
pub const MAX_STEPS: usize = 1000;

/// Parameters of the synthetic surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Index range is 0..=steps on both axes
    pub steps: usize,
    /// Level of the surface (0.20 = 20%)
    pub base_vol: f64,
    /// Smile convexity
    pub smile_coefficient: f64,
    /// Term structure slope
    pub term_coefficient: f64,
    /// Seeded anomaly, if any
    pub anomaly: Option<AnomalySeed>,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            steps: 10,
            base_vol: 0.20,
            smile_coefficient: 0.15,
            term_coefficient: 0.05,
            anomaly: Some(AnomalySeed::default()),
        }
    }
}

impl SurfaceParams {
    /// Fraction of the axis covered by an index
    pub fn fraction(&self, idx: usize) -> f64 {
        idx as f64 / self.steps as f64
    }

    /// Skew contribution at a strike index
    pub fn smile(&self, strike_idx: usize) -> f64 {
        self.smile_coefficient * (self.fraction(strike_idx) - 0.5).powi(2)
    }

    /// Term structure contribution at a maturity index
    pub fn term_structure(&self, maturity_idx: usize) -> f64 {
        self.term_coefficient * self.fraction(maturity_idx).sqrt()
    }

    /// Seeded excess at a coordinate (zero everywhere but the seed)
    pub fn anomaly_bump(&self, strike_idx: usize, maturity_idx: usize) -> f64 {
        match self.anomaly {
            Some(seed) if seed.strike_idx == strike_idx && seed.maturity_idx == maturity_idx => {
                seed.bump
            }
            _ => 0.0,
        }
    }

    /// Implied volatility at a grid coordinate
    pub fn implied_vol(&self, strike_idx: usize, maturity_idx: usize) -> f64 {
        self.base_vol
            + self.smile(strike_idx)
            + self.term_structure(maturity_idx)
            + self.anomaly_bump(strike_idx, maturity_idx)
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.steps == 0 {
            return Err(DashError::invalid_input("surface needs at least one step"));
        }
        if self.steps > MAX_STEPS {
            return Err(DashError::invalid_input(format!(
                "surface steps must be at most {}, got {}",
                MAX_STEPS, self.steps
            )));
        }
        if let Some(seed) = self.anomaly {
            if seed.strike_idx > self.steps || seed.maturity_idx > self.steps {
                return Err(DashError::invalid_input(format!(
                    "anomaly seed ({}, {}) outside 0..={}",
                    seed.strike_idx, seed.maturity_idx, self.steps
                )));
            }
        }
        Ok(())
    }
}
