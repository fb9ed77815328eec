//! Dislocation detection on the volatility grid
//!
//! Flags strikes whose implied vol breaks away from the surrounding smile.
//!
//! Two dislocation types:
//! - **Spikes**: vol rich versus neighbours (candidate to sell)
//! - **Troughs**: vol cheap versus neighbours (candidate to buy)
//!
//! Pipeline per maturity column:
//! 1. Robust z-score vs the ±window neighbourhood (median / MAD)
//! 2. Threshold on |z|
//! 3. Non-maximum suppression along the strike axis

mod config;
mod detection;

pub use config::*;
pub use detection::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DislocationKind {
    /// Elevated vol relative to neighbours
    Spike,
    /// Depressed vol relative to neighbours
    Trough,
}

impl DislocationKind {
    pub fn label(&self) -> &'static str {
        match self {
            DislocationKind::Spike => "Spike",
            DislocationKind::Trough => "Trough",
        }
    }
}

/// A flagged grid coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dislocation {
    pub strike_idx: usize,
    pub maturity_idx: usize,
    /// Robust z-score (positive = spike, negative = trough)
    pub z_score: f64,
    pub kind: DislocationKind,
    /// Implied vol at the flagged coordinate
    pub vol: f64,
    /// Neighbourhood median
    pub baseline: f64,
}

impl Dislocation {
    /// Excess vol over the neighbourhood median
    pub fn excess(&self) -> f64 {
        self.vol - self.baseline
    }
}
