//! Volatility Surface
//!
//! Synthetic implied-vol surface over strike × maturity and the renderer that
//! paints its 2D projection onto a [`Canvas`].
//!
//! - `model`: closed-form smile + term structure
//! - `geometry`: viewport measured from the hosting container
//! - `color`: vol → RGB ramp
//! - `canvas`: drawing abstraction and retained display list
//! - `anomaly`: predicates deciding whether a marker is highlighted
//! - `renderer`: paint routine and mount/resize/frame/teardown lifecycle

pub mod anomaly;
pub mod canvas;
pub mod color;
pub mod geometry;
pub mod model;
pub mod renderer;

pub use anomaly::*;
pub use canvas::*;
pub use color::*;
pub use geometry::*;
pub use model::*;
pub use renderer::*;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One evaluated coordinate of the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub strike_idx: usize,
    pub maturity_idx: usize,
    /// Strike position in [0, 1]
    pub strike_fraction: f64,
    /// Maturity position in [0, 1]
    pub maturity_fraction: f64,
    /// Implied volatility as a fraction (0.20 = 20%)
    pub implied_vol: f64,
}

/// Implied vols on the full index grid, `[strike_idx, maturity_idx] -> vol`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceGrid {
    steps: usize,
    vols: Array2<f64>,
}

impl SurfaceGrid {
    /// Evaluate the model on every coordinate
    pub fn generate(params: &SurfaceParams) -> Self {
        let n = params.steps + 1;
        let vols = Array2::from_shape_fn((n, n), |(s, m)| params.implied_vol(s, m));
        Self {
            steps: params.steps,
            vols,
        }
    }

    /// Wrap an externally supplied grid (must be square)
    pub fn from_vols(vols: Array2<f64>) -> Option<Self> {
        let (rows, cols) = vols.dim();
        if rows == 0 || rows != cols {
            return None;
        }
        Some(Self {
            steps: rows - 1,
            vols,
        })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn vol(&self, strike_idx: usize, maturity_idx: usize) -> Option<f64> {
        self.vols.get([strike_idx, maturity_idx]).copied()
    }

    /// Vols across strikes for one maturity
    pub fn strike_slice(&self, maturity_idx: usize) -> Vec<f64> {
        if maturity_idx > self.steps {
            return Vec::new();
        }
        self.vols.column(maturity_idx).to_vec()
    }

    /// Vols across maturities for one strike
    pub fn term_slice(&self, strike_idx: usize) -> Vec<f64> {
        if strike_idx > self.steps {
            return Vec::new();
        }
        self.vols.row(strike_idx).to_vec()
    }

    /// Points in paint order: strike-major, maturity-minor
    pub fn points(&self) -> Vec<SurfacePoint> {
        let steps = self.steps as f64;
        self.vols
            .indexed_iter()
            .map(|((s, m), &vol)| SurfacePoint {
                strike_idx: s,
                maturity_idx: m,
                strike_fraction: s as f64 / steps,
                maturity_fraction: m as f64 / steps,
                implied_vol: vol,
            })
            .collect()
    }

    pub fn min_vol(&self) -> f64 {
        self.vols.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_vol(&self) -> f64 {
        self.vols.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}
