//! Anomaly markers and the predicates that decide whether to highlight them.

use serde::{Deserialize, Serialize};

use super::SurfaceGrid;
use crate::detect::{robust_z_score, DislocationConfig};

/// Grid coordinate flagged for visual emphasis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyMarker {
    pub strike_idx: usize,
    pub maturity_idx: usize,
    /// Annotation drawn next to the highlight ring
    pub label: String,
}

impl AnomalyMarker {
    pub fn new(strike_idx: usize, maturity_idx: usize, label: impl Into<String>) -> Self {
        Self {
            strike_idx,
            maturity_idx,
            label: label.into(),
        }
    }
}

impl Default for AnomalyMarker {
    fn default() -> Self {
        Self::new(7, 3, "Arbitrage")
    }
}

/// Decides whether a marker is really anomalous on the current grid
pub trait AnomalyPredicate {
    fn is_anomalous(&self, grid: &SurfaceGrid, marker: &AnomalyMarker) -> bool;
}

impl<F> AnomalyPredicate for F
where
    F: Fn(&SurfaceGrid, &AnomalyMarker) -> bool,
{
    fn is_anomalous(&self, grid: &SurfaceGrid, marker: &AnomalyMarker) -> bool {
        self(grid, marker)
    }
}

/// Highlight every marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl AnomalyPredicate for Always {
    fn is_anomalous(&self, _grid: &SurfaceGrid, _marker: &AnomalyMarker) -> bool {
        true
    }
}

/// Highlight nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl AnomalyPredicate for Never {
    fn is_anomalous(&self, _grid: &SurfaceGrid, _marker: &AnomalyMarker) -> bool {
        false
    }
}

/// Highlight when the marker is a dislocation along its strike slice
#[derive(Debug, Clone, Default)]
pub struct DislocationPredicate {
    pub config: DislocationConfig,
}

impl DislocationPredicate {
    pub fn new(config: DislocationConfig) -> Self {
        Self { config }
    }
}

impl AnomalyPredicate for DislocationPredicate {
    fn is_anomalous(&self, grid: &SurfaceGrid, marker: &AnomalyMarker) -> bool {
        let slice = grid.strike_slice(marker.maturity_idx);
        robust_z_score(&slice, marker.strike_idx, &self.config)
            .map(|z| z.abs() >= self.config.threshold)
            .unwrap_or(false)
    }
}

/// Configurable choice of predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    Always,
    #[default]
    Detector,
    Off,
}

impl HighlightMode {
    pub fn label(&self) -> &'static str {
        match self {
            HighlightMode::Always => "Always",
            HighlightMode::Detector => "Detector",
            HighlightMode::Off => "Off",
        }
    }

    pub fn predicate(&self, config: &DislocationConfig) -> Box<dyn AnomalyPredicate> {
        match self {
            HighlightMode::Always => Box::new(Always),
            HighlightMode::Detector => Box::new(DislocationPredicate::new(config.clone())),
            HighlightMode::Off => Box::new(Never),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceParams;

    #[test]
    fn test_detector_flags_seeded_marker() {
        let grid = SurfaceGrid::generate(&SurfaceParams::default());
        let predicate = DislocationPredicate::default();

        assert!(predicate.is_anomalous(&grid, &AnomalyMarker::default()));
        assert!(!predicate.is_anomalous(&grid, &AnomalyMarker::new(5, 3, "ATM")));
    }

    #[test]
    fn test_detector_quiet_without_seed() {
        let params = SurfaceParams {
            anomaly: None,
            ..Default::default()
        };
        let grid = SurfaceGrid::generate(&params);
        assert!(!DislocationPredicate::default().is_anomalous(&grid, &AnomalyMarker::default()));
    }

    #[test]
    fn test_edge_marker_is_never_flagged_by_detector() {
        let grid = SurfaceGrid::generate(&SurfaceParams::default());
        assert!(!DislocationPredicate::default().is_anomalous(&grid, &AnomalyMarker::new(0, 3, "edge")));
    }

    #[test]
    fn test_closure_predicate() {
        let grid = SurfaceGrid::generate(&SurfaceParams::default());
        let above_thirty = |g: &SurfaceGrid, m: &AnomalyMarker| {
            g.vol(m.strike_idx, m.maturity_idx).unwrap_or(0.0) > 0.30
        };
        assert!(above_thirty.is_anomalous(&grid, &AnomalyMarker::default()));
    }

    #[test]
    fn test_modes() {
        let grid = SurfaceGrid::generate(&SurfaceParams::default());
        let marker = AnomalyMarker::new(5, 5, "flat");
        let config = DislocationConfig::default();

        assert!(HighlightMode::Always.predicate(&config).is_anomalous(&grid, &marker));
        assert!(!HighlightMode::Off.predicate(&config).is_anomalous(&grid, &marker));
        assert!(!HighlightMode::Detector.predicate(&config).is_anomalous(&grid, &marker));
        assert_eq!(HighlightMode::default(), HighlightMode::Detector);
    }
}
