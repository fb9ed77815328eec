//! Risk analysis panel

use serde::Serialize;

use super::plain_number;
use crate::core::RiskProfile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBar {
    pub name: String,
    pub value: String,
    /// Fill in [0, 100]
    pub progress: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureBar {
    pub factor: String,
    pub value: String,
    /// Fraction of the track filled, in [0, 1]
    pub width: f64,
    /// Negative exposures fill from the right edge
    pub from_right: bool,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    pub metrics: Vec<RiskBar>,
    pub exposures: Vec<ExposureBar>,
}

pub fn progress(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

pub fn risk_view(profile: &RiskProfile) -> RiskView {
    RiskView {
        metrics: profile
            .metrics
            .iter()
            .map(|m| RiskBar {
                name: m.name.clone(),
                value: plain_number(m.value),
                progress: progress(m.value, m.max),
                description: m.description.clone(),
            })
            .collect(),
        exposures: profile
            .exposures
            .iter()
            .map(|e| ExposureBar {
                factor: e.factor.clone(),
                value: plain_number(e.value),
                width: e.value.abs().min(1.0),
                from_right: e.value < 0.0,
                color: e.color,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_snapshot, DataProvider};

    #[test]
    fn test_sample_risk_view() {
        let view = risk_view(&sample_snapshot().fetch_risk().unwrap());

        assert_eq!(view.metrics[1].name, "Max Drawdown");
        assert!((view.metrics[1].progress - 25.0).abs() < 1e-9);
        assert_eq!(view.metrics[0].value, "1.82");

        let value = &view.exposures[3];
        assert_eq!(value.factor, "Value");
        assert!(value.from_right);
        assert!((value.width - 0.23).abs() < 1e-12);
        assert!(!view.exposures[0].from_right);
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(progress(7.0, 5.0), 100.0);
        assert_eq!(progress(-1.0, 5.0), 0.0);
        assert_eq!(progress(1.0, 0.0), 0.0);
    }
}
