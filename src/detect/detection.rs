//! Robust z-score dislocation detection with non-maximum suppression.

use std::collections::HashSet;

use super::{Dislocation, DislocationConfig, DislocationKind};
use crate::surface::SurfaceGrid;

/// Detect dislocations along one strike slice
///
/// # Arguments
/// * `vols` - Implied vols ordered by strike index
/// * `maturity_idx` - Maturity column the slice was taken from
/// * `config` - Detection configuration
///
/// # Returns
/// Dislocations after non-maximum suppression, strongest first
pub fn detect_dislocations(
    vols: &[f64],
    maturity_idx: usize,
    config: &DislocationConfig,
) -> Vec<Dislocation> {
    let n = vols.len();
    if n <= config.window.saturating_mul(2) {
        return Vec::new(); // Not enough data for neighborhood
    }

    let mut candidates: Vec<Dislocation> = Vec::new();

    for i in config.window..(n - config.window) {
        let (baseline, mad_scale) = neighborhood_stats(vols, i, config.window);
        let z = (vols[i] - baseline) / mad_scale.max(config.epsilon);

        if z.abs() >= config.threshold {
            let kind = if z > 0.0 {
                DislocationKind::Spike
            } else {
                DislocationKind::Trough
            };

            candidates.push(Dislocation {
                strike_idx: i,
                maturity_idx,
                z_score: z,
                kind,
                vol: vols[i],
                baseline,
            });
        }
    }

    non_maximum_suppression(candidates, config.suppression_radius)
}

/// Robust z-score of a single strike, `None` when the window does not fit
pub fn robust_z_score(vols: &[f64], idx: usize, config: &DislocationConfig) -> Option<f64> {
    if idx < config.window || idx.saturating_add(config.window) >= vols.len() {
        return None;
    }
    let (median, mad_scale) = neighborhood_stats(vols, idx, config.window);
    Some((vols[idx] - median) / mad_scale.max(config.epsilon))
}

/// Run detection over every maturity column of the grid
pub fn scan_surface(grid: &SurfaceGrid, config: &DislocationConfig) -> Vec<Dislocation> {
    let mut found: Vec<Dislocation> = (0..=grid.steps())
        .flat_map(|m| detect_dislocations(&grid.strike_slice(m), m, config))
        .collect();

    found.sort_by(|a, b| {
        b.z_score
            .abs()
            .partial_cmp(&a.z_score.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    found
}

/// Neighborhood median and MAD scale (excluding the center)
///
/// MAD_scale = 1.4826 * median(|x - median|)
fn neighborhood_stats(values: &[f64], center: usize, window: usize) -> (f64, f64) {
    let mut neighborhood: Vec<f64> = Vec::with_capacity(2 * window);

    for offset in 1..=window {
        if center >= offset {
            neighborhood.push(values[center - offset]);
        }
        if center + offset < values.len() {
            neighborhood.push(values[center + offset]);
        }
    }

    if neighborhood.is_empty() {
        return (values[center], 1.0);
    }

    let median = median_of(&mut neighborhood);
    let mut abs_devs: Vec<f64> = neighborhood.iter().map(|&x| (x - median).abs()).collect();
    let mad = median_of(&mut abs_devs);

    (median, 1.4826 * mad)
}

fn median_of(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Sort by |z| descending, accept strongest, suppress within ±radius
fn non_maximum_suppression(mut candidates: Vec<Dislocation>, radius: usize) -> Vec<Dislocation> {
    candidates.sort_by(|a, b| {
        b.z_score
            .abs()
            .partial_cmp(&a.z_score.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut accepted: Vec<Dislocation> = Vec::new();
    let mut suppressed: HashSet<usize> = HashSet::new();

    for candidate in candidates {
        if suppressed.contains(&candidate.strike_idx) {
            continue;
        }

        let idx = candidate.strike_idx;
        for offset in 1..=radius {
            if idx >= offset {
                suppressed.insert(idx - offset);
            }
            suppressed.insert(idx + offset);
        }
        accepted.push(candidate);
    }

    accepted
}
