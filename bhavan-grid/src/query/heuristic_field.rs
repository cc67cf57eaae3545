//! Sparse sampling of the planner heuristic over one floor.
//!
//! The heuristic is evaluated on an `n × n` lattice spread evenly over the
//! floor (indices truncated, duplicates dropped). Wall cells are skipped.
//! Useful for inspecting how a goal set steers the search.

use serde::{Deserialize, Serialize};

use crate::core::{CellPos, CellType, GridCoord};
use crate::grid::BuildingGrid;
use crate::pathfinding::MultiFloorPlanner;

/// One lattice sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicSample {
    pub coord: GridCoord,
    /// Combined heuristic; infinite when no goal is reachable from here
    pub value: f64,
}

/// Evenly spaced, truncated, deduplicated indices over `0..len`.
fn lattice_axis(len: usize, samples: usize) -> Vec<i32> {
    if len == 0 || samples == 0 {
        return Vec::new();
    }
    if samples == 1 {
        return vec![0];
    }
    let last = (len - 1) as f64;
    let mut axis: Vec<i32> = (0..samples)
        .map(|i| (last * i as f64 / (samples - 1) as f64) as i32)
        .collect();
    axis.dedup();
    axis
}

/// Sample the planner's heuristic for `goals` on `floor`.
///
/// `walls` supplies the categories used to skip Wall cells (typically the
/// unbuffered grid); the planner's own grid supplies the WallBuffer term.
pub fn sample_heuristic_field(
    planner: &MultiFloorPlanner<'_>,
    walls: &BuildingGrid,
    goals: &[CellPos],
    floor: usize,
    resolution: usize,
) -> Vec<HeuristicSample> {
    let Some(floor_grid) = walls.floor(floor) else {
        return Vec::new();
    };
    if goals.is_empty() {
        return Vec::new();
    }

    let heuristic = planner.heuristic(goals);
    let xs = lattice_axis(floor_grid.width(), resolution);
    let ys = lattice_axis(floor_grid.height(), resolution);
    let mut samples = Vec::with_capacity(xs.len() * ys.len());

    for &x in &xs {
        for &y in &ys {
            let coord = GridCoord::new(x, y);
            if floor_grid.get(coord) == Some(CellType::Wall) {
                continue;
            }
            let pos = coord.on_floor(floor);
            let cell = planner.grid().get(pos).unwrap_or_default();
            samples.push(HeuristicSample {
                coord,
                value: heuristic.evaluate(pos, cell),
            });
        }
    }
    samples
}

/// Smallest and largest finite sample values.
pub fn finite_range(samples: &[HeuristicSample]) -> Option<(f64, f64)> {
    samples
        .iter()
        .map(|s| s.value)
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
