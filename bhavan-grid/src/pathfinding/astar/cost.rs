//! Step costs and heuristics.
//!
//! Two models ship with the crate:
//!
//! | Model | Lateral step | Floor change | Heuristic |
//! |-------|--------------|--------------|-----------|
//! | [`CostMinimizing`] | `g·(1 + entry)`, ×√2 diagonal | `g·(1 + entry)` | planar, or via best shared stair |
//! | [`DistanceMinimizing`] | Euclidean `·g` | `floor_change·g` | 3D Euclidean, `floor_change` cells per floor |
//!
//! Entering a WallBuffer cell adds `wall_buffer·g` in both models, and a
//! WallBuffer current cell adds the same amount to every per-goal estimate.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::{CellPos, CellType};
use crate::query::StairIndex;

use super::types::{CostMode, HeuristicCombine};

/// Cost modifiers in multiples of the grid size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    #[serde(default = "defaults::door_cost")]
    pub door: f64,
    #[serde(default = "defaults::stair_cost")]
    pub stair: f64,
    #[serde(default = "defaults::wall_buffer_cost")]
    pub wall_buffer: f64,
    /// Penalty per floor crossed, also the vertical heuristic scale
    #[serde(default = "defaults::floor_change_cost")]
    pub floor_change: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            door: defaults::door_cost(),
            stair: defaults::stair_cost(),
            wall_buffer: defaults::wall_buffer_cost(),
            floor_change: defaults::floor_change_cost(),
        }
    }
}

impl CostTable {
    /// Surcharge for entering a cell of this category (cost mode).
    #[inline]
    pub fn entry(&self, cell: CellType) -> f64 {
        match cell {
            CellType::Door => self.door,
            CellType::Stair => self.stair,
            CellType::WallBuffer => self.wall_buffer,
            _ => 0.0,
        }
    }
}

/// Pluggable cost and heuristic model for the planner.
pub trait CostModel: Send + Sync {
    /// Cost of moving from `from` to the adjacent state `to`, which holds `to_cell`.
    fn step_cost(&self, from: CellPos, to: CellPos, to_cell: CellType) -> f64;

    /// Estimate from `from` to a single goal, without the wall buffer term.
    /// Infinity marks a goal that cannot be reached from this floor.
    fn estimate(&self, from: CellPos, goal: CellPos, stairs: &StairIndex) -> f64;

    /// Goal-free distance between two states, used for reported path length.
    fn distance(&self, a: CellPos, b: CellPos) -> f64;

    /// Wall buffer penalty in world units.
    fn wall_buffer_penalty(&self) -> f64;
}

/// Per-cell traversal cost with category surcharges.
#[derive(Clone, Debug)]
pub struct CostMinimizing {
    grid_size: f64,
    costs: CostTable,
    allow_diagonal: bool,
}

impl CostMinimizing {
    pub fn new(grid_size: f64, costs: CostTable, allow_diagonal: bool) -> Self {
        Self {
            grid_size,
            costs,
            allow_diagonal,
        }
    }
}

impl CostModel for CostMinimizing {
    fn step_cost(&self, from: CellPos, to: CellPos, to_cell: CellType) -> f64 {
        let g = self.grid_size;
        let cost = g + self.costs.entry(to_cell) * g;
        let diagonal = (from.x - to.x).abs() + (from.y - to.y).abs() == 2;
        if self.allow_diagonal && diagonal {
            cost * SQRT_2
        } else {
            cost
        }
    }

    fn estimate(&self, from: CellPos, goal: CellPos, stairs: &StairIndex) -> f64 {
        let g = self.grid_size;
        if from.floor == goal.floor {
            return from.coord().euclidean_distance(&goal.coord()) * g;
        }
        match stairs.best_transfer(from, goal) {
            Some((_, via)) => via * g + self.costs.floor_change * g * from.floor_delta(&goal) as f64,
            None => f64::INFINITY,
        }
    }

    fn distance(&self, a: CellPos, b: CellPos) -> f64 {
        let g = self.grid_size;
        a.coord().euclidean_distance(&b.coord()) * g + self.costs.floor_change * g * a.floor_delta(&b) as f64
    }

    fn wall_buffer_penalty(&self) -> f64 {
        self.costs.wall_buffer * self.grid_size
    }
}

/// Travel distance with a fixed floor change penalty.
#[derive(Clone, Debug)]
pub struct DistanceMinimizing {
    grid_size: f64,
    costs: CostTable,
}

impl DistanceMinimizing {
    pub fn new(grid_size: f64, costs: CostTable) -> Self {
        Self { grid_size, costs }
    }
}

impl CostModel for DistanceMinimizing {
    fn step_cost(&self, from: CellPos, to: CellPos, to_cell: CellType) -> f64 {
        let g = self.grid_size;
        let mut cost = from.coord().euclidean_distance(&to.coord()) * g;
        if from.floor != to.floor {
            cost += self.costs.floor_change * g;
        }
        if to_cell == CellType::WallBuffer {
            cost += self.costs.wall_buffer * g;
        }
        cost
    }

    fn estimate(&self, from: CellPos, goal: CellPos, _stairs: &StairIndex) -> f64 {
        self.distance(from, goal)
    }

    fn distance(&self, a: CellPos, b: CellPos) -> f64 {
        let planar = a.coord().euclidean_distance(&b.coord());
        let vertical = a.floor_delta(&b) as f64 * self.costs.floor_change;
        planar.hypot(vertical) * self.grid_size
    }

    fn wall_buffer_penalty(&self) -> f64 {
        self.costs.wall_buffer * self.grid_size
    }
}

impl CostMode {
    /// Model for this mode.
    pub fn model(self, grid_size: f64, costs: CostTable, allow_diagonal: bool) -> Box<dyn CostModel> {
        match self {
            CostMode::MinimizeCost => Box::new(CostMinimizing::new(grid_size, costs, allow_diagonal)),
            CostMode::MinimizeDistance => Box::new(DistanceMinimizing::new(grid_size, costs)),
        }
    }
}

/// Multi-goal heuristic: per-goal estimates plus wall buffer term, folded.
pub struct Heuristic<'a> {
    pub model: &'a dyn CostModel,
    pub stairs: &'a StairIndex,
    pub goals: &'a [CellPos],
    pub combine: HeuristicCombine,
}

impl Heuristic<'_> {
    /// Evaluate at `pos`, whose category is `cell`.
    pub fn evaluate(&self, pos: CellPos, cell: CellType) -> f64 {
        let penalty = if cell == CellType::WallBuffer {
            self.model.wall_buffer_penalty()
        } else {
            0.0
        };
        self.combine.combine(
            self.goals
                .iter()
                .map(|goal| self.model.estimate(pos, *goal, self.stairs) + penalty),
        )
    }
}
