//! A* pathfinding across floors.
//!
//! Implements multi-goal A* search on the building grid with support for:
//! - 4- or 8-connected lateral movement
//! - Stair portals between floors
//! - Pluggable cost models ([`CostMinimizing`], [`DistanceMinimizing`])
//! - `Min` / `Sum` heuristic combination over goals
//! - Progress snapshots and cancellation

mod cost;
mod frontier;
mod planner;
mod progress;
mod types;

pub use cost::{CostMinimizing, CostModel, CostTable, DistanceMinimizing, Heuristic};
pub use planner::MultiFloorPlanner;
pub use progress::{ProgressCadence, SearchObserver, SearchSnapshot};
pub use types::{CostMode, GoalSet, HeuristicCombine, PathFailure, PathResult, PlannerConfig};

use crate::core::CellPos;
use crate::grid::BuildingGrid;

/// Quick path finding with the given configuration
pub fn find_path(grid: &BuildingGrid, start: CellPos, goals: &GoalSet, config: PlannerConfig) -> PathResult {
    MultiFloorPlanner::new(grid, config).find_path(start, goals)
}
