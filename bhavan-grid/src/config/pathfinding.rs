//! Pathfinding configuration section.

use serde::{Deserialize, Serialize};

use crate::grid::WallBufferExpander;
use crate::pathfinding::{CostMode, CostTable, HeuristicCombine, PlannerConfig};

use super::defaults;

/// Pathfinding configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathfindingSection {
    /// `minimize_cost` or `minimize_distance`
    #[serde(default)]
    pub mode: CostMode,

    /// 8-connected moves
    #[serde(default = "defaults::enabled")]
    pub diagonal: bool,

    /// Multi-goal heuristic: `min` or `sum`
    #[serde(default)]
    pub heuristic: HeuristicCombine,

    /// Wall buffer radius (meters); 0 disables the buffer
    #[serde(default)]
    pub wall_buffer: f64,

    /// Allow entering buffer cells at the buffer surcharge
    #[serde(default)]
    pub wall_buffer_passable: bool,

    /// Expansion limit per search; unset means no limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,

    /// Surcharges in multiples of the grid size
    #[serde(default)]
    pub costs: CostTable,
}

impl Default for PathfindingSection {
    fn default() -> Self {
        Self {
            mode: CostMode::default(),
            diagonal: defaults::enabled(),
            heuristic: HeuristicCombine::default(),
            wall_buffer: 0.0,
            wall_buffer_passable: false,
            max_iterations: None,
            costs: CostTable::default(),
        }
    }
}

impl PathfindingSection {
    /// Convert to PlannerConfig
    pub fn to_planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            mode: self.mode,
            allow_diagonal: self.diagonal,
            combine: self.heuristic,
            costs: self.costs.clone(),
            max_iterations: self.max_iterations,
            wall_buffer_passable: self.wall_buffer_passable,
        }
    }

    /// Buffer expander for a grid of the given cell size.
    pub fn wall_buffer_expander(&self, grid_size: f64) -> WallBufferExpander {
        WallBufferExpander::from_world_radius(self.wall_buffer, grid_size)
    }
}
