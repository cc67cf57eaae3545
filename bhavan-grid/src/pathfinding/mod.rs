//! Path planning on the building grid.
//!
//! ```rust,ignore
//! use bhavan_grid::pathfinding::{GoalSet, MultiFloorPlanner, PlannerConfig};
//!
//! let planner = MultiFloorPlanner::new(buffered.grid(), PlannerConfig::default());
//! let result = planner.find_path(start, &GoalSet::single(goal));
//! if result.success {
//!     println!("{} cells, length {:.2}", result.path.len(), result.length);
//! }
//! ```

pub mod astar;

pub use astar::{
    CostMinimizing, CostMode, CostModel, CostTable, DistanceMinimizing, GoalSet, Heuristic,
    HeuristicCombine, MultiFloorPlanner, PathFailure, PathResult, PlannerConfig, ProgressCadence,
    SearchObserver, SearchSnapshot, find_path,
};
