//! A* pathfinding types.

use serde::{Deserialize, Serialize};

use crate::core::CellPos;
use crate::query::ExitCandidate;

use super::cost::CostTable;

/// What the planner minimizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// Per-cell traversal cost with door, stair and wall buffer surcharges
    #[default]
    MinimizeCost,
    /// Euclidean travel distance with a fixed floor change penalty
    MinimizeDistance,
}

/// How per-goal heuristic values are folded into one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicCombine {
    /// Closest goal; admissible when every term is
    #[default]
    Min,
    /// Sum over goals; spreads exploration, not admissible
    Sum,
}

impl HeuristicCombine {
    /// Fold per-goal values. An empty input folds to 0.
    pub fn combine<I: IntoIterator<Item = f64>>(self, values: I) -> f64 {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return 0.0;
        };
        match self {
            HeuristicCombine::Min => iter.fold(first, f64::min),
            HeuristicCombine::Sum => iter.fold(first, |acc, v| acc + v),
        }
    }
}

/// Planner configuration
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    pub mode: CostMode,
    /// Allow diagonal movement (8-connected vs 4-connected)
    pub allow_diagonal: bool,
    pub combine: HeuristicCombine,
    /// Entry surcharges and floor change penalty, in multiples of the grid size
    pub costs: CostTable,
    /// Expansion cap; `None` searches until the frontier is exhausted
    pub max_iterations: Option<usize>,
    /// Let the walker enter WallBuffer cells at the buffer surcharge
    pub wall_buffer_passable: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            mode: CostMode::MinimizeCost,
            allow_diagonal: true,
            combine: HeuristicCombine::Min,
            costs: CostTable::default(),
            max_iterations: None,
            wall_buffer_passable: false,
        }
    }
}

impl PlannerConfig {
    pub fn with_mode(mut self, mode: CostMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_diagonal(mut self, allow_diagonal: bool) -> Self {
        self.allow_diagonal = allow_diagonal;
        self
    }

    pub fn with_combine(mut self, combine: HeuristicCombine) -> Self {
        self.combine = combine;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_wall_buffer_passable(mut self, passable: bool) -> Self {
        self.wall_buffer_passable = passable;
        self
    }
}

/// Ordered, duplicate-free list of target cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSet {
    goals: Vec<CellPos>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(goal: CellPos) -> Self {
        Self { goals: vec![goal] }
    }

    /// Append a goal. Returns false if it was already present.
    pub fn push(&mut self, goal: CellPos) -> bool {
        if self.goals.contains(&goal) {
            return false;
        }
        self.goals.push(goal);
        true
    }

    /// Append detected exits, keeping order. Returns how many were new.
    pub fn extend_with_exits(&mut self, exits: &[ExitCandidate]) -> usize {
        exits.iter().filter(|e| self.push(e.position)).count()
    }

    pub fn contains(&self, pos: &CellPos) -> bool {
        self.goals.contains(pos)
    }

    pub fn as_slice(&self) -> &[CellPos] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn clear(&mut self) {
        self.goals.clear();
    }
}

impl FromIterator<CellPos> for GoalSet {
    fn from_iter<I: IntoIterator<Item = CellPos>>(iter: I) -> Self {
        let mut set = GoalSet::new();
        for goal in iter {
            set.push(goal);
        }
        set
    }
}

/// Result of a multi-goal search
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// Cells from start to the reached goal (empty if no path found)
    pub path: Vec<CellPos>,
    /// Accumulated search cost of the path
    pub cost: f64,
    /// Real-world length of the path under the active cost mode
    pub length: f64,
    /// Goal the path ends on
    pub reached_goal: Option<CellPos>,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    /// Create a failed result
    pub(super) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: f64::INFINITY,
            length: 0.0,
            reached_goal: None,
            nodes_expanded,
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Path length in cells
    pub fn length_cells(&self) -> usize {
        self.path.len()
    }

    /// Number of floor changes along the path
    pub fn floor_transitions(&self) -> usize {
        self.path
            .windows(2)
            .filter(|w| w[0].floor != w[1].floor)
            .count()
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathFailure {
    /// Start or a goal is outside the grid
    #[error("start or goal is outside the grid")]
    OutOfBounds,
    /// Goal set is empty
    #[error("no goals given")]
    NoGoals,
    /// Frontier exhausted without reaching a goal
    #[error("no path found to any goal")]
    NoPath,
    /// Maximum iterations exceeded
    #[error("maximum iterations exceeded")]
    MaxIterationsExceeded,
    /// Observer asked to stop
    #[error("search cancelled")]
    Cancelled,
}
