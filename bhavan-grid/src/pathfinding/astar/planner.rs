//! Multi-floor, multi-goal A* planner.

use std::ops::ControlFlow;

use log::{debug, trace};
use rayon::prelude::*;

use crate::core::{CellPos, CellType};
use crate::grid::BuildingGrid;
use crate::query::StairIndex;

use super::cost::{CostModel, Heuristic};
use super::frontier::Frontier;
use super::progress::{ProgressCadence, ProgressGate, SearchObserver, SearchSnapshot};
use super::types::{GoalSet, PathFailure, PathResult, PlannerConfig};

const NO_NODE: usize = usize::MAX;

/// A search node; lives in the arena for the duration of one search.
#[derive(Clone, Debug)]
struct SearchNode {
    pos: CellPos,
    g_cost: f64,
    h_cost: f64,
    parent: Option<usize>,
    closed: bool,
}

impl SearchNode {
    #[inline]
    fn f_cost(&self) -> f64 {
        self.g_cost + self.h_cost
    }
}

/// A* planner over a (usually wall-buffered) building grid.
///
/// Lateral moves go to the 4 or 8 neighbors on the same floor; a Stair cell
/// also links to the same coordinate on every other floor where that cell is
/// Stair. Wall cells are never entered, WallBuffer cells only when
/// [`PlannerConfig::wall_buffer_passable`] is set. Closed cells are never
/// reopened.
pub struct MultiFloorPlanner<'a> {
    grid: &'a BuildingGrid,
    config: PlannerConfig,
    stairs: StairIndex,
    model: Box<dyn CostModel>,
}

impl<'a> MultiFloorPlanner<'a> {
    /// Create a planner using the model of `config.mode`.
    pub fn new(grid: &'a BuildingGrid, config: PlannerConfig) -> Self {
        let model = config
            .mode
            .model(grid.grid_size(), config.costs.clone(), config.allow_diagonal);
        Self::with_model(grid, config, model)
    }

    /// Create a planner with a custom cost model.
    pub fn with_model(grid: &'a BuildingGrid, config: PlannerConfig, model: Box<dyn CostModel>) -> Self {
        Self {
            stairs: StairIndex::build(grid),
            grid,
            config,
            model,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a BuildingGrid) -> Self {
        Self::new(grid, PlannerConfig::default())
    }

    /// Grid this planner searches.
    pub fn grid(&self) -> &'a BuildingGrid {
        self.grid
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn stairs(&self) -> &StairIndex {
        &self.stairs
    }

    pub fn model(&self) -> &dyn CostModel {
        self.model.as_ref()
    }

    /// Multi-goal heuristic for `goals` under this planner's model.
    pub fn heuristic<'h>(&'h self, goals: &'h [CellPos]) -> Heuristic<'h> {
        Heuristic {
            model: self.model.as_ref(),
            stairs: &self.stairs,
            goals,
            combine: self.config.combine,
        }
    }

    /// Can the walker step into this cell?
    #[inline]
    fn enterable(&self, cell: CellType) -> bool {
        match cell {
            CellType::Wall => false,
            CellType::WallBuffer => self.config.wall_buffer_passable,
            _ => true,
        }
    }

    /// Find a path from `start` to the cheapest-to-reach goal.
    pub fn find_path(&self, start: CellPos, goals: &GoalSet) -> PathResult {
        self.search(start, goals, None)
    }

    /// Find a path, reporting progress to `observer` at `cadence`.
    pub fn find_path_observed(
        &self,
        start: CellPos,
        goals: &GoalSet,
        cadence: ProgressCadence,
        observer: &mut dyn SearchObserver,
    ) -> PathResult {
        self.search(start, goals, Some((ProgressGate::new(cadence), observer)))
    }

    /// Goals reachable from `start`, each checked by an independent search.
    ///
    /// The searches share the read-only grid and run in parallel.
    pub fn reachable_goals(&self, start: CellPos, goals: &GoalSet) -> Vec<CellPos> {
        goals
            .as_slice()
            .par_iter()
            .filter(|goal| self.find_path(start, &GoalSet::single(**goal)).success)
            .copied()
            .collect()
    }

    fn search(
        &self,
        start: CellPos,
        goals: &GoalSet,
        mut progress: Option<(ProgressGate, &mut dyn SearchObserver)>,
    ) -> PathResult {
        trace!(
            "[AStar] search: start={} goals={} mode={:?} diagonal={}",
            start,
            goals.len(),
            self.config.mode,
            self.config.allow_diagonal
        );

        if goals.is_empty() {
            debug!("[AStar] FAILED: NoGoals");
            return PathResult::failed(PathFailure::NoGoals, 0);
        }
        let Some(start_index) = self.grid.flat_index(start) else {
            debug!("[AStar] FAILED: OutOfBounds - start {} outside grid", start);
            return PathResult::failed(PathFailure::OutOfBounds, 0);
        };

        let total = self.grid.total_cells();
        let mut is_goal = vec![false; total];
        for goal in goals.as_slice() {
            match self.grid.flat_index(*goal) {
                Some(i) => is_goal[i] = true,
                None => {
                    debug!("[AStar] FAILED: OutOfBounds - goal {} outside grid", goal);
                    return PathResult::failed(PathFailure::OutOfBounds, 0);
                }
            }
        }

        let heuristic = self.heuristic(goals.as_slice());
        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut node_of = vec![NO_NODE; total];
        let mut frontier = Frontier::new();

        let start_cell = self.grid.get(start).unwrap_or_default();
        nodes.push(SearchNode {
            pos: start,
            g_cost: 0.0,
            h_cost: heuristic.evaluate(start, start_cell),
            parent: None,
            closed: false,
        });
        node_of[start_index] = 0;
        frontier.push(0, nodes[0].f_cost());

        let mut nodes_expanded = 0;
        let mut neighbors = Vec::with_capacity(8 + self.grid.floor_count());

        while let Some(current) = frontier.pop() {
            let pos = nodes[current].pos;
            let Some(current_index) = self.grid.flat_index(pos) else {
                continue;
            };

            // Goal reached
            if is_goal[current_index] {
                return self.reconstruct_path(&nodes, current, nodes_expanded);
            }

            nodes_expanded += 1;
            if self
                .config
                .max_iterations
                .is_some_and(|cap| nodes_expanded > cap)
            {
                debug!(
                    "[AStar] FAILED: MaxIterationsExceeded ({} nodes)",
                    nodes_expanded
                );
                return PathResult::failed(PathFailure::MaxIterationsExceeded, nodes_expanded);
            }
            nodes[current].closed = true;

            neighbors.clear();
            self.collect_neighbors(pos, &mut neighbors);

            for &(next, next_cell) in &neighbors {
                let Some(next_index) = self.grid.flat_index(next) else {
                    continue;
                };
                let existing = node_of[next_index];
                if existing != NO_NODE && nodes[existing].closed {
                    continue;
                }

                let tentative_g = nodes[current].g_cost + self.model.step_cost(pos, next, next_cell);

                if existing == NO_NODE {
                    let id = nodes.len();
                    nodes.push(SearchNode {
                        pos: next,
                        g_cost: tentative_g,
                        h_cost: heuristic.evaluate(next, next_cell),
                        parent: Some(current),
                        closed: false,
                    });
                    node_of[next_index] = id;
                    frontier.push(id, nodes[id].f_cost());
                } else if tentative_g < nodes[existing].g_cost {
                    let node = &mut nodes[existing];
                    node.g_cost = tentative_g;
                    node.parent = Some(current);
                    frontier.decrease_key(existing, node.f_cost());
                }
            }

            if let Some((gate, observer)) = progress.as_mut() {
                if gate.tick() {
                    let snapshot = Self::snapshot(&nodes, &frontier, current, nodes_expanded);
                    if let ControlFlow::Break(()) = observer.on_progress(&snapshot) {
                        debug!("[AStar] cancelled after {} expansions", nodes_expanded);
                        return PathResult::failed(PathFailure::Cancelled, nodes_expanded);
                    }
                }
            }
        }

        debug!(
            "[AStar] FAILED: NoPath after expanding {} nodes",
            nodes_expanded
        );
        PathResult::failed(PathFailure::NoPath, nodes_expanded)
    }

    /// Lateral neighbors first (cardinals, then diagonals), then stair portals.
    fn collect_neighbors(&self, pos: CellPos, out: &mut Vec<(CellPos, CellType)>) {
        let Some(floor) = self.grid.floor(pos.floor) else {
            return;
        };
        let coord = pos.coord();
        let candidates = coord.neighbors_8();
        let count = if self.config.allow_diagonal { 8 } else { 4 };
        for n in &candidates[..count] {
            if let Some(cell) = floor.get(*n) {
                if self.enterable(cell) {
                    out.push((n.on_floor(pos.floor), cell));
                }
            }
        }
        for portal in self.stairs.portals(self.grid, pos) {
            out.push((portal, CellType::Stair));
        }
    }

    fn path_to(nodes: &[SearchNode], node: usize) -> Vec<CellPos> {
        let mut path = Vec::new();
        let mut cursor = Some(node);
        while let Some(i) = cursor {
            path.push(nodes[i].pos);
            cursor = nodes[i].parent;
        }
        path.reverse();
        path
    }

    fn snapshot(nodes: &[SearchNode], frontier: &Frontier, current: usize, expansions: usize) -> SearchSnapshot {
        SearchSnapshot {
            expansions,
            current: nodes[current].pos,
            closed: nodes.iter().filter(|n| n.closed).map(|n| n.pos).collect(),
            frontier: frontier.ids().map(|i| nodes[i].pos).collect(),
            current_path: Self::path_to(nodes, current),
        }
    }

    /// Reconstruct the path by walking parent links back to the start
    fn reconstruct_path(&self, nodes: &[SearchNode], goal: usize, nodes_expanded: usize) -> PathResult {
        let path = Self::path_to(nodes, goal);
        let length = path
            .windows(2)
            .map(|w| self.model.distance(w[0], w[1]))
            .sum();
        let cost = nodes[goal].g_cost;

        trace!(
            "[AStar] SUCCESS: path {} cells, cost={:.3}, length={:.3}, nodes_expanded={}",
            path.len(),
            cost,
            length,
            nodes_expanded
        );

        PathResult {
            reached_goal: path.last().copied(),
            path,
            cost,
            length,
            nodes_expanded,
            success: true,
            failure_reason: None,
        }
    }
}
