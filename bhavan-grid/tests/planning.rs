//! Planning integration tests.
//!
//! Scenario grids are drawn in ASCII (see `common.rs`); the random-layout
//! tests compare A* against an exhaustive Dijkstra over the same moves.

mod common;

use approx::assert_relative_eq;
use bhavan_grid::pathfinding::CostModel;
use bhavan_grid::{
    BoundingBox, BuildingGrid, CellPos, CellType, CostMode, CostTable, FloorBand, FloorGrid,
    GoalSet, GridCoord, MultiFloorPlanner, PathFailure, PlannerConfig, WallBufferExpander,
    detect_exits, find_path,
};
use common::{Lcg, building};

// ============================================================================
// Reference search
// ============================================================================

/// Exhaustive single-floor Dijkstra with the planner's move set.
fn dijkstra(grid: &BuildingGrid, model: &dyn CostModel, diagonal: bool, start: CellPos) -> Vec<f64> {
    let floor = grid.floor(start.floor).expect("floor");
    let n = floor.cell_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut done = vec![false; n];
    let Some(s) = floor.coord_to_index(start.coord()) else {
        return dist;
    };
    dist[s] = 0.0;

    loop {
        let next = (0..n)
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
        let Some(u) = next else {
            break;
        };
        done[u] = true;
        let coord = floor.index_to_coord(u);
        let neighbors = coord.neighbors_8();
        let count = if diagonal { 8 } else { 4 };
        for nb in &neighbors[..count] {
            let Some(cell) = floor.get(*nb) else {
                continue;
            };
            if !cell.is_traversable() {
                continue;
            }
            let Some(v) = floor.coord_to_index(*nb) else {
                continue;
            };
            let step = model.step_cost(
                coord.on_floor(start.floor),
                nb.on_floor(start.floor),
                cell,
            );
            if dist[u] + step < dist[v] {
                dist[v] = dist[u] + step;
            }
        }
    }
    dist
}

fn random_floor(rng: &mut Lcg, width: usize, height: usize) -> FloorGrid {
    let mut floor = FloorGrid::new(width, height);
    for x in 0..width as i32 {
        for y in 0..height as i32 {
            let cell = if rng.chance(25) {
                CellType::Wall
            } else if rng.chance(10) {
                CellType::Door
            } else if rng.chance(50) {
                CellType::Floor
            } else {
                CellType::Empty
            };
            floor.set_type(GridCoord::new(x, y), cell);
        }
    }
    floor
}

fn single_floor(floor: FloorGrid, grid_size: f64) -> BuildingGrid {
    BuildingGrid::new(
        vec![floor],
        vec![FloorBand::new(0.0, 3.0)],
        BoundingBox::empty(),
        grid_size,
    )
    .expect("valid grid")
}

fn check_against_dijkstra(mode: CostMode, diagonal: bool, seed: u64) {
    let mut rng = Lcg::new(seed);
    let grid = single_floor(random_floor(&mut rng, 24, 18), 0.25);
    let floor = grid.floor(0).expect("floor");
    let config = PlannerConfig::default()
        .with_mode(mode)
        .with_diagonal(diagonal);
    let planner = MultiFloorPlanner::new(&grid, config);

    let open: Vec<GridCoord> = floor
        .iter()
        .filter(|(_, c)| c.is_traversable())
        .map(|(coord, _)| coord)
        .collect();

    for trial in 0..6 {
        let start = open[(rng.next_u32() as usize) % open.len()].on_floor(0);
        let reference = dijkstra(&grid, planner.model(), diagonal, start);

        for _ in 0..5 {
            let goal = open[(rng.next_u32() as usize) % open.len()].on_floor(0);
            let expected = reference[floor.coord_to_index(goal.coord()).expect("in grid")];
            let result = planner.find_path(start, &GoalSet::single(goal));

            if expected.is_finite() {
                assert!(
                    result.success,
                    "seed {} trial {}: {} -> {} should be reachable",
                    seed,
                    trial,
                    start,
                    goal
                );
                assert_relative_eq!(result.cost, expected, epsilon = 1e-9);
                assert_eq!(result.path.first(), Some(&start));
                assert_eq!(result.path.last(), Some(&goal));
            } else {
                assert_eq!(result.failure_reason, Some(PathFailure::NoPath));
            }
        }
    }
}

#[test]
fn test_cost_mode_matches_dijkstra_4_connected() {
    for seed in [1, 7, 42] {
        check_against_dijkstra(CostMode::MinimizeCost, false, seed);
    }
}

#[test]
fn test_cost_mode_matches_dijkstra_8_connected() {
    for seed in [3, 11] {
        check_against_dijkstra(CostMode::MinimizeCost, true, seed);
    }
}

#[test]
fn test_distance_mode_matches_dijkstra() {
    for seed in [5, 19] {
        check_against_dijkstra(CostMode::MinimizeDistance, true, seed);
        check_against_dijkstra(CostMode::MinimizeDistance, false, seed);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_path_goes_through_the_door() {
    let grid = building(
        &[&[
            "#######", //
            "#.....#",
            "###D###",
            "#.....#",
            "#######",
        ]],
        0.5,
    );
    let start = CellPos::new(1, 3, 0);
    let goal = CellPos::new(5, 1, 0);
    let result = find_path(&grid, start, &GoalSet::single(goal), PlannerConfig::default());

    assert!(result.success);
    assert!(result.path.contains(&CellPos::new(3, 2, 0)));
    assert!(
        result
            .path
            .iter()
            .all(|p| grid.get(*p) != Some(CellType::Wall))
    );
    // Door surcharge is in the cost, not the length
    assert!(result.cost > result.length + 5.0 * 0.5 - 1e-9);
}

#[test]
fn test_single_stair_transition() {
    let floor = [
        "......", //
        "....S.",
        "......",
    ];
    let grid = building(&[&floor, &floor], 1.0);
    let start = CellPos::new(0, 0, 0);
    let goal = CellPos::new(0, 0, 1);

    for mode in [CostMode::MinimizeCost, CostMode::MinimizeDistance] {
        let config = PlannerConfig::default().with_mode(mode);
        let result = find_path(&grid, start, &GoalSet::single(goal), config);
        assert!(result.success, "{:?}", mode);
        assert_eq!(result.floor_transitions(), 1);

        let hop = result
            .path
            .windows(2)
            .find(|w| w[0].floor != w[1].floor)
            .expect("one hop");
        assert_eq!(hop[0].coord(), GridCoord::new(4, 1));
        assert_eq!(hop[1].coord(), GridCoord::new(4, 1));
    }
}

#[test]
fn test_exits_extend_the_goal_set() {
    let grid = building(
        &[&[
            "         ", //
            " ####### ",
            " #.....# ",
            " #.....D ",
            " #.....# ",
            " ###D### ",
            "         ",
        ]],
        0.5,
    );
    let exits = detect_exits(&grid);
    assert_eq!(exits.len(), 2);

    let mut goals = GoalSet::new();
    assert_eq!(goals.extend_with_exits(&exits), 2);
    assert_eq!(goals.extend_with_exits(&exits), 0);

    // Closer to the east door
    let start = CellPos::new(6, 3, 0);
    let result = find_path(&grid, start, &goals, PlannerConfig::default());
    assert!(result.success);
    assert_eq!(result.reached_goal, Some(CellPos::new(7, 3, 0)));
}

#[test]
fn test_reachable_goals_skip_sealed_rooms() {
    let grid = building(
        &[&[
            "##########", //
            "#...#....#",
            "#...#....#",
            "##########",
        ]],
        0.5,
    );
    let planner = MultiFloorPlanner::with_defaults(&grid);
    let goals: GoalSet = [
        CellPos::new(3, 1, 0),
        CellPos::new(6, 2, 0),
        CellPos::new(1, 2, 0),
    ]
    .into_iter()
    .collect();
    let reachable = planner.reachable_goals(CellPos::new(1, 1, 0), &goals);
    assert_eq!(reachable, vec![CellPos::new(3, 1, 0), CellPos::new(1, 2, 0)]);
}

#[test]
fn test_wall_buffer_closes_narrow_gap() {
    let grid = building(
        &[&[
            "###########", //
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#####.#####",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "###########",
        ]],
        0.5,
    );
    let start = CellPos::new(3, 9, 0);
    let goal = CellPos::new(7, 3, 0);
    let goals = GoalSet::single(goal);

    let open = find_path(&grid, start, &goals, PlannerConfig::default());
    assert!(open.success);

    let buffered = WallBufferExpander::from_world_radius(0.5, grid.grid_size()).apply(&grid);
    assert_eq!(buffered.distance(), 1);
    assert_eq!(buffered.grid().get(CellPos::new(5, 6, 0)), Some(CellType::WallBuffer));
    assert_eq!(buffered.grid().get(start), Some(CellType::Floor));
    assert_eq!(buffered.grid().get(goal), Some(CellType::Floor));

    let blocked = find_path(buffered.grid(), start, &goals, PlannerConfig::default());
    assert_eq!(blocked.failure_reason, Some(PathFailure::NoPath));

    let config = PlannerConfig::default().with_wall_buffer_passable(true);
    let penalized = find_path(buffered.grid(), start, &goals, config);
    assert!(penalized.success);
    assert!(penalized.cost > open.cost);
    // Length ignores the buffer surcharge
    assert!(penalized.length < penalized.cost);
}

#[test]
fn test_door_cost_changes_route() {
    // Through the door (short) or around the east end (long)
    let grid = building(
        &[&[
            "#########", //
            "#.......#",
            "#D#####.#",
            "#.......#",
            "#########",
        ]],
        1.0,
    );
    let start = CellPos::new(1, 1, 0);
    let goal = CellPos::new(1, 3, 0);
    let goals = GoalSet::single(goal);
    let door = CellPos::new(1, 2, 0);

    let default = find_path(&grid, start, &goals, PlannerConfig::default());
    assert!(default.path.contains(&door));
    assert_relative_eq!(default.cost, 7.0, epsilon = 1e-9);

    let expensive_doors = PlannerConfig {
        costs: CostTable {
            door: 20.0,
            ..CostTable::default()
        },
        ..PlannerConfig::default()
    };
    let around = find_path(&grid, start, &goals, expensive_doors);
    assert!(around.success);
    assert!(!around.path.contains(&door));
    assert_relative_eq!(around.cost, 10.0 + 2.0 * std::f64::consts::SQRT_2, epsilon = 1e-9);
}
