//! Subcommand implementations.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use bhavan_grid::io::{FloorPlanSvg, SvgConfig};
use bhavan_grid::pathfinding::{ProgressCadence, SearchSnapshot};
use bhavan_grid::query::{HeuristicSample, finite_range, sample_heuristic_field};
use bhavan_grid::{
    BhavanConfig, BuildingGrid, CellPos, CostMode, ExitCandidate, GoalSet, HeuristicCombine,
    MeshRecord, MultiFloorPlanner, PathFailure, build_navigation_grid, detect_exits, load_grid,
    save_grid,
};

use crate::error::{NavError, Result};

/// Parse `x,y,floor`.
fn parse_cell(s: &str) -> std::result::Result<CellPos, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, floor] = parts[..] else {
        return Err(format!("expected x,y,floor, got '{}'", s));
    };
    let x = x.parse().map_err(|_| format!("bad x in '{}'", s))?;
    let y = y.parse().map_err(|_| format!("bad y in '{}'", s))?;
    let floor = floor.parse().map_err(|_| format!("bad floor in '{}'", s))?;
    Ok(CellPos::new(x, y, floor))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Door, stair and buffer surcharges
    Cost,
    /// Euclidean distance with a floor change penalty
    Distance,
}

impl From<ModeArg> for CostMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Cost => CostMode::MinimizeCost,
            ModeArg::Distance => CostMode::MinimizeDistance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CombineArg {
    /// Closest goal
    Min,
    /// Sum over goals
    Sum,
}

impl From<CombineArg> for HeuristicCombine {
    fn from(combine: CombineArg) -> Self {
        match combine {
            CombineArg::Min => HeuristicCombine::Min,
            CombineArg::Sum => HeuristicCombine::Sum,
        }
    }
}

#[derive(Args)]
pub struct RasterizeArgs {
    /// Mesh record (JSON)
    pub mesh: PathBuf,

    /// Grid record to write (JSON)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Cell size in meters (overrides the config)
    #[arg(long)]
    pub grid_size: Option<f64>,

    /// Also write an SVG floor plan
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Grid record (JSON)
    pub grid: PathBuf,

    /// Start cell as x,y,floor
    #[arg(long, value_parser = parse_cell)]
    pub start: CellPos,

    /// Goal cell as x,y,floor (repeatable)
    #[arg(long = "goal", value_parser = parse_cell)]
    pub goals: Vec<CellPos>,

    /// Add every detected exit as a goal
    #[arg(long)]
    pub to_exits: bool,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Multi-goal heuristic
    #[arg(long, value_enum)]
    pub heuristic: Option<CombineArg>,

    /// 4-connected moves only
    #[arg(long)]
    pub no_diagonal: bool,

    /// Wall buffer radius in meters
    #[arg(long)]
    pub wall_buffer: Option<f64>,

    /// Allow entering wall buffer cells at the buffer surcharge
    #[arg(long)]
    pub wall_buffer_passable: bool,

    /// Log search progress this many times per second
    #[arg(long)]
    pub progress_fps: Option<f64>,

    /// Sample the heuristic on an NxN lattice of the start floor
    #[arg(long, value_name = "N")]
    pub field: Option<usize>,

    /// Write the result as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write an SVG of the floors the path visits
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExitsArgs {
    /// Grid record (JSON)
    pub grid: PathBuf,

    /// Print exits as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Grid record (JSON)
    pub grid: PathBuf,

    /// Only this floor
    #[arg(long)]
    pub floor: Option<usize>,

    /// Print each floor as ASCII
    #[arg(long)]
    pub ascii: bool,

    /// Write an SVG floor plan
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    start: CellPos,
    goals: &'a [CellPos],
    reached_goal: Option<CellPos>,
    length: f64,
    cost: f64,
    nodes_expanded: usize,
    floor_transitions: usize,
    path: &'a [CellPos],
    #[serde(skip_serializing_if = "Option::is_none")]
    heuristic_field: Option<&'a [HeuristicSample]>,
}

pub fn rasterize(config: &BhavanConfig, args: &RasterizeArgs) -> Result<()> {
    let mut raster = config.to_rasterizer_config();
    if let Some(grid_size) = args.grid_size {
        if !(grid_size > 0.0 && grid_size.is_finite()) {
            return Err(NavError::InvalidArgument(format!(
                "grid size must be positive, got {}",
                grid_size
            )));
        }
        raster = raster.with_grid_size(grid_size);
    }

    let record = MeshRecord::load(&args.mesh)?;
    let (grid, stats) = build_navigation_grid(&record, &raster)?;
    info!(
        "Rasterized {} triangles from {} elements ({} failed, {} outside every floor)",
        stats.triangles, stats.elements, stats.elements_failed, stats.triangles_outside_bands
    );
    if stats.triangles_outside_bands > 0 {
        warn!(
            "{} triangles did not overlap any floor band",
            stats.triangles_outside_bands
        );
    }
    log_summary(&grid);

    save_grid(&grid, &args.output)?;
    if let Some(svg) = &args.svg {
        FloorPlanSvg::new(&grid, SvgConfig::default()).save(svg)?;
    }
    Ok(())
}

pub fn plan(config: &BhavanConfig, args: &PlanArgs) -> Result<()> {
    let grid = load_grid(&args.grid)?;

    let mut section = config.pathfinding.clone();
    if let Some(mode) = args.mode {
        section.mode = mode.into();
    }
    if let Some(combine) = args.heuristic {
        section.heuristic = combine.into();
    }
    if args.no_diagonal {
        section.diagonal = false;
    }
    if let Some(radius) = args.wall_buffer {
        section.wall_buffer = radius;
    }
    if args.wall_buffer_passable {
        section.wall_buffer_passable = true;
    }

    let buffered = section.wall_buffer_expander(grid.grid_size()).apply(&grid);
    info!(
        "Wall buffer: {:.2} m = {} cells",
        section.wall_buffer,
        buffered.distance()
    );

    let mut goals: GoalSet = args.goals.iter().copied().collect();
    if args.to_exits {
        let added = goals.extend_with_exits(&detect_exits(&grid));
        info!("Added {} exits as goals", added);
    }
    if goals.is_empty() {
        return Err(NavError::InvalidArgument(
            "no goals: pass --goal or --to-exits".to_string(),
        ));
    }

    let planner = MultiFloorPlanner::new(buffered.grid(), section.to_planner_config());
    info!(
        "Planning from {} to {} goal(s), mode {:?}, heuristic {:?}",
        args.start,
        goals.len(),
        section.mode,
        section.heuristic
    );

    let field = args
        .field
        .map(|n| sample_heuristic_field(&planner, &grid, goals.as_slice(), args.start.floor, n));
    if let Some(samples) = &field {
        match finite_range(samples) {
            Some((lo, hi)) => info!(
                "Heuristic field: {} samples, {:.2} .. {:.2}",
                samples.len(),
                lo,
                hi
            ),
            None => info!("Heuristic field: {} samples, none finite", samples.len()),
        }
    }

    let result = match args.progress_fps {
        Some(fps) => {
            let mut observer = |snapshot: &SearchSnapshot| -> ControlFlow<()> {
                info!(
                    "expanded {} nodes, frontier {}, at {}",
                    snapshot.expansions,
                    snapshot.frontier.len(),
                    snapshot.current
                );
                ControlFlow::Continue(())
            };
            planner.find_path_observed(
                args.start,
                &goals,
                ProgressCadence::per_second(fps),
                &mut observer,
            )
        }
        None => planner.find_path(args.start, &goals),
    };

    if !result.success {
        return Err(NavError::Planning(
            result.failure_reason.unwrap_or(PathFailure::NoPath),
        ));
    }

    let reached = result.reached_goal.unwrap_or(args.start);
    println!(
        "Path to {}: {} cells, length {:.2} m, {} floor change(s), {} nodes expanded",
        reached,
        result.length_cells(),
        result.length,
        result.floor_transitions(),
        result.nodes_expanded
    );

    if let Some(output) = &args.output {
        let report = PlanReport {
            start: args.start,
            goals: goals.as_slice(),
            reached_goal: result.reached_goal,
            length: result.length,
            cost: result.cost,
            nodes_expanded: result.nodes_expanded,
            floor_transitions: result.floor_transitions(),
            path: &result.path,
            heuristic_field: field.as_deref(),
        };
        write_json(output, &report)?;
    }

    if let Some(svg) = &args.svg {
        FloorPlanSvg::new(buffered.grid(), SvgConfig::default())
            .with_title(format!("Path length {:.2} m", result.length))
            .with_path(&result.path)
            .with_start(args.start)
            .with_goals(goals.as_slice())
            .save(svg)?;
    }
    Ok(())
}

pub fn exits(args: &ExitsArgs) -> Result<()> {
    let grid = load_grid(&args.grid)?;
    let exits = detect_exits(&grid);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&exits)?);
        return Ok(());
    }
    for ExitCandidate {
        position,
        group_size,
    } in &exits
    {
        let (wx, wy) = grid.grid_to_world(position.coord());
        println!(
            "floor {}: cell ({}, {}) at ({:.2}, {:.2}), {} door cell(s)",
            position.floor, position.x, position.y, wx, wy, group_size
        );
    }
    println!("{} exit(s)", exits.len());
    Ok(())
}

pub fn show(args: &ShowArgs) -> Result<()> {
    let grid = load_grid(&args.grid)?;
    if let Some(floor) = args.floor {
        if floor >= grid.floor_count() {
            return Err(NavError::InvalidArgument(format!(
                "floor {} out of range (grid has {})",
                floor,
                grid.floor_count()
            )));
        }
    }

    println!(
        "{} x {} cells at {} m, {} floor(s)",
        grid.width(),
        grid.height(),
        grid.grid_size(),
        grid.floor_count()
    );
    for (i, (band, floor)) in grid.bands().iter().zip(grid.floors()).enumerate() {
        if args.floor.is_some_and(|f| f != i) {
            continue;
        }
        let counts = floor.count_by_type();
        println!(
            "floor {}: elevation {:.2} m, height {:.2} m | wall {} door {} stair {} floor {} empty {}",
            i,
            band.elevation,
            band.height,
            counts.wall,
            counts.door,
            counts.stair,
            counts.floor,
            counts.empty
        );
        if args.ascii {
            print!("{}", floor.render_ascii());
        }
    }

    if let Some(svg) = &args.svg {
        FloorPlanSvg::new(&grid, SvgConfig::default())
            .with_title(args.grid.display().to_string())
            .save(svg)?;
    }
    Ok(())
}

fn log_summary(grid: &BuildingGrid) {
    let counts = grid.count_by_type();
    info!(
        "Grid {} x {} x {} floors: {} occupied cells ({} wall, {} door, {} stair, {} floor)",
        grid.width(),
        grid.height(),
        grid.floor_count(),
        counts.occupied(),
        counts.wall,
        counts.door,
        counts.stair,
        counts.floor
    );
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(file, value)?;
    info!("Wrote {}", path.display());
    Ok(())
}
