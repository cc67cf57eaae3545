//! # Bhavan Grid
//!
//! Multi-floor navigation grids from classified building meshes, with
//! stair-aware A* path planning.
//!
//! ## Overview
//!
//! Every floor of a building is a 2D grid of semantic cells:
//!
//! - **Empty** - Open space
//! - **Wall** - Impassable (walls, columns, curtain walls, windows)
//! - **Door** - Passable at a surcharge
//! - **Stair** - Passable; links to the same cell on other floors
//! - **Floor** - Walkable slab surface
//! - **WallBuffer** - Hazard margin around walls (derived grids only)
//!
//! ## Data Flow
//!
//! ```text
//! MeshRecord (GeometrySource)
//!     │ build_navigation_grid
//!     ▼
//! BuildingGrid ──save_grid/load_grid──► grid record (JSON)
//!     │ WallBufferExpander::apply
//!     ▼
//! BufferedGrid ──► MultiFloorPlanner::find_path ──► PathResult
//!     │                    ▲
//!     └── ExitDetector ────┘ (extra goals)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bhavan_grid::{BhavanConfig, CellPos, GoalSet, MultiFloorPlanner, load_grid};
//!
//! let config = BhavanConfig::load_default()?;
//! let grid = load_grid(Path::new("building.json"))?;
//! let buffered = config.wall_buffer_expander(grid.grid_size()).apply(&grid);
//!
//! let planner = MultiFloorPlanner::new(buffered.grid(), config.to_planner_config());
//! let result = planner.find_path(CellPos::new(4, 7, 0), &GoalSet::single(CellPos::new(30, 12, 2)));
//! println!("length {:.2} m over {} cells", result.length, result.path.len());
//! ```
//!
//! ## Coordinate System
//!
//! Cell `(x, y)` on floor `f` covers the world square starting at
//! `(bbox.min_x + x·g, bbox.min_y + y·g)` with edge `g = grid_size`.
//! Floors are numbered bottom up from 0.

// Core types
pub mod core;

// Floors, rasterization, wall buffer
pub mod grid;

// Exits, stair links, heuristic sampling
pub mod query;

// A* planning
pub mod pathfinding;

// Grid records, mesh input, SVG export
pub mod io;

// YAML configuration
pub mod config;

pub use core::{BoundingBox, CellPos, CellType, ElementKind, GridCoord, Point3, Triangle};

pub use grid::{
    BufferedGrid, BuildError, BuildingGrid, FloorBand, FloorGrid, GeometrySource, GridError,
    RasterStats, RasterizerConfig, WallBufferExpander, build_navigation_grid,
};

pub use query::{ExitCandidate, ExitDetector, StairIndex, detect_exits};

pub use pathfinding::{
    CostMode, CostTable, GoalSet, HeuristicCombine, MultiFloorPlanner, PathFailure, PathResult,
    PlannerConfig, find_path,
};

pub use io::{GridRecord, GridRecordError, MeshRecord, MeshRecordError, load_grid, save_grid};

pub use config::{BhavanConfig, ConfigLoadError};
