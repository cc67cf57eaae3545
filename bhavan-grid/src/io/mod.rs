//! Grid persistence, mesh input and export.
//!
//! - **Grid record**: JSON hand-off between rasterization and planning
//! - **Mesh record**: classified element geometry fed to the rasterizer
//! - **SVG export**: per-floor plans with a path overlay
//!
//! ## Saving and Loading Grids
//!
//! ```rust,ignore
//! use bhavan_grid::io::{load_grid, save_grid};
//! use std::path::Path;
//!
//! save_grid(&grid, Path::new("building.json"))?;
//! let grid = load_grid(Path::new("building.json"))?;
//! ```
//!
//! ## SVG Floor Plans
//!
//! ```rust,ignore
//! use bhavan_grid::io::{FloorPlanSvg, SvgConfig};
//!
//! FloorPlanSvg::new(&grid, SvgConfig::default())
//!     .with_path(&result.path)
//!     .with_start(start)
//!     .with_goals(goals.as_slice())
//!     .save(Path::new("path.svg"))?;
//! ```

mod grid_record;
mod mesh_record;
pub mod svg;

pub use grid_record::{GridRecord, GridRecordError, load_grid, save_grid};
pub use mesh_record::{ElementRecord, MeshRecord, MeshRecordError};
pub use svg::{FloorPlanSvg, SvgColorScheme, SvgConfig};
