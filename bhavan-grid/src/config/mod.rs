//! Configuration loading.
//!
//! Loads all settings from a single YAML file; every field has a default.
//!
//! ```rust,ignore
//! use bhavan_grid::config::BhavanConfig;
//!
//! // configs/config.yaml if present, defaults otherwise
//! let config = BhavanConfig::load_default()?;
//!
//! let raster = config.to_rasterizer_config();
//! let planner = config.to_planner_config();
//! let buffer = config.wall_buffer_expander(grid.grid_size());
//! ```
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Cell size, floor segmentation, vertical tolerances, padding |
//! | [`PathfindingSection`] | Mode, diagonal moves, heuristic, wall buffer, costs |
//!
//! ```yaml
//! grid:
//!   grid_size: 0.3
//! pathfinding:
//!   mode: minimize_cost     # or minimize_distance
//!   heuristic: min          # or sum
//!   wall_buffer: 0.6        # meters
//!   costs:
//!     door: 5.0
//! ```

mod bhavan;
pub(crate) mod defaults;
mod error;
mod grid;
mod pathfinding;

pub use bhavan::BhavanConfig;
pub use error::ConfigLoadError;

pub use grid::GridSection;
pub use pathfinding::PathfindingSection;
