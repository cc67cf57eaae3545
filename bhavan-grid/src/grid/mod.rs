//! Building occupancy grid.
//!
//! - [`segment_floors`]: storey elevations to [`FloorBand`]s
//! - [`FloorGrid`]: one floor's category array
//! - [`BuildingGrid`]: all floors plus their shared world frame
//! - [`GridRasterizer`] / [`build_navigation_grid`]: classified triangles to grids
//! - [`WallBufferExpander`]: hazard margin around walls

mod building;
mod floors;
mod rasterizer;
mod storage;
mod wall_buffer;

pub use building::{BuildingGrid, GridError};
pub use floors::{FloorBand, MIN_FLOOR_HEIGHT, segment_floors};
pub use rasterizer::{
    BuildError, GeometryError, GeometrySource, GridRasterizer, MeshElement, RasterStats,
    RasterizerConfig, build_navigation_grid,
};
pub use storage::{CellCounts, CellRect, FloorGrid};
pub use wall_buffer::{BufferedGrid, WallBufferExpander};
