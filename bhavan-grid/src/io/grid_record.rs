//! Persisted grid record (JSON).
//!
//! The record is the hand-off between rasterization and planning:
//!
//! ```json
//! {
//!   "grids": [[["empty", "wall", ...], ...], ...],
//!   "bbox": {"min_x": 0.0, "min_y": 0.0, "min_z": 0.0, "max_x": 9.6, "max_y": 7.2, "max_z": 6.0},
//!   "floors": [{"elevation": 0.0, "height": 3.0}, ...],
//!   "grid_size": 0.2
//! }
//! ```
//!
//! `grids[floor][x][y]` holds category names, one fixed spelling each
//! (`empty`, `wall`, `door`, `stair`, `floor`, `wall_buffer`), so a loaded
//! record saves back with the same strings. Every field is required and any
//! other category name is rejected at load time.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{BoundingBox, CellType};
use crate::grid::{BuildingGrid, FloorBand, FloorGrid, GridError};

/// Errors reading or writing a grid record.
#[derive(Debug, thiserror::Error)]
pub enum GridRecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid grid record: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("floor {0} has rows of unequal length")]
    RaggedFloor(usize),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Serialized form of a [`BuildingGrid`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    pub grids: Vec<Vec<Vec<CellType>>>,
    pub bbox: BoundingBox,
    pub floors: Vec<FloorBand>,
    pub grid_size: f64,
}

impl GridRecord {
    pub fn from_grid(grid: &BuildingGrid) -> Self {
        Self {
            grids: grid.floors().iter().map(FloorGrid::to_columns).collect(),
            bbox: *grid.bbox(),
            floors: grid.bands().to_vec(),
            grid_size: grid.grid_size(),
        }
    }

    /// Validate and convert into a [`BuildingGrid`].
    pub fn into_grid(self) -> Result<BuildingGrid, GridRecordError> {
        let floors = self
            .grids
            .iter()
            .enumerate()
            .map(|(i, columns)| FloorGrid::from_columns(columns).ok_or(GridRecordError::RaggedFloor(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BuildingGrid::new(floors, self.floors, self.bbox, self.grid_size)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GridRecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GridRecordError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn read<R: Read>(reader: R) -> Result<Self, GridRecordError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), GridRecordError> {
        Ok(serde_json::to_writer(writer, self)?)
    }
}

/// Save a grid as a JSON record.
pub fn save_grid(grid: &BuildingGrid, path: &Path) -> Result<(), GridRecordError> {
    let mut writer = BufWriter::new(File::create(path)?);
    GridRecord::from_grid(grid).write(&mut writer)?;
    writer.flush()?;
    log::info!(
        "Saved {} floor(s) of {}x{} cells to {}",
        grid.floor_count(),
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}

/// Load and validate a JSON grid record.
pub fn load_grid(path: &Path) -> Result<BuildingGrid, GridRecordError> {
    let reader = BufReader::new(File::open(path)?);
    GridRecord::read(reader)?.into_grid()
}
