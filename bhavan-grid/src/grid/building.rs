//! Multi-floor building grid.

use crate::core::{BoundingBox, CellPos, CellType, GridCoord, Point3};

use super::floors::FloorBand;
use super::storage::{CellCounts, CellRect, FloorGrid};

/// Structural problems with a set of floor grids.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("building grid needs at least one floor")]
    NoFloors,

    #[error("floor {floor} is {got_w}x{got_h}, expected {want_w}x{want_h}")]
    DimensionMismatch {
        floor: usize,
        got_w: usize,
        got_h: usize,
        want_w: usize,
        want_h: usize,
    },

    #[error("{grids} floor grids but {bands} floor bands")]
    FloorCountMismatch { grids: usize, bands: usize },

    #[error("grid size must be positive and finite, got {0}")]
    InvalidGridSize(f64),
}

/// Occupancy grids for every floor plus the world frame they live in.
///
/// All floors share one set of dimensions. The bounding box min corner is the
/// lower corner of cell `(0, 0)` and cell `(i, j)` covers the half-open world
/// square `[min + i·g, min + (i+1)·g) × [min + j·g, min + (j+1)·g)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingGrid {
    floors: Vec<FloorGrid>,
    bands: Vec<FloorBand>,
    bbox: BoundingBox,
    grid_size: f64,
}

impl BuildingGrid {
    /// Assemble a building grid, validating dimensions and floor count.
    pub fn new(
        floors: Vec<FloorGrid>,
        bands: Vec<FloorBand>,
        bbox: BoundingBox,
        grid_size: f64,
    ) -> Result<Self, GridError> {
        if !(grid_size.is_finite() && grid_size > 0.0) {
            return Err(GridError::InvalidGridSize(grid_size));
        }
        let first = floors.first().ok_or(GridError::NoFloors)?;
        let (want_w, want_h) = (first.width(), first.height());
        for (floor, grid) in floors.iter().enumerate() {
            if grid.width() != want_w || grid.height() != want_h {
                return Err(GridError::DimensionMismatch {
                    floor,
                    got_w: grid.width(),
                    got_h: grid.height(),
                    want_w,
                    want_h,
                });
            }
        }
        if floors.len() != bands.len() {
            return Err(GridError::FloorCountMismatch {
                grids: floors.len(),
                bands: bands.len(),
            });
        }
        Ok(Self {
            floors,
            bands,
            bbox,
            grid_size,
        })
    }

    #[inline]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Cells along the first index (shared by all floors)
    #[inline]
    pub fn width(&self) -> usize {
        self.floors[0].width()
    }

    /// Cells along the second index (shared by all floors)
    #[inline]
    pub fn height(&self) -> usize {
        self.floors[0].height()
    }

    #[inline]
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    #[inline]
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    #[inline]
    pub fn bands(&self) -> &[FloorBand] {
        &self.bands
    }

    pub fn floor(&self, index: usize) -> Option<&FloorGrid> {
        self.floors.get(index)
    }

    pub fn floors(&self) -> &[FloorGrid] {
        &self.floors
    }

    /// Is the position inside the grid on an existing floor?
    #[inline]
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.floor < self.floors.len() && self.floors[pos.floor].is_valid_coord(pos.coord())
    }

    /// Cell category, `None` outside the grid.
    #[inline]
    pub fn get(&self, pos: CellPos) -> Option<CellType> {
        self.floors.get(pos.floor)?.get(pos.coord())
    }

    /// Flat index over every floor, `None` outside the grid.
    #[inline]
    pub fn flat_index(&self, pos: CellPos) -> Option<usize> {
        let floor = self.floors.get(pos.floor)?;
        floor
            .coord_to_index(pos.coord())
            .map(|i| pos.floor * floor.cell_count() + i)
    }

    /// Total cells over all floors.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.floors.len() * self.width() * self.height()
    }

    /// Convert world coordinates to grid coordinates (floor rule, half-open cells)
    #[inline]
    pub fn world_to_grid(&self, x: f64, y: f64) -> GridCoord {
        world_to_cell(self.bbox.min_x, self.bbox.min_y, self.grid_size, x, y)
    }

    /// Convert grid coordinates to world coordinates (cell center)
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> (f64, f64) {
        (
            self.bbox.min_x + (f64::from(coord.x) + 0.5) * self.grid_size,
            self.bbox.min_y + (f64::from(coord.y) + 0.5) * self.grid_size,
        )
    }

    /// Index of the floor band containing `z`.
    pub fn floor_at_elevation(&self, z: f64) -> Option<usize> {
        self.bands
            .iter()
            .position(|b| z >= b.elevation && z < b.ceiling())
    }

    /// World point to cell, `None` if outside the grid or every band.
    pub fn locate(&self, point: Point3) -> Option<CellPos> {
        let floor = self.floor_at_elevation(point.z)?;
        let pos = self.world_to_grid(point.x, point.y).on_floor(floor);
        self.contains(pos).then_some(pos)
    }

    /// Counts summed over every floor.
    pub fn count_by_type(&self) -> CellCounts {
        let mut total = CellCounts::default();
        for floor in &self.floors {
            total += floor.count_by_type();
        }
        total
    }

    /// Crop every floor to the union rectangle of non-Empty cells, then pad.
    ///
    /// One rectangle for all floors keeps the dimensions identical, and the
    /// bounding box moves with the new cell `(0, 0)`. If every floor is
    /// empty the grid is left as is.
    pub fn trimmed(&self, padding: usize) -> BuildingGrid {
        let Some(rect) = self
            .floors
            .iter()
            .filter_map(FloorGrid::occupied_bounds)
            .reduce(CellRect::union)
        else {
            return self.clone();
        };

        let floors: Vec<FloorGrid> = self.floors.iter().map(|f| f.cropped(rect, padding)).collect();
        let g = self.grid_size;
        let mut bbox = self.bbox;
        bbox.min_x += f64::from(rect.min.x - padding as i32) * g;
        bbox.min_y += f64::from(rect.min.y - padding as i32) * g;
        bbox.max_x = bbox.min_x + floors[0].width() as f64 * g;
        bbox.max_y = bbox.min_y + floors[0].height() as f64 * g;

        BuildingGrid {
            floors,
            bands: self.bands.clone(),
            bbox,
            grid_size: g,
        }
    }

    /// Replace the floor grids keeping the frame; used by derived grids.
    pub(crate) fn with_floors(&self, floors: Vec<FloorGrid>) -> BuildingGrid {
        BuildingGrid {
            floors,
            bands: self.bands.clone(),
            bbox: self.bbox,
            grid_size: self.grid_size,
        }
    }

    pub(crate) fn floor_mut(&mut self, index: usize) -> Option<&mut FloorGrid> {
        self.floors.get_mut(index)
    }
}

/// The single world-to-cell rule shared by rasterization and lookup.
#[inline]
pub(crate) fn world_to_cell(origin_x: f64, origin_y: f64, grid_size: f64, x: f64, y: f64) -> GridCoord {
    GridCoord::new(
        ((x - origin_x) / grid_size).floor() as i32,
        ((y - origin_y) / grid_size).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(width: usize, height: usize, floors: usize) -> BuildingGrid {
        let bbox = BoundingBox {
            min_x: -1.0,
            min_y: 2.0,
            min_z: 0.0,
            max_x: -1.0 + width as f64 * 0.5,
            max_y: 2.0 + height as f64 * 0.5,
            max_z: 3.0 * floors as f64,
        };
        let bands = (0..floors).map(|i| FloorBand::new(3.0 * i as f64, 3.0)).collect();
        let grids = (0..floors).map(|_| FloorGrid::new(width, height)).collect();
        BuildingGrid::new(grids, bands, bbox, 0.5).unwrap()
    }

    #[test]
    fn test_validation() {
        let bbox = BoundingBox::empty();
        assert_eq!(
            BuildingGrid::new(vec![], vec![], bbox, 0.5).unwrap_err(),
            GridError::NoFloors
        );
        let err = BuildingGrid::new(
            vec![FloorGrid::new(3, 3), FloorGrid::new(3, 4)],
            vec![FloorBand::new(0.0, 3.0), FloorBand::new(3.0, 3.0)],
            bbox,
            0.5,
        )
        .unwrap_err();
        assert!(matches!(err, GridError::DimensionMismatch { floor: 1, .. }));
        let err = BuildingGrid::new(vec![FloorGrid::new(3, 3)], vec![], bbox, 0.5).unwrap_err();
        assert_eq!(err, GridError::FloorCountMismatch { grids: 1, bands: 0 });
        let err = BuildingGrid::new(
            vec![FloorGrid::new(3, 3)],
            vec![FloorBand::new(0.0, 3.0)],
            bbox,
            0.0,
        )
        .unwrap_err();
        assert_eq!(err, GridError::InvalidGridSize(0.0));
    }

    #[test]
    fn test_world_grid_conversion() {
        let grid = frame(10, 10, 1);
        assert_eq!(grid.world_to_grid(-1.0, 2.0), GridCoord::new(0, 0));
        // Half-open: the upper edge of a cell belongs to the next one
        assert_eq!(grid.world_to_grid(-0.5, 2.49), GridCoord::new(1, 0));
        assert_eq!(grid.world_to_grid(-1.01, 2.0), GridCoord::new(-1, 0));

        let (wx, wy) = grid.grid_to_world(GridCoord::new(2, 3));
        assert_relative_eq!(wx, 0.25);
        assert_relative_eq!(wy, 3.75);
        assert_eq!(grid.world_to_grid(wx, wy), GridCoord::new(2, 3));
    }

    #[test]
    fn test_locate_and_flat_index() {
        let grid = frame(4, 5, 2);
        let pos = grid.locate(Point3::new(0.1, 3.1, 4.0)).unwrap();
        assert_eq!(pos, CellPos::new(2, 2, 1));
        assert!(grid.locate(Point3::new(0.1, 3.1, 7.0)).is_none());
        assert!(grid.locate(Point3::new(10.0, 3.1, 1.0)).is_none());

        assert_eq!(grid.flat_index(CellPos::new(0, 0, 0)), Some(0));
        assert_eq!(grid.flat_index(CellPos::new(1, 2, 1)), Some(20 + 2 * 4 + 1));
        assert_eq!(grid.flat_index(CellPos::new(0, 0, 2)), None);
        assert_eq!(grid.total_cells(), 40);
    }

    #[test]
    fn test_trim_uses_union_rectangle() {
        let mut grid = frame(12, 12, 2);
        grid.floor_mut(0).unwrap().set_type(GridCoord::new(3, 4), CellType::Wall);
        grid.floor_mut(1).unwrap().set_type(GridCoord::new(7, 5), CellType::Stair);

        let trimmed = grid.trimmed(1);
        assert_eq!((trimmed.width(), trimmed.height()), (7, 4));
        assert_eq!(trimmed.floor(0).unwrap().width(), trimmed.floor(1).unwrap().width());
        assert_eq!(
            trimmed.get(CellPos::new(1, 1, 0)),
            Some(CellType::Wall)
        );
        assert_eq!(
            trimmed.get(CellPos::new(5, 2, 1)),
            Some(CellType::Stair)
        );

        // Same world point maps to the same cell before and after trimming
        let (wx, wy) = grid.grid_to_world(GridCoord::new(7, 5));
        assert_eq!(trimmed.world_to_grid(wx, wy), GridCoord::new(5, 2));
        assert_relative_eq!(trimmed.bbox().max_x - trimmed.bbox().min_x, 7.0 * 0.5);
    }

    #[test]
    fn test_trim_empty_is_noop() {
        let grid = frame(6, 6, 2);
        assert_eq!(grid.trimmed(1), grid);
    }
}
