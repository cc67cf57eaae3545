//! Wall hazard buffer.
//!
//! Marks every cell within Chebyshev distance `d` of a Wall as `WallBuffer`,
//! leaving Wall, Door and Stair cells untouched. The distance field is
//! computed with an 8-connected brushfire seeded from all Wall cells and cut
//! off at `d`, which is the same set `d` rounds of 8-neighbor dilation reach.

use std::collections::VecDeque;

use crate::core::{CellType, GridCoord};

use super::building::BuildingGrid;
use super::storage::FloorGrid;

/// Produces wall-buffered copies of a building grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallBufferExpander {
    distance: usize,
}

impl WallBufferExpander {
    /// Buffer `distance` cells deep.
    pub fn new(distance: usize) -> Self {
        Self { distance }
    }

    /// Buffer for a radius in world units.
    ///
    /// Partial cells are dropped; the small epsilon keeps radii such as
    /// `0.6 / 0.2` from landing just under an integer.
    pub fn from_world_radius(radius: f64, grid_size: f64) -> Self {
        if !(radius.is_finite() && radius > 0.0 && grid_size > 0.0) {
            return Self::new(0);
        }
        Self::new((radius / grid_size + 1e-9).floor() as usize)
    }

    /// Buffer depth in cells.
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Buffer every floor of `grid`.
    pub fn apply(&self, grid: &BuildingGrid) -> BufferedGrid {
        let floors: Vec<FloorGrid> = grid.floors().iter().map(|f| self.apply_floor(f)).collect();
        let buffered = grid.with_floors(floors);
        log::debug!(
            "[WallBuffer] {} cells buffered at depth {}",
            buffered.count_by_type().wall_buffer,
            self.distance
        );
        BufferedGrid {
            grid: buffered,
            distance: self.distance,
        }
    }

    /// Buffer a single floor.
    pub fn apply_floor(&self, floor: &FloorGrid) -> FloorGrid {
        let mut out = floor.clone();
        if self.distance == 0 {
            return out;
        }

        let (width, height) = (floor.width(), floor.height());
        let mut dist = vec![usize::MAX; floor.cell_count()];
        let mut queue = VecDeque::new();

        for (coord, cell) in floor.iter() {
            if cell == CellType::Wall {
                if let Some(i) = floor.coord_to_index(coord) {
                    dist[i] = 0;
                    queue.push_back(coord);
                }
            }
        }

        while let Some(coord) = queue.pop_front() {
            let Some(current) = floor.coord_to_index(coord).map(|i| dist[i]) else {
                continue;
            };
            if current >= self.distance {
                continue;
            }
            for n in coord.neighbors_8() {
                if n.x < 0 || n.y < 0 || n.x as usize >= width || n.y as usize >= height {
                    continue;
                }
                let ni = n.y as usize * width + n.x as usize;
                if current + 1 < dist[ni] {
                    dist[ni] = current + 1;
                    queue.push_back(n);
                }
            }
        }

        for (i, &d) in dist.iter().enumerate() {
            if d > 0 && d <= self.distance {
                let coord: GridCoord = floor.index_to_coord(i);
                out.set_type_with_priority(coord, CellType::WallBuffer);
            }
        }
        out
    }
}

/// A building grid with its wall buffer applied. Read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferedGrid {
    grid: BuildingGrid,
    distance: usize,
}

impl BufferedGrid {
    /// Buffer depth in cells this grid was produced with.
    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn grid(&self) -> &BuildingGrid {
        &self.grid
    }

    pub fn into_inner(self) -> BuildingGrid {
        self.grid
    }
}

impl AsRef<BuildingGrid> for BufferedGrid {
    fn as_ref(&self) -> &BuildingGrid {
        &self.grid
    }
}
