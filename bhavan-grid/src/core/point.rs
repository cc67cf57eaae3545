//! Point and coordinate types for the building grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices within one floor)
///
/// `x` is the first array index of a floor grid, `y` the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (first index)
    pub x: i32,
    /// Y coordinate (second index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (max of x and y distance) - used for 8-connected grids
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Planar Euclidean distance in cells
    #[inline]
    pub fn euclidean_distance(&self, other: &GridCoord) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Get the 4 cardinal neighbors (+x, -x, +y, -y)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x - 1, self.y),
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x, self.y - 1),
        ]
    }

    /// Get the 8 neighbors; the 4 cardinals come first, then the diagonals.
    #[inline]
    pub fn neighbors_8(&self) -> [GridCoord; 8] {
        [
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x - 1, self.y),
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x, self.y - 1),
            GridCoord::new(self.x + 1, self.y + 1),
            GridCoord::new(self.x + 1, self.y - 1),
            GridCoord::new(self.x - 1, self.y + 1),
            GridCoord::new(self.x - 1, self.y - 1),
        ]
    }

    /// Lift onto a floor
    #[inline]
    pub fn on_floor(self, floor: usize) -> CellPos {
        CellPos::new(self.x, self.y, floor)
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// A cell of the building: planar grid coordinate plus floor index.
///
/// This is the search state of the planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub floor: usize,
}

impl CellPos {
    #[inline]
    pub fn new(x: i32, y: i32, floor: usize) -> Self {
        Self { x, y, floor }
    }

    /// Planar part of the position
    #[inline]
    pub fn coord(&self) -> GridCoord {
        GridCoord::new(self.x, self.y)
    }

    /// Number of floors between `self` and `other`
    #[inline]
    pub fn floor_delta(&self, other: &CellPos) -> usize {
        self.floor.abs_diff(other.floor)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.floor)
    }
}

/// World-space point (building model units)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_neighbors_cardinals_first() {
        let c = GridCoord::new(3, 3);
        let n8 = c.neighbors_8();
        assert_eq!(&n8[..4], &c.neighbors_4()[..]);
        for d in &n8[4..] {
            assert_eq!((d.x - c.x).abs() + (d.y - c.y).abs(), 2);
        }
    }

    #[test]
    fn test_distances() {
        let a = GridCoord::new(0, 0);
        let b = GridCoord::new(3, 4);
        assert_eq!(a.chebyshev_distance(&b), 4);
        assert_relative_eq!(a.euclidean_distance(&b), 5.0);
    }

    #[test]
    fn test_cell_pos() {
        let p = GridCoord::new(2, 7).on_floor(3);
        assert_eq!(p, CellPos::new(2, 7, 3));
        assert_eq!(p.coord(), GridCoord::new(2, 7));
        assert_eq!(p.floor_delta(&CellPos::new(0, 0, 1)), 2);
        assert_eq!(p.to_string(), "(2, 7, 3)");
    }
}
