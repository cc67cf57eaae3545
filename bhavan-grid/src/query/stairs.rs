//! Stair portal lookup.
//!
//! A stair portal links the same `(x, y)` on two floors when both cells are
//! `Stair`. The index lists, for every ordered floor pair, the coordinates
//! shared by both floors, so cross-floor heuristics do not rescan the grid.

use crate::core::{CellPos, CellType, GridCoord};
use crate::grid::BuildingGrid;

/// Shared stair coordinates per floor pair.
#[derive(Clone, Debug, Default)]
pub struct StairIndex {
    floor_count: usize,
    /// `shared[a * floor_count + b]`: coords that are Stair on floors a and b
    shared: Vec<Vec<GridCoord>>,
}

impl StairIndex {
    pub fn build(grid: &BuildingGrid) -> Self {
        let n = grid.floor_count();
        let per_floor: Vec<Vec<GridCoord>> = grid
            .floors()
            .iter()
            .map(|f| {
                f.iter()
                    .filter(|(_, c)| *c == CellType::Stair)
                    .map(|(coord, _)| coord)
                    .collect()
            })
            .collect();

        let mut shared = vec![Vec::new(); n * n];
        for a in 0..n {
            for b in 0..n {
                if a == b {
                    continue;
                }
                let other = &grid.floors()[b];
                shared[a * n + b] = per_floor[a]
                    .iter()
                    .copied()
                    .filter(|c| other.get_type(*c) == CellType::Stair)
                    .collect();
            }
        }

        let links: usize = shared.iter().map(Vec::len).sum::<usize>() / 2;
        log::debug!("[Stairs] {} portal links over {} floors", links, n);
        Self {
            floor_count: n,
            shared,
        }
    }

    /// Coordinates that are Stair on both floors (empty for `a == b`).
    pub fn shared(&self, a: usize, b: usize) -> &[GridCoord] {
        if a >= self.floor_count || b >= self.floor_count {
            return &[];
        }
        &self.shared[a * self.floor_count + b]
    }

    /// Shared stair minimizing `|from - s| + |s - to|` (planar, in cells).
    pub fn best_transfer(&self, from: CellPos, to: CellPos) -> Option<(GridCoord, f64)> {
        let (a, b) = (from.coord(), to.coord());
        self.shared(from.floor, to.floor)
            .iter()
            .map(|s| (*s, a.euclidean_distance(s) + s.euclidean_distance(&b)))
            .min_by(|x, y| x.1.total_cmp(&y.1))
    }

    /// Portal destinations from `pos`: same coordinate on every other floor
    /// where both cells are Stair.
    pub fn portals<'g>(&self, grid: &'g BuildingGrid, pos: CellPos) -> impl Iterator<Item = CellPos> + 'g {
        let here_is_stair = grid.get(pos) == Some(CellType::Stair);
        let coord = pos.coord();
        (0..grid.floor_count())
            .filter(move |&f| here_is_stair && f != pos.floor)
            .filter(move |&f| grid.floors()[f].get_type(coord) == CellType::Stair)
            .map(move |f| coord.on_floor(f))
    }

    /// Number of distinct stair coordinates linking any two floors.
    pub fn link_count(&self) -> usize {
        self.shared.iter().map(Vec::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BoundingBox;
    use crate::grid::{FloorBand, FloorGrid};

    fn three_floors() -> BuildingGrid {
        let mut floors = vec![FloorGrid::new(6, 6), FloorGrid::new(6, 6), FloorGrid::new(6, 6)];
        for f in &mut floors {
            f.set_type(GridCoord::new(1, 1), CellType::Stair);
        }
        floors[0].set_type(GridCoord::new(4, 4), CellType::Stair);
        floors[2].set_type(GridCoord::new(4, 4), CellType::Stair);
        floors[1].set_type(GridCoord::new(4, 0), CellType::Stair);
        let bands = (0..3).map(|i| FloorBand::new(i as f64 * 3.0, 3.0)).collect();
        BuildingGrid::new(floors, bands, BoundingBox::empty(), 1.0).unwrap()
    }

    #[test]
    fn test_shared_coordinates() {
        let index = StairIndex::build(&three_floors());
        assert_eq!(index.shared(0, 1), &[GridCoord::new(1, 1)]);
        assert_eq!(index.shared(0, 2).len(), 2);
        assert!(index.shared(1, 1).is_empty());
        assert!(index.shared(0, 7).is_empty());
        assert_eq!(index.link_count(), 4);
    }

    #[test]
    fn test_best_transfer() {
        let index = StairIndex::build(&three_floors());
        let (s, d) = index
            .best_transfer(CellPos::new(5, 4, 0), CellPos::new(5, 5, 2))
            .unwrap();
        assert_eq!(s, GridCoord::new(4, 4));
        assert!((d - (1.0 + 2f64.sqrt())).abs() < 1e-12);
        assert!(index
            .best_transfer(CellPos::new(4, 0, 1), CellPos::new(0, 0, 0))
            .is_some());
    }

    #[test]
    fn test_portals() {
        let grid = three_floors();
        let index = StairIndex::build(&grid);
        let from_shared: Vec<_> = index.portals(&grid, CellPos::new(4, 4, 0)).collect();
        assert_eq!(from_shared, vec![CellPos::new(4, 4, 2)]);
        assert_eq!(index.portals(&grid, CellPos::new(1, 1, 1)).count(), 2);
        assert_eq!(index.portals(&grid, CellPos::new(4, 0, 1)).count(), 0);
        assert_eq!(index.portals(&grid, CellPos::new(2, 2, 0)).count(), 0);
    }
}
