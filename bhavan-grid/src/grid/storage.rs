//! Per-floor category storage.

use crate::core::{CellType, GridCoord};

/// One floor's category array.
///
/// Cell `(x, y)` lives at `y * width + x`. `width` counts cells along the
/// first index, `height` along the second. Cells are stored as `CellType`
/// discriminants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorGrid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

/// Inclusive rectangle of cell indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub min: GridCoord,
    pub max: GridCoord,
}

impl CellRect {
    /// Smallest rectangle covering both.
    pub fn union(self, other: CellRect) -> CellRect {
        CellRect {
            min: GridCoord::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: GridCoord::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl FloorGrid {
    /// Create an all-`Empty` floor.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![CellType::Empty as u8; width * height],
            width,
            height,
        }
    }

    /// Build from columns indexed `[x][y]`.
    ///
    /// Returns `None` if the columns are ragged.
    pub fn from_columns(columns: &[Vec<CellType>]) -> Option<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if columns.iter().any(|c| c.len() != height) {
            return None;
        }
        let mut grid = Self::new(width, height);
        for (x, column) in columns.iter().enumerate() {
            for (y, &cell) in column.iter().enumerate() {
                grid.cells[y * width + x] = cell as u8;
            }
        }
        Some(grid)
    }

    /// Columns indexed `[x][y]`, the inverse of [`FloorGrid::from_columns`].
    pub fn to_columns(&self) -> Vec<Vec<CellType>> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| CellType::from_u8(self.cells[y * self.width + x]))
                    .collect()
            })
            .collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if grid coordinates are within bounds
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// Is the cell on the outermost ring of the grid?
    #[inline]
    pub fn is_edge(&self, coord: GridCoord) -> bool {
        self.is_valid_coord(coord)
            && (coord.x == 0
                || coord.y == 0
                || coord.x as usize == self.width - 1
                || coord.y as usize == self.height - 1)
    }

    /// Convert grid coordinates to flat array index
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert flat array index to grid coordinates
    #[inline]
    pub fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Cell category, `None` outside the grid.
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<CellType> {
        self.coord_to_index(coord).map(|i| CellType::from_u8(self.cells[i]))
    }

    /// Cell category (returns Empty if out of bounds)
    #[inline]
    pub fn get_type(&self, coord: GridCoord) -> CellType {
        self.get(coord).unwrap_or(CellType::Empty)
    }

    /// Overwrite a cell unconditionally.
    /// Returns true if the cell changed
    #[inline]
    pub fn set_type(&mut self, coord: GridCoord, cell_type: CellType) -> bool {
        match self.coord_to_index(coord) {
            Some(i) => {
                let changed = self.cells[i] != cell_type as u8;
                self.cells[i] = cell_type as u8;
                changed
            }
            None => false,
        }
    }

    /// Write a cell under the category precedence rules.
    /// Returns true if the cell changed
    #[inline]
    pub fn set_type_with_priority(&mut self, coord: GridCoord, cell_type: CellType) -> bool {
        match self.coord_to_index(coord) {
            Some(i) => {
                let current = CellType::from_u8(self.cells[i]);
                if current != cell_type && current.accepts(cell_type) {
                    self.cells[i] = cell_type as u8;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Iterate over all cells in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellType)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (self.index_to_coord(i), CellType::from_u8(c)))
    }

    /// Count cells by type
    pub fn count_by_type(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &c in &self.cells {
            match CellType::from_u8(c) {
                CellType::Empty => counts.empty += 1,
                CellType::Wall => counts.wall += 1,
                CellType::Door => counts.door += 1,
                CellType::Stair => counts.stair += 1,
                CellType::Floor => counts.floor += 1,
                CellType::WallBuffer => counts.wall_buffer += 1,
            }
        }
        counts
    }

    /// Smallest rectangle containing every non-Empty cell.
    pub fn occupied_bounds(&self) -> Option<CellRect> {
        self.iter()
            .filter(|(_, c)| c.is_occupied())
            .map(|(coord, _)| CellRect {
                min: coord,
                max: coord,
            })
            .reduce(CellRect::union)
    }

    /// Copy `rect` (clamped to the grid) into a new grid with `padding`
    /// Empty cells on each side.
    pub fn cropped(&self, rect: CellRect, padding: usize) -> FloorGrid {
        let x0 = rect.min.x.max(0);
        let y0 = rect.min.y.max(0);
        let x1 = rect.max.x.min(self.width as i32 - 1);
        let y1 = rect.max.y.min(self.height as i32 - 1);
        let inner_w = (x1 - x0 + 1).max(0) as usize;
        let inner_h = (y1 - y0 + 1).max(0) as usize;

        let mut out = FloorGrid::new(inner_w + 2 * padding, inner_h + 2 * padding);
        for y in 0..inner_h {
            for x in 0..inner_w {
                let src = GridCoord::new(x0 + x as i32, y0 + y as i32);
                let dst = GridCoord::new((x + padding) as i32, (y + padding) as i32);
                out.set_type(dst, self.get_type(src));
            }
        }
        out
    }

    /// Raw category bytes in storage order.
    pub fn cell_types_raw(&self) -> &[u8] {
        &self.cells
    }

    /// ASCII rendering, one line per `y` from the top, for debugging.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(CellType::from_u8(self.cells[y * self.width + x]).as_char());
            }
            out.push('\n');
        }
        out
    }
}

/// Cell counts by type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    pub empty: usize,
    pub wall: usize,
    pub door: usize,
    pub stair: usize,
    pub floor: usize,
    pub wall_buffer: usize,
}

impl CellCounts {
    /// Total non-Empty cells
    pub fn occupied(&self) -> usize {
        self.wall + self.door + self.stair + self.floor + self.wall_buffer
    }

    /// Total cells
    pub fn total(&self) -> usize {
        self.empty + self.occupied()
    }

    /// Cells a walker can never enter
    pub fn obstacles(&self) -> usize {
        self.wall + self.wall_buffer
    }
}

impl std::ops::AddAssign for CellCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.empty += rhs.empty;
        self.wall += rhs.wall;
        self.door += rhs.door;
        self.stair += rhs.stair;
        self.floor += rhs.floor;
        self.wall_buffer += rhs.wall_buffer;
    }
}
