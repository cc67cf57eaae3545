//! Triangle rasterization into per-floor category grids.
//!
//! Each classified triangle is projected onto its 2D bounding rectangle of
//! cells and written onto every floor band its (adjusted) vertical interval
//! overlaps. Writes follow the category precedence of [`crate::core::CellType::accepts`].
//!
//! ```text
//! GeometrySource ──► bbox + storeys ──► segment_floors ──► GridRasterizer
//!                                                              │
//!                             BuildingGrid ◄── trim + pad ◄────┘
//! ```

use crate::core::{BoundingBox, ElementKind, GridCoord, Triangle};

use super::building::{BuildingGrid, GridError, world_to_cell};
use super::floors::{FloorBand, MIN_FLOOR_HEIGHT, segment_floors};
use super::storage::FloorGrid;

/// Rasterizer settings.
///
/// The vertical adjustments compensate for slab thickness: a slab lying at a
/// storey elevation registers in the band below that elevation, not above.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterizerConfig {
    /// Cell edge length in world units
    pub grid_size: f64,
    /// Bands lower than this are dropped
    pub min_floor_height: f64,
    /// Lower bound shift: down for Stair/Floor, up for the rest
    pub slab_tolerance: f64,
    /// Upper bound shift down for everything except Stair
    pub ceiling_clearance: f64,
    /// Upper bound shift up for Stair
    pub stair_headroom: f64,
    /// Empty margin kept around the occupied region after trimming
    pub padding: usize,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            grid_size: 0.2,
            min_floor_height: MIN_FLOOR_HEIGHT,
            slab_tolerance: 0.3,
            ceiling_clearance: 0.5,
            stair_headroom: 0.3,
            padding: 1,
        }
    }
}

impl RasterizerConfig {
    /// Set the cell size
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the padding kept after trimming
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Vertical interval a triangle of `kind` occupies for band overlap tests.
    pub fn vertical_interval(&self, kind: ElementKind, min_z: f64, max_z: f64) -> (f64, f64) {
        let lower = match kind {
            ElementKind::Stair | ElementKind::Floor => min_z - self.slab_tolerance,
            ElementKind::Wall | ElementKind::Door => min_z + self.slab_tolerance,
        };
        let upper = match kind {
            ElementKind::Stair => max_z + self.stair_headroom,
            _ => max_z - self.ceiling_clearance,
        };
        (lower, upper)
    }
}

/// A building element as delivered by the geometry extraction collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshElement {
    pub id: String,
    pub kind: ElementKind,
    pub triangles: Vec<Triangle>,
}

/// Geometry extraction failed for one element; the element is skipped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("geometry extraction failed for element {id}: {reason}")]
pub struct GeometryError {
    pub id: String,
    pub reason: String,
}

/// Provider of classified building geometry.
pub trait GeometrySource {
    /// Storey elevations in any order; duplicates are fine.
    fn storey_elevations(&self) -> Vec<f64>;

    /// Every element the source knows about. Failed extractions are reported
    /// per element and do not stop the build.
    fn elements(&self) -> Vec<Result<MeshElement, GeometryError>>;
}

/// Counters collected while building a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Elements rasterized
    pub elements: usize,
    /// Elements skipped because extraction failed
    pub elements_failed: usize,
    /// Triangles processed
    pub triangles: usize,
    /// Triangles whose vertical interval missed every band
    pub triangles_outside_bands: usize,
    /// Cell writes that changed a category
    pub cells_written: usize,
}

/// Errors that stop a grid build.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("no element produced usable geometry")]
    NoGeometry,

    #[error("extent {size_x} x {size_y} does not fit a grid at {grid_size} units/cell")]
    GridTooLarge {
        size_x: f64,
        size_y: f64,
        grid_size: f64,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Cells along one axis including the two margin cells, if the count fits
/// the `i32` cell coordinates.
fn axis_cells(extent: f64, grid_size: f64) -> Option<usize> {
    let cells = (extent / grid_size).ceil();
    if !cells.is_finite() || cells < 0.0 || cells > (i32::MAX - 2) as f64 {
        return None;
    }
    (cells as usize).checked_add(2)
}

/// Writes classified triangles into untrimmed floor grids.
///
/// The working frame has a one-cell Empty margin on every side: the origin
/// sits one cell below the geometry minimum and triangles are clamped to
/// `[1, dim - 2]`.
pub struct GridRasterizer {
    config: RasterizerConfig,
    bbox: BoundingBox,
    bands: Vec<FloorBand>,
    floors: Vec<FloorGrid>,
    origin_x: f64,
    origin_y: f64,
    stats: RasterStats,
}

impl GridRasterizer {
    /// Allocate Empty grids covering `bbox` for every band.
    pub fn new(bbox: BoundingBox, bands: Vec<FloorBand>, config: RasterizerConfig) -> Result<Self, BuildError> {
        let g = config.grid_size;
        if !(g.is_finite() && g > 0.0) {
            return Err(GridError::InvalidGridSize(g).into());
        }
        if bbox.is_empty() {
            return Err(BuildError::NoGeometry);
        }
        let too_large = || BuildError::GridTooLarge {
            size_x: bbox.size_x(),
            size_y: bbox.size_y(),
            grid_size: g,
        };
        let width = axis_cells(bbox.size_x(), g).ok_or_else(too_large)?;
        let height = axis_cells(bbox.size_y(), g).ok_or_else(too_large)?;
        let total = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(bands.len()));
        if total.is_none_or(|cells| cells > isize::MAX as usize) {
            return Err(too_large());
        }
        log::debug!(
            "[Rasterizer] {}x{} cells x {} floors at {:.3} units/cell",
            width,
            height,
            bands.len(),
            g
        );

        let floors = bands.iter().map(|_| FloorGrid::new(width, height)).collect();
        Ok(Self {
            origin_x: bbox.min_x - g,
            origin_y: bbox.min_y - g,
            config,
            bbox,
            bands,
            floors,
            stats: RasterStats::default(),
        })
    }

    /// Working grid dimensions (before trimming).
    pub fn dimensions(&self) -> (usize, usize) {
        self.floors
            .first()
            .map_or((0, 0), |f| (f.width(), f.height()))
    }

    pub fn stats(&self) -> RasterStats {
        self.stats
    }

    /// Rasterize one triangle. Returns the number of cells that changed.
    pub fn rasterize_triangle(&mut self, triangle: &Triangle, kind: ElementKind) -> usize {
        self.stats.triangles += 1;
        let (width, height) = self.dimensions();
        if width < 3 || height < 3 {
            return 0;
        }

        let tb = triangle.bounds();
        let g = self.config.grid_size;
        let lo = world_to_cell(self.origin_x, self.origin_y, g, tb.min_x, tb.min_y);
        let hi = world_to_cell(self.origin_x, self.origin_y, g, tb.max_x, tb.max_y);
        let x0 = lo.x.max(1);
        let y0 = lo.y.max(1);
        let x1 = hi.x.min(width as i32 - 2);
        let y1 = hi.y.min(height as i32 - 2);

        let (lower, upper) = self.config.vertical_interval(kind, tb.min_z, tb.max_z);
        let cell_type = kind.cell_type();
        let mut written = 0;
        let mut hit_band = false;

        for (band, grid) in self.bands.iter().zip(self.floors.iter_mut()) {
            if !band.overlaps(lower, upper) {
                continue;
            }
            hit_band = true;
            for x in x0..=x1 {
                for y in y0..=y1 {
                    if grid.set_type_with_priority(GridCoord::new(x, y), cell_type) {
                        written += 1;
                    }
                }
            }
        }

        if !hit_band {
            self.stats.triangles_outside_bands += 1;
        }
        self.stats.cells_written += written;
        written
    }

    /// Rasterize every triangle of an element.
    pub fn rasterize_element(&mut self, element: &MeshElement) -> usize {
        self.stats.elements += 1;
        element
            .triangles
            .iter()
            .map(|t| self.rasterize_triangle(t, element.kind))
            .sum()
    }

    /// Trim, pad and wrap the grids with their world frame.
    pub fn finish(self) -> Result<(BuildingGrid, RasterStats), BuildError> {
        let g = self.config.grid_size;
        let (width, height) = self.dimensions();
        let mut bbox = self.bbox;
        bbox.min_x = self.origin_x;
        bbox.min_y = self.origin_y;
        bbox.max_x = self.origin_x + width as f64 * g;
        bbox.max_y = self.origin_y + height as f64 * g;

        let untrimmed = BuildingGrid::new(self.floors, self.bands, bbox, g)?;
        Ok((untrimmed.trimmed(self.config.padding), self.stats))
    }
}

/// Build the navigation grid for a whole building.
///
/// Elements whose geometry failed to extract are logged and skipped.
pub fn build_navigation_grid<S: GeometrySource + ?Sized>(
    source: &S,
    config: &RasterizerConfig,
) -> Result<(BuildingGrid, RasterStats), BuildError> {
    let mut elements = Vec::new();
    let mut failed = 0;
    for result in source.elements() {
        match result {
            Ok(element) => elements.push(element),
            Err(e) => {
                log::warn!("{}", e);
                failed += 1;
            }
        }
    }

    let mut bbox = BoundingBox::empty();
    for t in elements.iter().flat_map(|e| e.triangles.iter()) {
        for v in &t.vertices {
            bbox.expand_to_include(*v);
        }
    }
    if bbox.is_empty() {
        return Err(BuildError::NoGeometry);
    }

    let bands = segment_floors(
        &source.storey_elevations(),
        bbox.min_z,
        bbox.max_z,
        config.min_floor_height,
    );
    log::info!(
        "Rasterizing {} elements onto {} floors (grid size {})",
        elements.len(),
        bands.len(),
        config.grid_size
    );
    for (i, band) in bands.iter().enumerate() {
        log::info!(
            "Floor {}: elevation = {:.3}, height = {:.3}",
            i,
            band.elevation,
            band.height
        );
    }

    let mut rasterizer = GridRasterizer::new(bbox, bands, config.clone())?;
    for element in &elements {
        rasterizer.rasterize_element(element);
    }
    rasterizer.stats.elements_failed = failed;

    let (grid, stats) = rasterizer.finish()?;
    log::info!(
        "Grid {}x{} x {} floors, {} cells written, {} elements skipped",
        grid.width(),
        grid.height(),
        grid.floor_count(),
        stats.cells_written,
        stats.elements_failed
    );
    Ok((grid, stats))
}
