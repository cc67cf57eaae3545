//! Test utilities for bhavan-grid integration tests.
//!
//! Floors are drawn as ASCII, top row first (highest `y`), with the same
//! characters [`FloorGrid::render_ascii`] prints.

#![allow(dead_code)]

use bhavan_grid::io::{ElementRecord, MeshRecord};
use bhavan_grid::{BoundingBox, BuildingGrid, CellType, FloorBand, FloorGrid, GridCoord};

pub const STOREY_HEIGHT: f64 = 3.0;

/// Parse an ASCII floor plan.
pub fn floor_from_ascii(rows: &[&str]) -> FloorGrid {
    let height = rows.len();
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let mut floor = FloorGrid::new(width, height);
    for (row, line) in rows.iter().enumerate() {
        let y = (height - 1 - row) as i32;
        for (x, ch) in line.chars().enumerate() {
            let cell = CellType::ALL
                .into_iter()
                .find(|c| c.as_char() == ch)
                .unwrap_or_else(|| panic!("unknown cell char {:?}", ch));
            floor.set_type(GridCoord::new(x as i32, y), cell);
        }
    }
    floor
}

/// Building from ASCII floors, bottom floor first, storeys 3 m apart.
pub fn building(floors: &[&[&str]], grid_size: f64) -> BuildingGrid {
    let grids: Vec<FloorGrid> = floors.iter().map(|rows| floor_from_ascii(rows)).collect();
    let bands = (0..grids.len())
        .map(|i| FloorBand::new(i as f64 * STOREY_HEIGHT, STOREY_HEIGHT))
        .collect();
    let (w, h) = (grids[0].width(), grids[0].height());
    let bbox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        min_z: 0.0,
        max_x: w as f64 * grid_size,
        max_y: h as f64 * grid_size,
        max_z: grids.len() as f64 * STOREY_HEIGHT,
    };
    BuildingGrid::new(grids, bands, bbox, grid_size).expect("valid test building")
}

/// Deterministic pseudo-random generator for test layouts.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// True with probability `percent / 100`.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next_u32() % 100 < percent
    }
}

// ============================================================================
// Mesh helpers
// ============================================================================

/// Horizontal rectangle at height `z` as two triangles.
pub fn slab(id: &str, class: &str, x0: f64, y0: f64, x1: f64, y1: f64, z: f64) -> ElementRecord {
    ElementRecord {
        id: id.to_string(),
        ifc_class: Some(class.to_string()),
        verts: vec![x0, y0, z, x1, y0, z, x1, y1, z, x0, y1, z],
        faces: vec![0, 1, 2, 0, 2, 3],
        ..Default::default()
    }
}

/// Axis-aligned box between two corners, all six faces.
pub fn solid(id: &str, class: &str, min: [f64; 3], max: [f64; 3]) -> ElementRecord {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    ElementRecord {
        id: id.to_string(),
        ifc_class: Some(class.to_string()),
        verts: vec![
            x0, y0, z0, x1, y0, z0, x1, y1, z0, x0, y1, z0, // bottom
            x0, y0, z1, x1, y0, z1, x1, y1, z1, x0, y1, z1, // top
        ],
        faces: vec![
            0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7, 0, 1, 5, 0, 5, 4, 1, 2, 6, 1, 6, 5, 2, 3, 7, 2, 7,
            6, 3, 0, 4, 3, 4, 7,
        ],
        ..Default::default()
    }
}

/// Two-storey box building, 10 m x 6 m, with one exterior door on each
/// floor and a stair in the north-east corner spanning both storeys.
pub fn two_storey_mesh() -> MeshRecord {
    let mut elements = Vec::new();
    for (storey, z) in [(0, 0.0), (1, STOREY_HEIGHT)] {
        let top = z + STOREY_HEIGHT;
        elements.push(slab(&format!("slab{}", storey), "IfcSlab", 0.0, 0.0, 10.0, 6.0, z + 0.6));
        elements.push(solid(&format!("s{}", storey), "IfcWall", [0.0, 0.0, z], [10.0, 0.2, top]));
        elements.push(solid(&format!("n{}", storey), "IfcWall", [0.0, 5.8, z], [10.0, 6.0, top]));
        elements.push(solid(&format!("w{}", storey), "IfcWall", [0.0, 0.0, z], [0.2, 6.0, top]));
        elements.push(solid(&format!("e{}", storey), "IfcWall", [9.8, 0.0, z], [10.0, 6.0, top]));
        elements.push(solid(
            &format!("door{}", storey),
            "IfcDoor",
            [4.0, 0.0, z],
            [5.0, 0.2, z + 2.1],
        ));
    }
    elements.push(solid("stair", "IfcStairFlight", [8.0, 4.0, 0.0], [9.0, 5.0, STOREY_HEIGHT]));
    MeshRecord {
        storeys: vec![0.0, STOREY_HEIGHT],
        elements,
    }
}
