//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::grid::RasterizerConfig;

use super::defaults;

/// Grid configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Cell edge length (meters)
    #[serde(default = "defaults::grid_size")]
    pub grid_size: f64,

    /// Storey bands lower than this are dropped (meters)
    #[serde(default = "defaults::min_floor_height")]
    pub min_floor_height: f64,

    /// Slab thickness tolerance (meters)
    #[serde(default = "defaults::slab_tolerance")]
    pub slab_tolerance: f64,

    /// Clearance under the next ceiling (meters)
    #[serde(default = "defaults::ceiling_clearance")]
    pub ceiling_clearance: f64,

    /// Extra reach of stairs into the band above (meters)
    #[serde(default = "defaults::stair_headroom")]
    pub stair_headroom: f64,

    /// Empty cells kept around the trimmed grid
    #[serde(default = "defaults::padding")]
    pub padding: usize,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            grid_size: defaults::grid_size(),
            min_floor_height: defaults::min_floor_height(),
            slab_tolerance: defaults::slab_tolerance(),
            ceiling_clearance: defaults::ceiling_clearance(),
            stair_headroom: defaults::stair_headroom(),
            padding: defaults::padding(),
        }
    }
}

impl GridSection {
    /// Convert to RasterizerConfig
    pub fn to_rasterizer_config(&self) -> RasterizerConfig {
        RasterizerConfig {
            grid_size: self.grid_size,
            min_floor_height: self.min_floor_height,
            slab_tolerance: self.slab_tolerance,
            ceiling_clearance: self.ceiling_clearance,
            stair_headroom: self.stair_headroom,
            padding: self.padding,
        }
    }
}
