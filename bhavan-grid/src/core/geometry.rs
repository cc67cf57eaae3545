//! World-space geometry consumed by the rasterizer.
//!
//! [`BoundingBox`] doubles as the `bbox` field of the persisted grid record,
//! so its field names are part of the interchange format.

use serde::{Deserialize, Serialize};

use super::cell::CellType;
use super::point::Point3;

/// Semantic class of a building element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Wall,
    Door,
    Stair,
    Floor,
}

impl ElementKind {
    /// Default mapping from building-model class names.
    ///
    /// Returns `None` for classes that do not take part in the grid.
    pub fn from_ifc_class(class: &str) -> Option<Self> {
        match class {
            "IfcWall" | "IfcWallStandardCase" | "IfcColumn" | "IfcCurtainWall" | "IfcWindow" => {
                Some(ElementKind::Wall)
            }
            "IfcSlab" | "IfcFloor" => Some(ElementKind::Floor),
            "IfcDoor" => Some(ElementKind::Door),
            "IfcStair" | "IfcStairFlight" => Some(ElementKind::Stair),
            _ => None,
        }
    }

    /// Category written into the grid for this element.
    #[inline]
    pub fn cell_type(self) -> CellType {
        match self {
            ElementKind::Wall => CellType::Wall,
            ElementKind::Door => CellType::Door,
            ElementKind::Stair => CellType::Stair,
            ElementKind::Floor => CellType::Floor,
        }
    }
}

/// A world-space triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3; 3],
}

impl Triangle {
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Axis-aligned bounds of the three vertices.
    pub fn bounds(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for v in &self.vertices {
            bbox.expand_to_include(*v);
        }
        bbox
    }
}

/// Axis-aligned 3D bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Create an empty (inverted) bounding box that expands to fit any point.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            min_z: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    /// True until at least one point was included.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y || self.min_z > self.max_z
    }

    pub fn expand_to_include(&mut self, p: Point3) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.min_z = self.min_z.min(p.z);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
        self.max_z = self.max_z.max(p.z);
    }

    #[inline]
    pub fn size_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn size_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn size_z(&self) -> f64 {
        self.max_z - self.min_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ifc_class_mapping() {
        assert_eq!(ElementKind::from_ifc_class("IfcWindow"), Some(ElementKind::Wall));
        assert_eq!(ElementKind::from_ifc_class("IfcColumn"), Some(ElementKind::Wall));
        assert_eq!(ElementKind::from_ifc_class("IfcSlab"), Some(ElementKind::Floor));
        assert_eq!(ElementKind::from_ifc_class("IfcDoor"), Some(ElementKind::Door));
        assert_eq!(
            ElementKind::from_ifc_class("IfcStairFlight"),
            Some(ElementKind::Stair)
        );
        assert_eq!(ElementKind::from_ifc_class("IfcFurnishingElement"), None);
    }

    #[test]
    fn test_bounding_box_expand() {
        let mut bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        bbox.expand_to_include(Point3::new(1.0, -2.0, 0.5));
        bbox.expand_to_include(Point3::new(-1.0, 4.0, 3.0));
        assert!(!bbox.is_empty());
        assert_eq!(bbox.min_x, -1.0);
        assert_eq!(bbox.max_y, 4.0);
        assert_eq!(bbox.size_z(), 2.5);
    }

    #[test]
    fn test_triangle_bounds() {
        let t = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 3.0, 1.0),
        );
        let b = t.bounds();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (0.0, 2.0, 0.0, 3.0));
    }
}
