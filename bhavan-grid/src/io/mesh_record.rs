//! Classified mesh input (JSON).
//!
//! A flat dump of what a building-model extraction library hands over:
//! storey elevations plus per-element vertex and face arrays.
//!
//! ```json
//! {
//!   "storeys": [0.0, 3.0],
//!   "elements": [
//!     {"id": "2O2Fr$t4X7Zf8NOew3FLOH", "ifc_class": "IfcWall",
//!      "verts": [0, 0, 0, 5, 0, 0, 5, 0, 3], "faces": [0, 1, 2]},
//!     {"id": "door-7", "kind": "door", "error": "no shape representation"}
//!   ]
//! }
//! ```
//!
//! `kind` overrides `ifc_class`. Elements whose class maps to no kind are
//! ignored. Elements carrying an `error`, out-of-range face indices, or
//! vertex/face arrays whose length is not a multiple of three are reported as
//! failed extractions.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{ElementKind, Point3, Triangle};
use crate::grid::{GeometryError, GeometrySource, MeshElement};

/// Errors reading a mesh record.
#[derive(Debug, thiserror::Error)]
pub enum MeshRecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid mesh record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One element as stored in the record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifc_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    /// Flat `x, y, z` triples
    #[serde(default)]
    pub verts: Vec<f64>,
    /// Flat vertex index triples
    #[serde(default)]
    pub faces: Vec<usize>,
    /// Extraction failure reported by the exporter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ElementRecord {
    /// Resolved element kind, `None` when the element takes no part.
    pub fn element_kind(&self) -> Option<ElementKind> {
        self.kind
            .or_else(|| self.ifc_class.as_deref().and_then(ElementKind::from_ifc_class))
    }

    /// Convert to triangles; `None` if the element is not part of the grid.
    pub fn to_element(&self) -> Option<Result<MeshElement, GeometryError>> {
        let kind = self.element_kind()?;
        Some(self.triangles().map(|triangles| MeshElement {
            id: self.id.clone(),
            kind,
            triangles,
        }))
    }

    fn triangles(&self) -> Result<Vec<Triangle>, GeometryError> {
        let fail = |reason: String| GeometryError {
            id: self.id.clone(),
            reason,
        };
        if let Some(error) = &self.error {
            return Err(fail(error.clone()));
        }
        if self.verts.len() % 3 != 0 {
            return Err(fail(format!("{} vertex coordinates", self.verts.len())));
        }
        if self.faces.len() % 3 != 0 {
            return Err(fail(format!("{} face indices", self.faces.len())));
        }

        let vertices: Vec<Point3> = self
            .verts
            .chunks_exact(3)
            .map(|v| Point3::new(v[0], v[1], v[2]))
            .collect();
        self.faces
            .chunks_exact(3)
            .map(|face| {
                let corner = |i: usize| {
                    vertices
                        .get(i)
                        .copied()
                        .ok_or_else(|| fail(format!("face index {} out of range", i)))
                };
                Ok(Triangle::new(corner(face[0])?, corner(face[1])?, corner(face[2])?))
            })
            .collect()
    }
}

/// Storeys plus classified elements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshRecord {
    #[serde(default)]
    pub storeys: Vec<f64>,
    pub elements: Vec<ElementRecord>,
}

impl MeshRecord {
    pub fn from_json(json: &str) -> Result<Self, MeshRecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, MeshRecordError> {
        let reader = BufReader::new(File::open(path)?);
        let record: Self = serde_json::from_reader(reader)?;
        log::info!(
            "Loaded {} elements and {} storeys from {}",
            record.elements.len(),
            record.storeys.len(),
            path.display()
        );
        Ok(record)
    }
}

impl GeometrySource for MeshRecord {
    fn storey_elevations(&self) -> Vec<f64> {
        self.storeys.clone()
    }

    fn elements(&self) -> Vec<Result<MeshElement, GeometryError>> {
        self.elements.iter().filter_map(ElementRecord::to_element).collect()
    }
}
