//! Core types for the bhavan-grid library.
//!
//! - [`CellType`]: semantic cell categories and their write precedence
//! - [`GridCoord`], [`CellPos`]: planar and per-floor cell coordinates
//! - [`Point3`], [`Triangle`], [`BoundingBox`]: world-space geometry
//! - [`ElementKind`]: building element classes fed to the rasterizer

mod cell;
mod geometry;
mod point;

pub use cell::{CellType, UnknownCategory};
pub use geometry::{BoundingBox, ElementKind, Triangle};
pub use point::{CellPos, GridCoord, Point3};
