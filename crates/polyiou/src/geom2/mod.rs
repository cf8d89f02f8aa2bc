//! Tolerant 2D geometry for convex polygons.
//!
//! Purpose
//! - Provide the layered primitives the IoU pipeline is built on: tolerant
//!   scalars and vectors, directed segments with interior-crossing tests, and a
//!   vertex-cycle `Polygon` with winding, area, angular re-sort and point location.
//! - Stay generic over the coordinate type (`f64`, `f32`) via `Coord`.
//!
//! Conventions
//! - Every coordinate comparison goes through `tol_eq` (relative tolerance, exact
//!   against zero). Plain `==` on coordinates is avoided.
//! - Polar angles are in `[0, 2π)`.
//! - Nothing here aborts on degenerate input: zero-length vectors, parallel
//!   segments and non-convex vertex orders come back as `None`/`Winding::None`/
//!   sentinels.
//!
//! Code cross-refs: `Polygon`, `Segment`, `Vec2Ext`, `Coord`, `crate::iou`

pub mod polygon;
pub mod scalar;
pub mod segment;
mod types;
pub mod vec2;

pub use polygon::Polygon;
pub use scalar::{tol_eq, Coord};
pub use segment::Segment;
pub use types::{GeomError, Location, Winding};
pub use vec2::{cross, point, Point, Vec2Ext};

#[cfg(test)]
mod tests;
