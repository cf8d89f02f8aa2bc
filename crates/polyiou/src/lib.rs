//! Convex polygon geometry and Intersection-over-Union.
//!
//! Layout
//! - `geom2`: points, segments, convex polygons, tolerance-based comparison.
//! - `iou`: intersection polygon, area, union and IoU of two convex polygons.
//! - `rand2`: seeded random boxes and convex k-gons for tests and cross-checks.
//! - `api`: flat function surface (`make_polygon`, `area`, `locate`, `iou`, ...).
//!
//! Conventions
//! - Everything is generic over `Coord` (`f64`, `f32`); coordinates are compared with a
//!   relative tolerance, never an absolute epsilon.
//! - Inputs are expected convex. Invalid input yields `Err(GeomError)` from the
//!   `try_*` forms and the `-1` sentinel from the plain area functions.

pub mod api;
pub mod geom2;
pub mod iou;
pub mod rand2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{
        point, tol_eq, Coord, GeomError, Location, Point, Polygon, Segment, Vec2Ext, Winding,
    };
    pub use crate::iou::{evaluate, iou, try_area_intersection, IouReport};
    pub use crate::rand2::{ConvexCfg, Frame, ReplayToken, ShapeGenerator, VertexCount};
}
