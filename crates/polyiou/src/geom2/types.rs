//! Classification enums and the geometry error type.

use std::fmt;

/// Cyclic orientation of a polygon's vertex sequence.
///
/// `None` means the sequence does not turn consistently in one direction
/// (non-convex, self-intersecting, folded back, or fewer than 3 vertices).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Winding {
    None,
    Clockwise,
    AntiClockwise,
}

impl Winding {
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Winding::None
    }

    /// Opposite orientation; `None` stays `None`.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Winding::None => Winding::None,
            Winding::Clockwise => Winding::AntiClockwise,
            Winding::AntiClockwise => Winding::Clockwise,
        }
    }
}

/// Where a point lies relative to a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Outside,
    OnEdge,
    Inside,
}

/// Recoverable geometric failures.
///
/// The sentinel-returning entry points (`area`, `area_intersection`, ...) map every
/// variant to `-1`; the `try_*` forms surface the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeomError {
    /// An input polygon has `Winding::None`.
    NotConvex,
    /// The clipped point cloud did not re-sort into a convex polygon.
    DegenerateIntersection { points: usize },
    /// Both inputs have zero area; IoU is undefined.
    ZeroUnion,
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConvex => write!(f, "polygon is not a consistently wound convex polygon"),
            Self::DegenerateIntersection { points } => write!(
                f,
                "intersection cloud of {points} points does not form a convex polygon"
            ),
            Self::ZeroUnion => write!(f, "union area is zero, IoU is undefined"),
        }
    }
}

impl std::error::Error for GeomError {}
