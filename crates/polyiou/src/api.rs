//! Flat function surface over `geom2` and `iou`.
//!
//! Important
//! - Thin wrappers only; the behavior lives in `Polygon` and `crate::iou`.
//! - `area`, `area_intersection` and `area_union` return `-1` for invalid input.
//!   Use the `try_*` forms in `crate::iou` for typed errors.

pub use crate::geom2::{GeomError, Location, Point, Polygon, Segment, Winding};
pub use crate::iou::{
    area, area_intersection, area_union, evaluate, try_area_intersection, try_area_union,
    IouReport,
};
pub use crate::rand2::{ConvexCfg, Frame, GeneratorError, ReplayToken, ShapeGenerator, VertexCount};

use crate::geom2::Coord;

#[inline]
pub fn make_point<T: Coord>(x: T, y: T) -> Point<T> {
    Point::new(x, y)
}

/// Polygon from vertices in traversal order. No validation happens here.
pub fn make_polygon<T: Coord>(points: impl IntoIterator<Item = Point<T>>) -> Polygon<T> {
    points.into_iter().collect()
}

#[inline]
pub fn winding<T: Coord>(poly: &Polygon<T>) -> Winding {
    poly.winding()
}

#[inline]
pub fn sort_clockwise<T: Coord>(poly: &mut Polygon<T>) {
    poly.sort_clockwise();
}

#[inline]
pub fn sort_anticlockwise<T: Coord>(poly: &mut Polygon<T>) {
    poly.sort_anticlockwise();
}

#[inline]
pub fn locate<T: Coord>(poly: &Polygon<T>, p: &Point<T>) -> Location {
    poly.location(p)
}

/// Intersection over union; `Err(ZeroUnion)` instead of NaN when both areas are 0.
#[inline]
pub fn iou<T: Coord>(a: &Polygon<T>, b: &Polygon<T>) -> Result<T, GeomError> {
    crate::iou::iou(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn flat_surface_round_trip() {
        let mut sq = make_polygon([
            make_point(0.0, 0.0),
            make_point(0.0, 1.0),
            make_point(1.0, 0.0),
            make_point(1.0, 1.0),
        ]);
        assert_eq!(winding(&sq), Winding::None);
        assert_eq!(area(&sq), -1.0);
        sort_anticlockwise(&mut sq);
        assert_eq!(winding(&sq), Winding::AntiClockwise);
        assert_eq!(area(&sq), 1.0);
        sort_clockwise(&mut sq);
        assert_eq!(winding(&sq), Winding::Clockwise);
        assert_eq!(locate(&sq, &make_point(0.5, 0.5)), Location::Inside);
        assert_eq!(locate(&sq, &make_point(0.5, 0.0)), Location::OnEdge);
        assert_eq!(locate(&sq, &make_point(2.0, 0.5)), Location::Outside);
        assert_eq!(iou(&sq, &sq), Ok(1.0));
    }

    #[test]
    fn random_points_inside_a_box_locate_inside() {
        let sq = make_polygon([
            make_point(0.0, 0.0),
            make_point(4.0, 0.0),
            make_point(4.0, 3.0),
            make_point(0.0, 3.0),
        ]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = make_point(rng.gen_range(0.01..3.99), rng.gen_range(0.01..2.99));
            assert_eq!(locate(&sq, &p), Location::Inside, "p = {p:?}");
            let q = make_point(rng.gen_range(4.01..9.0), rng.gen_range(-5.0..5.0));
            assert_eq!(locate(&sq, &q), Location::Outside, "q = {q:?}");
        }
    }

    #[test]
    fn two_point_polygon_is_rejected() {
        let a = make_polygon([make_point(0.0, 0.0), make_point(1.0, 0.0)]);
        assert_eq!(iou(&a, &a), Err(GeomError::NotConvex));
        assert_eq!(area_intersection(&a, &a), -1.0);
    }
}
