//! Intersection-over-Union of two convex polygons.
//!
//! Purpose
//! - Assemble the intersection polygon of two convex inputs from (a) boundary
//!   crossings and (b) vertices of each input lying in the other, then measure
//!   area, union and IoU.
//!
//! Pipeline
//! 1. Both inputs must have a valid winding, else `NotConvex`.
//! 2. Crossings of every edge of `b` with the boundary of `a`.
//! 3. Vertices of `b` not Outside `a`, and vertices of `a` not Outside `b`.
//! 4. Collapse tolerance-equal duplicates. Fewer than 3 points means the inputs
//!    are disjoint or only touch: area 0.
//! 5. Sort clockwise around the centroid, re-check the winding, take the area.
//!
//! Error policy
//! - `try_*` functions return `GeomError`; the plain forms use the `-1` sentinel.
//! - Cost is O(N·M) segment pairs for an N-gon against an M-gon.

use tracing::debug;

use crate::geom2::{Coord, GeomError, Location, Point, Polygon, Vec2Ext, Winding};

/// Area of a convex polygon, or `-1` if its winding is `None`.
#[inline]
pub fn area<T: Coord>(poly: &Polygon<T>) -> T {
    poly.area()
}

/// Candidate vertices of `a ∩ b` before de-duplication and ordering.
pub fn intersection_candidates<T: Coord>(a: &Polygon<T>, b: &Polygon<T>) -> Vec<Point<T>> {
    let mut cloud: Vec<Point<T>> = b.edges().flat_map(|e| a.intersections(&e)).collect();
    cloud.extend(
        b.vertices()
            .iter()
            .filter(|v| a.location(v) != Location::Outside),
    );
    cloud.extend(
        a.vertices()
            .iter()
            .filter(|v| b.location(v) != Location::Outside),
    );
    cloud
}

/// Intersection of two convex polygons as a clockwise polygon.
///
/// Returns an empty polygon when the inputs do not overlap (or touch only at a
/// point or along a segment).
pub fn try_intersection<T: Coord>(
    a: &Polygon<T>,
    b: &Polygon<T>,
) -> Result<Polygon<T>, GeomError> {
    if !a.winding().is_valid() || !b.winding().is_valid() {
        return Err(GeomError::NotConvex);
    }
    let cloud = dedup_tol(intersection_candidates(a, b));
    if cloud.len() < 3 {
        return Ok(Polygon::default());
    }
    let mut clipped = Polygon::new(cloud);
    clipped.sort_clockwise();
    if clipped.winding() != Winding::Clockwise {
        debug!(
            points = clipped.len(),
            "intersection cloud did not sort into a convex polygon"
        );
        return Err(GeomError::DegenerateIntersection {
            points: clipped.len(),
        });
    }
    Ok(clipped)
}

/// Area of `a ∩ b`.
pub fn try_area_intersection<T: Coord>(a: &Polygon<T>, b: &Polygon<T>) -> Result<T, GeomError> {
    let clipped = try_intersection(a, b)?;
    if clipped.is_empty() {
        return Ok(T::zero());
    }
    clipped.try_area()
}

/// Area of `a ∩ b`, or `-1` on invalid input / failed assembly.
#[inline]
pub fn area_intersection<T: Coord>(a: &Polygon<T>, b: &Polygon<T>) -> T {
    try_area_intersection(a, b).unwrap_or_else(|_| -T::one())
}

/// `area(a) + area(b) - area(a ∩ b)`.
///
/// Not a bare formula: a failed intersection is an error here instead of feeding
/// its `-1` sentinel into the sum.
pub fn try_area_union<T: Coord>(a: &Polygon<T>, b: &Polygon<T>) -> Result<T, GeomError> {
    let inter = try_area_intersection(a, b)?;
    Ok(a.try_area()? + b.try_area()? - inter)
}

/// Union area, or `-1` if either input (or the intersection) is invalid, rather than
/// the sum with a `-1` intersection folded in.
#[inline]
pub fn area_union<T: Coord>(a: &Polygon<T>, b: &Polygon<T>) -> T {
    try_area_union(a, b).unwrap_or_else(|_| -T::one())
}

/// Intersection over union. `Err(ZeroUnion)` when both inputs have zero area.
pub fn iou<T: Coord>(a: &Polygon<T>, b: &Polygon<T>) -> Result<T, GeomError> {
    evaluate(a, b).map(|r| r.iou)
}

/// All IoU quantities for one pair, computed with a single intersection pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IouReport<T> {
    pub area_a: T,
    pub area_b: T,
    pub intersection: T,
    pub union: T,
    pub iou: T,
}

/// Compute the full report for `a` vs `b`.
pub fn evaluate<T: Coord>(a: &Polygon<T>, b: &Polygon<T>) -> Result<IouReport<T>, GeomError> {
    let area_a = a.try_area()?;
    let area_b = b.try_area()?;
    let intersection = try_area_intersection(a, b)?;
    let union = area_a + area_b - intersection;
    if union <= T::zero() {
        return Err(GeomError::ZeroUnion);
    }
    Ok(IouReport {
        area_a,
        area_b,
        intersection,
        union,
        iou: intersection / union,
    })
}

/// Keep the first of every group of tolerance-equal points.
fn dedup_tol<T: Coord>(points: Vec<Point<T>>) -> Vec<Point<T>> {
    let mut out: Vec<Point<T>> = Vec::with_capacity(points.len());
    for p in points {
        if !out.iter().any(|q| q.tol_eq(&p)) {
            out.push(p);
        }
    }
    out
}
