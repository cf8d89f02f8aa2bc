//! Convex polygon as an ordered, closed vertex cycle.
//!
//! Purpose
//! - Hold a vertex sequence (`v[N-1]` connects back to `v[0]`) and answer the
//!   questions the IoU pipeline asks: winding, area, canonical angular order,
//!   point location, and boundary crossings with a query segment.
//!
//! Assumptions and conventions
//! - Convexity is never assumed silently: `winding()` detects it, and `area()`
//!   returns the `-1` sentinel when the order is not consistently convex.
//! - `location()` uses a centroid ray and treats *any* boundary crossing as
//!   Outside. That is only sound for convex polygons and must not be reused as a
//!   general point-in-polygon test.
//! - Re-sorting mutates the stored order but never vertex values.
//!
//! Code cross-refs: `segment::Segment`, `vec2::Vec2Ext`, `types::{Winding, Location}`

use std::cmp::Ordering;

use super::scalar::{lit, tol_eq, Coord};
use super::segment::Segment;
use super::types::{GeomError, Location, Winding};
use super::vec2::{cross, Point, Vec2Ext};

/// Ordered vertex cycle. Valid for geometric operations with at least 3 vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon<T: Coord> {
    verts: Vec<Point<T>>,
}

impl<T: Coord> Default for Polygon<T> {
    fn default() -> Self {
        Self { verts: Vec::new() }
    }
}

impl<T: Coord> Polygon<T> {
    #[inline]
    pub fn new(verts: Vec<Point<T>>) -> Self {
        Self { verts }
    }

    /// Build from `(x, y)` pairs.
    pub fn from_xy(xy: &[(T, T)]) -> Self {
        xy.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[inline]
    pub fn push(&mut self, p: Point<T>) {
        self.verts.push(p);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// At least 3 vertices (necessary, not sufficient, for a convex polygon).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.verts.len() >= 3
    }

    #[inline]
    pub fn vertices(&self) -> &[Point<T>] {
        &self.verts
    }

    #[inline]
    pub fn into_vertices(self) -> Vec<Point<T>> {
        self.verts
    }

    /// Reverse the traversal direction.
    #[inline]
    pub fn flip(&mut self) {
        self.verts.reverse();
    }

    /// Copy translated by `offset`.
    pub fn translated(&self, offset: Point<T>) -> Self {
        self.verts.iter().map(|p| p + offset).collect()
    }

    /// Boundary edge `i → i+1` (cyclic). Panics if the polygon is empty.
    #[inline]
    pub fn edge(&self, i: usize) -> Segment<T> {
        let n = self.verts.len();
        Segment::new(self.verts[i % n], self.verts[(i + 1) % n])
    }

    /// The `N` cyclic boundary edges. A single vertex yields one degenerate edge.
    pub fn edges(&self) -> impl Iterator<Item = Segment<T>> + '_ {
        (0..self.verts.len()).map(move |i| self.edge(i))
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Option<Point<T>> {
        if self.verts.is_empty() {
            return None;
        }
        let sum = self
            .verts
            .iter()
            .fold(Point::<T>::zeros(), |acc, p| acc + p);
        Some(sum / lit::<T>(self.verts.len() as f64))
    }

    /// Classify the turning direction over every cyclic vertex triple.
    ///
    /// Collinear triples are tolerated unless the two edges fold back onto each
    /// other. Any sign disagreement, or no turn at all, yields `Winding::None`.
    pub fn winding(&self) -> Winding {
        let n = self.verts.len();
        if n < 3 {
            return Winding::None;
        }
        let mut wind = Winding::None;
        for i in 0..n {
            let p0 = self.verts[i];
            let p1 = self.verts[(i + 1) % n];
            let p2 = self.verts[(i + 2) % n];
            let p01 = p1 - p0;
            let p12 = p2 - p1;
            let turn = cross(&p01, &p12);
            if tol_eq(turn, T::zero()) {
                if p01.dot(&p12) < T::zero() {
                    return Winding::None;
                }
                continue;
            }
            let here = if turn > T::zero() {
                Winding::AntiClockwise
            } else {
                Winding::Clockwise
            };
            if wind == Winding::None {
                wind = here;
            } else if wind != here {
                return Winding::None;
            }
        }
        wind
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.winding() == Winding::Clockwise
    }

    #[inline]
    pub fn is_anticlockwise(&self) -> bool {
        self.winding() == Winding::AntiClockwise
    }

    /// Fan-triangulated area from vertex 0, or `Err(NotConvex)`.
    pub fn try_area(&self) -> Result<T, GeomError> {
        if !self.winding().is_valid() {
            return Err(GeomError::NotConvex);
        }
        let half = lit::<T>(0.5);
        let p0 = self.verts[0];
        let area = self.verts[1..].windows(2).fold(T::zero(), |acc, w| {
            acc + cross(&(w[0] - p0), &(w[1] - p0)).abs() * half
        });
        Ok(area)
    }

    /// Area, or `-1` when the winding is `None`. Check the sentinel before use.
    #[inline]
    pub fn area(&self) -> T {
        self.try_area().unwrap_or_else(|_| -T::one())
    }

    /// Shoelace area: positive for anticlockwise order, negative for clockwise.
    /// No convexity check; 0 for fewer than 3 vertices.
    pub fn signed_area(&self) -> T {
        let n = self.verts.len();
        if n < 3 {
            return T::zero();
        }
        let twice = (0..n).fold(T::zero(), |acc, i| {
            acc + cross(&self.verts[i], &self.verts[(i + 1) % n])
        });
        twice * lit::<T>(0.5)
    }

    /// Re-order the vertices by polar angle around the centroid.
    ///
    /// Ascending angle gives anticlockwise order, descending gives clockwise.
    /// Only a point set already in convex position comes out convex; callers
    /// re-check `winding()` afterwards. `Winding::None` and fewer than 3 vertices
    /// leave the order untouched.
    pub fn sort_in(&mut self, wind: Winding) {
        if wind == Winding::None || self.verts.len() < 3 {
            return;
        }
        let Some(c) = self.centroid() else {
            return;
        };
        let mut keyed: Vec<(T, Point<T>)> =
            self.verts.iter().map(|p| ((p - c).theta(), *p)).collect();
        keyed.sort_by(|a, b| {
            let ord = a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal);
            if wind == Winding::Clockwise {
                ord.reverse()
            } else {
                ord
            }
        });
        self.verts = keyed.into_iter().map(|(_, p)| p).collect();
    }

    #[inline]
    pub fn sort_clockwise(&mut self) {
        self.sort_in(Winding::Clockwise);
    }

    #[inline]
    pub fn sort_anticlockwise(&mut self) {
        self.sort_in(Winding::AntiClockwise);
    }

    /// Locate `p` relative to this (convex) polygon.
    ///
    /// - 0 vertices: Outside. 1 vertex: Inside iff equal. 2 vertices: OnEdge iff
    ///   strictly inside the segment.
    /// - Otherwise OnEdge if strictly inside a boundary edge; Inside if equal to a
    ///   vertex; else Outside iff the segment centroid→`p` crosses an edge or
    ///   passes through a vertex.
    pub fn location(&self, p: &Point<T>) -> Location {
        match self.verts.len() {
            0 => Location::Outside,
            1 => {
                if self.verts[0].tol_eq(p) {
                    Location::Inside
                } else {
                    Location::Outside
                }
            }
            2 => {
                if Segment::new(self.verts[0], self.verts[1]).is_on_edge(p) {
                    Location::OnEdge
                } else {
                    Location::Outside
                }
            }
            _ => {
                if self.edges().any(|e| e.is_on_edge(p)) {
                    return Location::OnEdge;
                }
                // Vertices are Inside: the ray ends exactly on the boundary.
                if self.verts.iter().any(|v| v.tol_eq(p)) {
                    return Location::Inside;
                }
                let Some(c) = self.centroid() else {
                    return Location::Outside;
                };
                let ray = Segment::new(c, *p);
                // Passing through a vertex leaves the polygon just like crossing an
                // edge interior does; the strict crossing test misses that case.
                let exits = self.edges().any(|e| e.crosses(&ray))
                    || self.verts.iter().any(|v| passes_through(&c, p, v));
                if exits {
                    Location::Outside
                } else {
                    Location::Inside
                }
            }
        }
    }

    /// Interior crossings of `line` with the boundary, in edge traversal order.
    pub fn intersections(&self, line: &Segment<T>) -> Vec<Point<T>> {
        self.edges().filter_map(|e| e.intersection(line)).collect()
    }
}

/// Whether `v` lies on the open segment `c → p`, collinear up to the relative
/// tolerance of `T`.
///
/// Rounded coordinates rarely give an exactly zero cross product, so this compares
/// `|cross|` against the product of the lengths instead of using `tol_eq`.
fn passes_through<T: Coord>(c: &Point<T>, p: &Point<T>, v: &Point<T>) -> bool {
    let cp = p - c;
    let cv = v - c;
    let along = cp.dot(&cv);
    if along <= T::zero() || along >= cp.norm_squared() {
        return false;
    }
    cross(&cp, &cv).abs() * T::TOL_SCALE <= cp.norm() * cv.norm()
}

impl<T: Coord> FromIterator<Point<T>> for Polygon<T> {
    fn from_iter<I: IntoIterator<Item = Point<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Coord> From<Vec<Point<T>>> for Polygon<T> {
    fn from(verts: Vec<Point<T>>) -> Self {
        Self::new(verts)
    }
}
