//! Directed segments and pairwise segment intersection.
//!
//! Conventions
//! - A segment whose endpoints are tolerance-equal is degenerate and behaves as the
//!   single point at its midpoint.
//! - "On edge" means strictly between the endpoints: collinear and not at either end.
//! - Intersection only reports true interior crossings (`0 < m < 1`, `0 < n < 1`).
//!   Parallel and collinear pairs report no crossing; overlapping collinear
//!   segments are never intersected.

use super::scalar::{lit, tol_eq, Coord};
use super::vec2::{cross, Point, Vec2Ext};

/// Segment `p1 → p2`. Direction matters for parametrization only.
#[derive(Clone, Copy, Debug)]
pub struct Segment<T: Coord> {
    pub p1: Point<T>,
    pub p2: Point<T>,
}

impl<T: Coord> Segment<T> {
    #[inline]
    pub fn new(p1: Point<T>, p2: Point<T>) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1.tol_eq(&self.p2)
    }

    #[inline]
    pub fn midpoint(&self) -> Point<T> {
        (self.p1 + self.p2) * lit::<T>(0.5)
    }

    #[inline]
    pub fn length(&self) -> T {
        (self.p2 - self.p1).norm()
    }

    /// `p2 - p1`.
    #[inline]
    pub fn direction(&self) -> Point<T> {
        self.p2 - self.p1
    }

    /// Same segment traversed the other way.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// Whether `p` lies strictly inside this segment (endpoints excluded).
    ///
    /// For a degenerate segment the only such point is its midpoint.
    pub fn is_on_edge(&self, p: &Point<T>) -> bool {
        if self.is_degenerate() {
            return p.tol_eq(&self.midpoint());
        }
        let pp1 = p - self.p1;
        let pp2 = p - self.p2;
        tol_eq(cross(&pp1, &pp2), T::zero()) && pp1.dot(&pp2) < T::zero()
    }

    /// Interior crossing point with `other`, if any.
    ///
    /// The reported point averages the locations obtained from both
    /// parametrizations, so it does not depend on argument order.
    pub fn intersection(&self, other: &Segment<T>) -> Option<Point<T>> {
        let half = lit::<T>(0.5);
        match (self.is_degenerate(), other.is_degenerate()) {
            (true, true) => {
                let m1 = self.midpoint();
                let m2 = other.midpoint();
                m1.tol_eq(&m2).then(|| (m1 + m2) * half)
            }
            (true, false) => {
                let m = self.midpoint();
                other.is_on_edge(&m).then_some(m)
            }
            (false, true) => {
                let m = other.midpoint();
                self.is_on_edge(&m).then_some(m)
            }
            (false, false) => self.crossing(other),
        }
    }

    /// Whether the two segments cross at an interior point.
    #[inline]
    pub fn crosses(&self, other: &Segment<T>) -> bool {
        self.intersection(other).is_some()
    }

    /// Crossing of two non-degenerate segments via Cramer's rule on
    /// `a1 + m*a12 = b1 + n*b12`.
    fn crossing(&self, other: &Segment<T>) -> Option<Point<T>> {
        let a12 = self.direction();
        let b12 = other.direction();
        let ang = a12.angle_between(&b12)?;
        if tol_eq(ang, T::zero()) || tol_eq(ang, T::pi()) {
            return None;
        }
        let det = a12.x * b12.y - b12.x * a12.y;
        if tol_eq(det, T::zero()) {
            return None;
        }
        let abx = self.p1.x - other.p1.x;
        let aby = self.p1.y - other.p1.y;
        let n = (aby * a12.x - abx * a12.y) / det;
        let m = (aby * b12.x - abx * b12.y) / det;
        let open = |t: T| t > T::zero() && t < T::one();
        if !(open(m) && open(n)) {
            return None;
        }
        let ip1 = self.p1 + a12 * m;
        let ip2 = other.p1 + b12 * n;
        Some((ip1 + ip2) * lit::<T>(0.5))
    }
}
