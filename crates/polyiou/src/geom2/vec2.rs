//! 2D points/vectors on top of `nalgebra::Vector2`.
//!
//! `Point<T>` is a plain alias; the engine-specific operations (tolerant equality,
//! angle between vectors, polar angle) live on the `Vec2Ext` extension trait.
//! Dot product, norm and arithmetic come from nalgebra directly.

use nalgebra::Vector2;

use super::scalar::{tol_eq, Coord};

/// A point (or free vector) in the plane.
pub type Point<T> = Vector2<T>;

/// Build a point from its coordinates.
#[inline]
pub fn point<T: Coord>(x: T, y: T) -> Point<T> {
    Vector2::new(x, y)
}

/// Signed 2D cross product `a.x * b.y - a.y * b.x`.
/// Positive when `b` is counterclockwise from `a`.
#[inline]
pub fn cross<T: Coord>(a: &Point<T>, b: &Point<T>) -> T {
    a.x * b.y - a.y * b.x
}

/// Engine-specific operations on 2D vectors.
pub trait Vec2Ext<T: Coord> {
    /// Componentwise `tol_eq`.
    fn tol_eq(&self, other: &Self) -> bool;

    /// Both components tolerance-equal to zero (i.e. exactly zero, see `scalar`).
    fn is_tol_zero(&self) -> bool;

    /// Unsigned angle to `other` in `[0, π]`; `None` if either vector has zero length.
    fn angle_between(&self, other: &Self) -> Option<T>;

    /// Polar angle relative to the positive x-axis, normalized to `[0, 2π)`.
    fn theta(&self) -> T;
}

impl<T: Coord> Vec2Ext<T> for Vector2<T> {
    #[inline]
    fn tol_eq(&self, other: &Self) -> bool {
        tol_eq(self.x, other.x) && tol_eq(self.y, other.y)
    }

    #[inline]
    fn is_tol_zero(&self) -> bool {
        tol_eq(self.x, T::zero()) && tol_eq(self.y, T::zero())
    }

    fn angle_between(&self, other: &Self) -> Option<T> {
        let denom = self.norm() * other.norm();
        if denom == T::zero() || !denom.is_finite() {
            return None;
        }
        // Rounding can push |cos| past 1 for (anti)parallel inputs.
        let cos = (self.dot(other) / denom).clamp(-T::one(), T::one());
        Some(cos.acos())
    }

    fn theta(&self) -> T {
        let a = self.y.atan2(self.x);
        if a >= T::zero() {
            return a;
        }
        let wrapped = a + T::two_pi();
        if wrapped >= T::two_pi() {
            T::zero()
        } else {
            wrapped
        }
    }
}
