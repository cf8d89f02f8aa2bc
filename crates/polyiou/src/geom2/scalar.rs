//! Coordinate scalar trait and tolerance-based comparison.
//!
//! - `Coord`: floating-point coordinate type (`f64` or `f32`) plus its relative tolerance.
//! - `tol_eq`: scale-aware equality used in place of `==` across the engine.
//!
//! Policy
//! - Tolerances are fixed per type, like the other numeric defaults of this crate.
//! - Comparison is relative to the smaller magnitude, so comparing against an exact
//!   zero degenerates to exact equality. Call sites rely on that.

use nalgebra::RealField;

/// Floating-point coordinate type accepted by the geometry engine.
pub trait Coord: RealField + Copy {
    /// Inverse relative tolerance: `a ≈ b` iff `|a - b| * TOL_SCALE <= min(|a|, |b|)`.
    const TOL_SCALE: Self;
}

impl Coord for f64 {
    const TOL_SCALE: f64 = 1e12;
}

impl Coord for f32 {
    const TOL_SCALE: f32 = 1e5;
}

/// Tolerant scalar equality (relative, not absolute).
#[inline]
pub fn tol_eq<T: Coord>(a: T, b: T) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() * T::TOL_SCALE <= a.abs().min(b.abs())
}

/// Lift an `f64` literal into `T`.
#[inline]
pub(crate) fn lit<T: Coord>(x: f64) -> T {
    nalgebra::convert(x)
}
