//! Seeded random shapes in a bounded frame (boxes and convex k-gons).
//!
//! Purpose
//! - Feed the property tests, benches and the pixel cross-check with reproducible
//!   convex polygons. The generator owns its RNG; nothing here touches global state.
//!
//! Model
//! - Boxes: integer corners near 25% / 75% of each frame extent, jittered by up to
//!   20% of the extent, emitted Clockwise as `(w1,h1),(w1,h2),(w2,h2),(w2,h1)`.
//! - Convex k-gons: `n` points on a randomly sized and rotated ellipse that fits the
//!   frame, at jittered equally spaced angles, re-sorted Clockwise and validated.
//! - Replay: `(seed, index)` is mixed into a single `StdRng` seed, so trial `i` of a
//!   run can be regenerated without drawing trials `0..i`.
//!
//! Code cross-refs: `Polygon::sort_clockwise`, `Polygon::winding`.

use std::f64::consts::PI;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::geom2::{point, Polygon, Winding};

/// Error type for the shape generator.
#[derive(Debug)]
pub enum GeneratorError {
    InvalidParams { reason: String },
    DegenerateSample { reason: String },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSample {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid generator params: {reason}"),
            Self::DegenerateSample { reason } => write!(f, "degenerate sample: {reason}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Vertex count distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Axis-aligned drawing area `[0, width) × [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
        }
    }
}

impl Frame {
    fn validate(&self) -> Result<(), GeneratorError> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(GeneratorError::invalid("frame extents must be finite"));
        }
        if self.width < 4.0 || self.height < 4.0 {
            return Err(GeneratorError::invalid("frame must be at least 4x4"));
        }
        Ok(())
    }
}

/// Convex k-gon sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct ConvexCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Redraws allowed before giving up with `DegenerateSample`.
    pub max_attempts: u32,
}

impl Default for ConvexCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(6),
            angle_jitter_frac: 0.3,
            max_attempts: 16,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn mixed_seed(self) -> u64 {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)))
    }
}

const BOX_MAX_ATTEMPTS: u32 = 64;

/// Caller-owned source of random convex shapes.
#[derive(Clone, Debug)]
pub struct ShapeGenerator {
    rng: StdRng,
}

impl ShapeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_replay(tok: ReplayToken) -> Self {
        Self::new(tok.mixed_seed())
    }

    /// Clockwise integer-coordinate box inside `frame`, never degenerate.
    pub fn axis_aligned_box(&mut self, frame: Frame) -> Result<Polygon<f64>, GeneratorError> {
        frame.validate()?;
        for attempt in 0..BOX_MAX_ATTEMPTS {
            let (w1, w2) = self.box_span(frame.width);
            let (h1, h2) = self.box_span(frame.height);
            if w1 < w2 && h1 < h2 {
                return Ok(Polygon::new(vec![
                    point(w1, h1),
                    point(w1, h2),
                    point(w2, h2),
                    point(w2, h1),
                ]));
            }
            debug!(attempt, w1, w2, h1, h2, "redrawing flat box");
        }
        Err(GeneratorError::degenerate(format!(
            "no non-flat box after {BOX_MAX_ATTEMPTS} attempts"
        )))
    }

    /// Random convex polygon inside `frame`, vertices Clockwise.
    pub fn convex(
        &mut self,
        cfg: ConvexCfg,
        frame: Frame,
    ) -> Result<Polygon<f64>, GeneratorError> {
        frame.validate()?;
        if cfg.max_attempts == 0 {
            return Err(GeneratorError::invalid("max_attempts must be > 0"));
        }
        if !cfg.angle_jitter_frac.is_finite() {
            return Err(GeneratorError::invalid("angle_jitter_frac must be finite"));
        }
        for attempt in 0..cfg.max_attempts {
            let mut poly = self.ellipse_points(cfg, frame);
            poly.sort_clockwise();
            if poly.winding() == Winding::Clockwise {
                return Ok(poly);
            }
            debug!(attempt, n = poly.len(), "redrawing convex sample");
        }
        Err(GeneratorError::degenerate(format!(
            "no convex polygon after {} attempts",
            cfg.max_attempts
        )))
    }

    /// Low and high box coordinate along an axis of length `extent`, as integers
    /// clamped to `[0, extent - 1]`.
    fn box_span(&mut self, extent: f64) -> (f64, f64) {
        let hi_px = (extent - 1.0).floor();
        let mut jittered = |frac: f64| -> f64 {
            let u: f64 = self.rng.gen_range(-1.0..=1.0);
            (u * 0.2 * extent + frac * extent).trunc().clamp(0.0, hi_px)
        };
        let a = jittered(0.25);
        let b = jittered(0.75);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn ellipse_points(&mut self, cfg: ConvexCfg, frame: Frame) -> Polygon<f64> {
        let n = cfg.vertex_count.sample(&mut self.rng);
        let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
        let delta = 2.0 * PI / (n as f64);

        // Semi-axes between 15% and 45% of the smaller extent keep any rotation
        // inside the frame around its center.
        let short = frame.width.min(frame.height);
        let ra = self.rng.gen_range(0.15..=0.45) * short;
        let rb = self.rng.gen_range(0.15..=0.45) * short;
        let r_max = ra.max(rb);
        let cx = self.rng.gen_range(r_max..=frame.width - r_max);
        let cy = self.rng.gen_range(r_max..=frame.height - r_max);
        let (sin_rot, cos_rot) = self.rng.gen_range(0.0..PI).sin_cos();
        let phase = self.rng.gen_range(0.0..2.0 * PI);

        (0..n)
            .map(|k| {
                let jitter = self.rng.gen_range(-1.0..=1.0) * aj * delta;
                let th = phase + (k as f64) * delta + jitter;
                let (ex, ey) = (ra * th.cos(), rb * th.sin());
                point(
                    cx + ex * cos_rot - ey * sin_rot,
                    cy + ex * sin_rot + ey * cos_rot,
                )
            })
            .collect()
    }
}
