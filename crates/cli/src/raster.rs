//! Pixel masks for the analytic-vs-pixel IoU cross-check.
//!
//! A pixel `(x, y)` belongs to a polygon iff its center `(x + 0.5, y + 0.5)` lies on
//! the inner side of every edge (half-plane test, boundary counts as inside).

use polyiou::geom2::{cross, point, Polygon, Winding};

/// Row-major boolean raster of size `width × height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Fill the pixels covered by a convex polygon. A polygon without a valid
    /// winding covers nothing.
    pub fn rasterize(poly: &Polygon<f64>, width: u32, height: u32) -> Self {
        let mut mask = Self::empty(width, height);
        let side = match poly.winding() {
            Winding::AntiClockwise => 1.0,
            Winding::Clockwise => -1.0,
            Winding::None => return mask,
        };
        let verts = poly.vertices();
        let (lo, hi) = verts.iter().fold(
            (point(f64::INFINITY, f64::INFINITY), point(f64::NEG_INFINITY, f64::NEG_INFINITY)),
            |(lo, hi), v| (lo.inf(v), hi.sup(v)),
        );
        let x0 = lo.x.floor().max(0.0) as u32;
        let y0 = lo.y.floor().max(0.0) as u32;
        let x1 = (hi.x.ceil().max(0.0) as u32).min(width);
        let y1 = (hi.y.ceil().max(0.0) as u32).min(height);
        for y in y0..y1 {
            for x in x0..x1 {
                let c = point(x as f64 + 0.5, y as f64 + 0.5);
                let inside = poly
                    .edges()
                    .all(|e| side * cross(&(e.p2 - e.p1), &(c - e.p1)) >= 0.0);
                if inside {
                    mask.set(x, y);
                }
            }
        }
        mask
    }

    #[inline]
    fn set(&mut self, x: u32, y: u32) {
        self.bits[y as usize * self.width as usize + x as usize] = true;
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[y as usize * self.width as usize + x as usize]
    }

    pub fn count(&self) -> u64 {
        self.bits.iter().filter(|&&b| b).count() as u64
    }
}

/// Pixel counts of two masks and their overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelCounts {
    pub n1: u64,
    pub n2: u64,
    pub inter: u64,
    pub union: u64,
}

impl PixelCounts {
    /// Count both masks. Masks of different size are compared over their common
    /// top-left region.
    pub fn between(a: &Mask, b: &Mask) -> Self {
        let w = a.width.min(b.width);
        let h = a.height.min(b.height);
        let mut counts = Self {
            n1: a.count(),
            n2: b.count(),
            ..Self::default()
        };
        for y in 0..h {
            for x in 0..w {
                if a.get(x, y) && b.get(x, y) {
                    counts.inter += 1;
                }
            }
        }
        counts.union = counts.n1 + counts.n2 - counts.inter;
        counts
    }

    /// Pixel IoU, `None` when both masks are empty.
    pub fn iou(&self) -> Option<f64> {
        if self.union == 0 {
            None
        } else {
            Some(self.inter as f64 / self.union as f64)
        }
    }
}
