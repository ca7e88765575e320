// lattice.rs — Grid of random unit gradients for gradient noise.
//
// A field built for `width × height` cells stores one gradient per lattice
// point, including the far corner of the last cell:
//
//   lattice points: (width + 1) × (height + 1)
//
//   gx:  0   1   2  ...  width
//        •---•---•- ... -•        each • holds (sin θ, cos θ)
//        | c | c |       |        each c is a cell sampled by noise
//        •---•---•- ... -•
//
// Noise at (x, y) reads the four corners of cell (floor x, floor y), so with
// this margin every point inside [0, width) × [0, height) is addressable.
//
// Storage is column-major (gx outer) because that is the order gradients are
// drawn from the random source; a given draw sequence therefore always lands
// on the same lattice points.

use log::debug;
use rand::RngCore;

use crate::error::{try_alloc, Result};

/// Angles are drawn as 12-bit integers and used directly as radians.
pub const ANGLE_MASK: u32 = 0xFFF;

// ---------------------------------------------------------------------------
// Random source
// ---------------------------------------------------------------------------

/// Anything that can supply gradient angles.
///
/// Values are masked to `[0, 4096)` by the field, so a source may return any
/// `u32`. The noise texture is a pure function of the sequence drawn.
pub trait GradientSource {
    fn next_angle(&mut self) -> u32;
}

/// Every `rand` generator is a gradient source.
impl<R: RngCore + ?Sized> GradientSource for R {
    #[inline]
    fn next_angle(&mut self) -> u32 {
        self.next_u32() & ANGLE_MASK
    }
}

/// Adapter turning a closure into a `GradientSource`.
///
/// ```
/// use wallnoise::{FnSource, NoiseEngine};
///
/// let mut engine = NoiseEngine::new(4, 4)?;
/// engine.seed_gradients(&mut FnSource(|| 0));
/// assert_eq!(engine.sample(1.0, 2.0)?, 0.0);
/// # Ok::<(), wallnoise::Error>(())
/// ```
pub struct FnSource<F: FnMut() -> u32>(pub F);

impl<F: FnMut() -> u32> GradientSource for FnSource<F> {
    #[inline]
    fn next_angle(&mut self) -> u32 {
        (self.0)() & ANGLE_MASK
    }
}

// ---------------------------------------------------------------------------
// Gradient
// ---------------------------------------------------------------------------

/// A unit vector attached to one lattice point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gradient {
    pub x: f64,
    pub y: f64,
}

impl Gradient {
    /// `(sin θ, cos θ)` for an integer angle in radians.
    #[inline]
    pub fn from_angle(angle: u32) -> Self {
        let theta = angle as f64;
        Gradient {
            x: theta.sin(),
            y: theta.cos(),
        }
    }

    /// Signed projection of the offset `(dx, dy)` onto this gradient.
    #[inline]
    pub fn dot(self, dx: f64, dy: f64) -> f64 {
        dx * self.x + dy * self.y
    }
}

// ---------------------------------------------------------------------------
// GradientField
// ---------------------------------------------------------------------------

/// Gradients for a `cells_x × cells_y` grid of noise cells.
#[derive(Clone)]
pub struct GradientField {
    /// Column-major: point (gx, gy) lives at `gx * points_y + gy`.
    gradients: Vec<Gradient>,
    cells_x: usize,
    cells_y: usize,
}

impl GradientField {
    /// Allocate a field covering `cells_x × cells_y` cells. Every gradient
    /// starts as the zero vector until `reseed` runs.
    pub fn new(cells_x: usize, cells_y: usize) -> Result<Self> {
        let len = cells_x
            .checked_add(1)
            .zip(cells_y.checked_add(1))
            .and_then(|(px, py)| px.checked_mul(py));
        let gradients = try_alloc(len, cells_x, cells_y)?;
        Ok(GradientField {
            gradients,
            cells_x,
            cells_y,
        })
    }

    /// Number of cells along x. Valid noise x-coordinates are `[0, cells_x)`.
    #[inline]
    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    /// Number of cells along y.
    #[inline]
    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    /// Lattice points along y (cells plus the closing edge).
    #[inline]
    fn points_y(&self) -> usize {
        self.cells_y + 1
    }

    /// Redraw every gradient from `source`, gx outer, gy inner.
    pub fn reseed<S: GradientSource + ?Sized>(&mut self, source: &mut S) {
        for g in self.gradients.iter_mut() {
            *g = Gradient::from_angle(source.next_angle() & ANGLE_MASK);
        }
        debug!(
            "reseeded {}×{} gradient lattice ({} draws)",
            self.cells_x + 1,
            self.cells_y + 1,
            self.gradients.len()
        );
    }

    /// Gradient at lattice point (gx, gy).
    ///
    /// Callers validate the cell first; `gx <= cells_x` and `gy <= cells_y`
    /// hold on every path into this function.
    #[inline]
    pub(crate) fn at(&self, gx: usize, gy: usize) -> Gradient {
        debug_assert!(gx <= self.cells_x && gy <= self.cells_y);
        self.gradients[gx * self.points_y() + gy]
    }

    /// Gradient at (gx, gy), or `None` outside the lattice.
    pub fn get(&self, gx: usize, gy: usize) -> Option<Gradient> {
        if gx > self.cells_x || gy > self.cells_y {
            return None;
        }
        Some(self.at(gx, gy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_includes_margin() {
        let f = GradientField::new(4, 3).unwrap();
        assert_eq!(f.gradients.len(), 5 * 4);
        assert!(f.get(4, 3).is_some());
        assert!(f.get(5, 0).is_none());
        assert!(f.get(0, 4).is_none());
    }

    #[test]
    fn test_reseed_unit_length() {
        let mut f = GradientField::new(8, 8).unwrap();
        let mut n = 0u32;
        f.reseed(&mut FnSource(|| {
            n = n.wrapping_mul(1103515245).wrapping_add(12345);
            n
        }));
        for g in &f.gradients {
            assert!((g.x * g.x + g.y * g.y - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reseed_order_is_column_major() {
        let mut f = GradientField::new(1, 1).unwrap();
        let mut next = 0u32;
        f.reseed(&mut FnSource(|| {
            next += 1;
            next
        }));
        // Draws 1, 2, 3, 4 land on (0,0), (0,1), (1,0), (1,1).
        assert_eq!(f.get(0, 0), Some(Gradient::from_angle(1)));
        assert_eq!(f.get(0, 1), Some(Gradient::from_angle(2)));
        assert_eq!(f.get(1, 0), Some(Gradient::from_angle(3)));
        assert_eq!(f.get(1, 1), Some(Gradient::from_angle(4)));
    }

    #[test]
    fn test_source_masked_to_12_bits() {
        let mut src = FnSource(|| 0xFFFF_F001);
        assert_eq!(src.next_angle(), 1);
    }

    #[test]
    fn test_zero_angle_points_up() {
        let g = Gradient::from_angle(0);
        assert_eq!(g, Gradient { x: 0.0, y: 1.0 });
        assert_eq!(g.dot(0.3, 0.5), 0.5);
    }
}
