// noise.rs — Seedable 2-D gradient noise over a canvas-sized lattice.
//
// Evaluation at a fractional point (x, y):
//
//   (gx,gy+1) •-------• (gx+1,gy+1)       d_i = gradient_i · (p − corner_i)
//             |   p   |
//             |       |                   blend d1,d2 and d3,d4 along x,
//     (gx,gy) •-------• (gx+1,gy)         then the two results along y
//
// with the blend weight s = t²(2 − t) for fractional part t. The result is
// zero on every lattice point and roughly within [-1, 1] elsewhere.
//
// The engine has two states: constructed (unseeded) and seeded. Every
// evaluation in the unseeded state fails with `Error::NotSeeded`.

use log::debug;

use crate::canvas::{Canvas, Sample};
use crate::error::{Error, Result};
use crate::fractal::{self, FractalConfig};
use crate::lattice::{GradientField, GradientSource};

/// Smoothed linear interpolation between `a` and `b` at `t ∈ [0, 1]`.
#[inline]
pub fn inter(a: f64, b: f64, t: f64) -> f64 {
    let s = t * t * (2.0 - t);
    a * (1.0 - s) + b * s
}

/// Gradient noise generator bound to a fixed lattice extent.
#[derive(Clone)]
pub struct NoiseEngine {
    field: GradientField,
    seeded: bool,
}

impl NoiseEngine {
    /// Allocate an unseeded engine whose noise is defined on
    /// `[0, width) × [0, height)`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let field = GradientField::new(width, height)?;
        debug!("noise engine lattice {width}×{height} (unseeded)");
        Ok(NoiseEngine {
            field,
            seeded: false,
        })
    }

    /// An engine covering every pixel coordinate of `canvas`.
    pub fn for_canvas<T: Sample>(canvas: &Canvas<T>) -> Result<Self> {
        Self::new(canvas.width(), canvas.height())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.field.cells_x()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.field.cells_y()
    }

    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Redraw every gradient from `source`. May be called again to get a new
    /// noise realization without reallocating.
    pub fn seed_gradients<S: GradientSource + ?Sized>(&mut self, source: &mut S) {
        self.field.reseed(source);
        self.seeded = true;
    }

    /// Single-octave gradient noise at (x, y).
    ///
    /// Fails with `NotSeeded` before the first `seed_gradients`, and with
    /// `OutsideLattice` unless `0 ≤ x < width` and `0 ≤ y < height`.
    pub fn sample(&self, x: f64, y: f64) -> Result<f64> {
        if !self.seeded {
            return Err(Error::NotSeeded);
        }
        let (gx, gy) = self.cell_of(x, y)?;

        let x0 = gx as f64;
        let y0 = gy as f64;
        let x1 = x0 + 1.0;
        let y1 = y0 + 1.0;

        let f = &self.field;
        let d1 = f.at(gx, gy).dot(x - x0, y - y0);
        let d2 = f.at(gx + 1, gy).dot(x - x1, y - y0);
        let d3 = f.at(gx, gy + 1).dot(x - x0, y - y1);
        let d4 = f.at(gx + 1, gy + 1).dot(x - x1, y - y1);

        let tx = x - x0;
        let ty = y - y0;
        let i1 = inter(d1, d2, tx);
        let i2 = inter(d3, d4, tx);
        Ok(inter(i1, i2, ty))
    }

    /// Fractal noise: `octaves` layers starting at `base_frequency`, each
    /// doubling the frequency and halving the weight.
    ///
    /// Zero octaves yields `0.0` without touching the lattice. More than
    /// [`MAX_OCTAVES`] octaves fails with `InvalidConfig`.
    ///
    /// [`MAX_OCTAVES`]: crate::fractal::MAX_OCTAVES
    pub fn fractal(&self, x: f64, y: f64, base_frequency: f64, octaves: u32) -> Result<f64> {
        fractal::accumulate(x, y, base_frequency, octaves, |u, v| self.sample(u, v))
    }

    /// `fractal` with parameters taken from a config.
    #[inline]
    pub fn fractal_with(&self, x: f64, y: f64, config: &FractalConfig) -> Result<f64> {
        self.fractal(x, y, config.base_frequency, config.octaves)
    }

    // --- Internal helpers ---

    /// Cell containing (x, y), or `OutsideLattice`.
    #[inline]
    fn cell_of(&self, x: f64, y: f64) -> Result<(usize, usize)> {
        let w = self.field.cells_x();
        let h = self.field.cells_y();
        // The negated form also rejects NaN.
        if !(x >= 0.0 && y >= 0.0 && x < w as f64 && y < h as f64) {
            return Err(Error::OutsideLattice { x, y, width: w, height: h });
        }
        Ok((x.floor() as usize, y.floor() as usize))
    }
}
