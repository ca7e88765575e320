// fractal.rs — Multi-octave (fBm) composition of gradient noise.
//
// Each octave doubles the spatial frequency and halves the contribution:
//
//   fractal(x, y, f, d) = noise(x·f, y·f) + fractal(x, y, 2f, d − 1) / 2
//   fractal(x, y, f, 0) = 0
//
// `accumulate` samples the octaves from the lowest frequency up, stopping at
// the first failure exactly where the recursion would, then folds them from
// the highest octave down. That is the recursion's own order of float
// operations, so results are bit-identical without the call depth.

use crate::error::{Error, Result};

/// Most octaves a fractal pass may sum. Beyond ~50 octaves the frequency has
/// left any lattice anyway.
pub const MAX_OCTAVES: u32 = 32;

/// Octave parameters for a fractal noise pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalConfig {
    /// Frequency of the first octave, in lattice cells per pixel.
    pub base_frequency: f64,
    /// Number of octaves summed. Zero yields a constant-zero field.
    pub octaves: u32,
}

impl Default for FractalConfig {
    /// The island/cloud settings: broad shapes with seven layers of detail.
    fn default() -> Self {
        FractalConfig {
            base_frequency: 0.004,
            octaves: 7,
        }
    }
}

impl FractalConfig {
    /// Validated constructor.
    pub fn new(base_frequency: f64, octaves: u32) -> Result<Self> {
        if !(base_frequency.is_finite() && base_frequency > 0.0) {
            return Err(Error::InvalidConfig("base_frequency must be positive and finite"));
        }
        if octaves > MAX_OCTAVES {
            return Err(Error::InvalidConfig("octaves exceeds MAX_OCTAVES"));
        }
        Ok(FractalConfig {
            base_frequency,
            octaves,
        })
    }

    /// Frequency of the highest octave, `base · 2^(octaves − 1)`.
    pub fn top_frequency(&self) -> f64 {
        top_frequency(self.base_frequency, self.octaves)
    }
}

fn top_frequency(base: f64, octaves: u32) -> f64 {
    let mut f = base;
    for _ in 1..octaves {
        f *= 2.0;
    }
    f
}

/// Sum `octaves` evaluations of `noise`, persistence 0.5, lacunarity 2.
///
/// `noise` receives already-scaled coordinates. The first error stops the
/// pass. More than `MAX_OCTAVES` octaves is `InvalidConfig`.
pub(crate) fn accumulate<F>(x: f64, y: f64, base_frequency: f64, octaves: u32, mut noise: F) -> Result<f64>
where
    F: FnMut(f64, f64) -> Result<f64>,
{
    if octaves > MAX_OCTAVES {
        return Err(Error::InvalidConfig("octaves exceeds MAX_OCTAVES"));
    }
    let mut buf = [0.0f64; MAX_OCTAVES as usize];
    let layers = &mut buf[..octaves as usize];
    let mut frequency = base_frequency;
    for layer in layers.iter_mut() {
        *layer = noise(x * frequency, y * frequency)?;
        frequency *= 2.0;
    }
    Ok(layers.iter().rev().fold(0.0, |acc, &s| s + acc / 2.0))
}
