// paint.rs — Turning noise values into pixels.
//
// The generator loop is always the same shape: for every pixel, query
// fractal noise at the pixel coordinate, map the scalar through a color
// function, write RGB. `shade` runs that loop; the other functions here are
// the small value mappings the wallpapers share.

use crate::canvas::{Canvas, Sample};
use crate::error::Result;
use crate::fractal::FractalConfig;
use crate::noise::NoiseEngine;

/// Map a noise value from roughly `[-1, 1]` onto roughly `[0, 1]`.
#[inline]
pub fn to_unit(noise: f64) -> f64 {
    0.5 * noise + 0.5
}

/// Contrast curve with a soft knee, output in `(-1, 1)`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    ((2.0 * x - 0.5).tanh() * 2.0).tanh()
}

/// Equal-channel grey for a noise value.
#[inline]
pub fn grey<T: Sample>(noise: f64) -> [T; 3] {
    let v = T::from_unit(to_unit(noise));
    [v, v, v]
}

/// Sky-blue to white ramp of the clouds wallpaper.
pub fn clouds(noise: f64) -> [u8; 3] {
    let v = to_unit(sigmoid(noise));
    [(v * 230.0) as u8 + 25, (v * 255.0) as u8, 255]
}

/// Evaluate fractal noise at every pixel of `canvas` and write `color(value)`.
///
/// Rows are visited top to bottom. The first noise error aborts the pass,
/// leaving rows already written in place.
pub fn shade<T, F>(
    canvas: &mut Canvas<T>,
    engine: &NoiseEngine,
    config: &FractalConfig,
    mut color: F,
) -> Result<()>
where
    T: Sample,
    F: FnMut(f64) -> [T; 3],
{
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let value = engine.fractal_with(x as f64, y as f64, config)?;
            canvas.set_rgb(x, y, color(value))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::FnSource;

    #[test]
    fn test_to_unit() {
        assert_eq!(to_unit(-1.0), 0.0);
        assert_eq!(to_unit(0.0), 0.5);
        assert_eq!(to_unit(1.0), 1.0);
    }

    #[test]
    fn test_sigmoid_bounded_and_monotonic() {
        let mut prev = sigmoid(-3.0);
        for i in -29..=30 {
            let v = sigmoid(i as f64 / 10.0);
            assert!(v > -1.0 && v < 1.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_clouds_palette_range() {
        for i in -20..=20 {
            let [r, g, b] = clouds(i as f64 / 10.0);
            assert!(r >= 25);
            assert!(r as u16 >= g as u16 * 230 / 255);
            assert_eq!(b, 255);
        }
    }

    #[test]
    fn test_shade_zero_octaves_is_flat() {
        let mut canvas: Canvas<u16> = Canvas::new(5, 4).unwrap();
        let mut engine = NoiseEngine::for_canvas(&canvas).unwrap();
        engine.seed_gradients(&mut FnSource(|| 7));
        let cfg = FractalConfig::new(0.1, 0).unwrap();
        shade(&mut canvas, &engine, &cfg, grey::<u16>).unwrap();
        let mid = u16::from_unit(0.5);
        assert!(canvas.pixels().all(|(_, _, px)| px == [mid; 3]));
    }

    #[test]
    fn test_shade_propagates_lattice_error() {
        let mut canvas: Canvas<u8> = Canvas::new(8, 8).unwrap();
        let mut engine = NoiseEngine::new(2, 2).unwrap();
        engine.seed_gradients(&mut FnSource(|| 3));
        // Pixel (2, 0) at frequency 1 lies outside a 2×2 lattice.
        let cfg = FractalConfig::new(1.0, 1).unwrap();
        assert!(shade(&mut canvas, &engine, &cfg, clouds).is_err());
    }
}
