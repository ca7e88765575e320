// canvas.rs — Fixed-size RGB pixel store, generic over sample bit depth.
//
// Memory layout (width = 3, interleaved RGB, row-major):
//
//   data index:  0 1 2 | 3 4 5 | 6 7 8 | 9 ...
//   sample:      R G B | R G B | R G B | R ...
//   pixel:      (0,0)   (1,0)   (2,0)   (0,1)
//
// The flat buffer is exactly what a PPM/PNG encoder wants, so `raw_view()`
// hands it out unchanged. There is no stride padding.
//
// Every accessor returns a `Result`. Out-of-range coordinates are reported,
// never clamped or wrapped.

use std::fmt;

use log::debug;

use crate::error::{try_alloc, Error, Result};

/// Number of color channels per pixel.
pub const CHANNELS: usize = 3;

// ---------------------------------------------------------------------------
// Sample Trait
// ---------------------------------------------------------------------------

/// An unsigned, fixed-width color sample. The bit depth of a canvas is the
/// width of its sample type.
pub trait Sample: Copy + Default + Send + Sync + PartialOrd + fmt::Debug + 'static {
    /// Largest representable value (255 for 8-bit).
    const MAX: Self;

    /// Map `v` in `[0, 1]` onto `[0, MAX]`, clamping out-of-range input.
    fn from_unit(v: f64) -> Self;
}

impl Sample for u8 {
    const MAX: Self = u8::MAX;

    #[inline]
    fn from_unit(v: f64) -> Self {
        // NaN survives `clamp`; the `as` cast maps it to 0.
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl Sample for u16 {
    const MAX: Self = u16::MAX;

    #[inline]
    fn from_unit(v: f64) -> Self {
        (v.clamp(0.0, 1.0) * 65535.0).round() as u16
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    /// Offset of this channel inside an interleaved pixel.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Canvas<T>
// ---------------------------------------------------------------------------

/// A `width × height` RGB raster with `T` samples per channel.
pub struct Canvas<T: Sample> {
    /// Interleaved samples, row-major. Length = width * height * 3.
    data: Vec<T>,
    width: usize,
    height: usize,
}

/// The common 8-bit canvas.
pub type RgbCanvas = Canvas<u8>;

impl<T: Sample> Clone for Canvas<T> {
    fn clone(&self) -> Self {
        Canvas {
            data: self.data.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Sample> Canvas<T> {
    /// Allocate a zero-filled canvas.
    ///
    /// Fails with `Error::Allocation` when either dimension is zero, when
    /// `width * height * 3` overflows `usize`, or when the allocator refuses.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS));
        let data = try_alloc(len, width, height)?;
        debug!(
            "allocated {width}×{height} canvas ({} samples, {} bits)",
            data.len(),
            std::mem::size_of::<T>() * 8
        );
        Ok(Canvas { data, width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Maximum representable sample value for this canvas's bit depth.
    #[inline]
    pub fn max_sample_value(&self) -> T {
        T::MAX
    }

    /// Read one channel of the pixel at (x, y). x is column, y is row.
    #[inline]
    pub fn get_channel(&self, x: usize, y: usize, channel: Channel) -> Result<T> {
        let base = self.pixel_index(x, y)?;
        Ok(self.data[base + channel.offset()])
    }

    /// Write one channel of the pixel at (x, y).
    #[inline]
    pub fn set_channel(&mut self, x: usize, y: usize, channel: Channel, value: T) -> Result<()> {
        let base = self.pixel_index(x, y)?;
        self.data[base + channel.offset()] = value;
        Ok(())
    }

    /// Read all three channels of the pixel at (x, y) as `[r, g, b]`.
    #[inline]
    pub fn get_rgb(&self, x: usize, y: usize) -> Result<[T; 3]> {
        let base = self.pixel_index(x, y)?;
        Ok([self.data[base], self.data[base + 1], self.data[base + 2]])
    }

    /// Write all three channels of the pixel at (x, y).
    #[inline]
    pub fn set_rgb(&mut self, x: usize, y: usize, rgb: [T; 3]) -> Result<()> {
        let base = self.pixel_index(x, y)?;
        self.data[base..base + CHANNELS].copy_from_slice(&rgb);
        Ok(())
    }

    /// Set every channel of every pixel to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Iterate over all pixels as `(x, y, [r, g, b])`, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, [T; 3])> + '_ {
        let width = self.width;
        self.data
            .chunks_exact(CHANNELS)
            .enumerate()
            .map(move |(i, px)| (i % width, i / width, [px[0], px[1], px[2]]))
    }

    /// The interleaved sample buffer, for handing to an encoder.
    pub fn raw_view(&self) -> &[T] {
        &self.data
    }

    /// Consume the canvas and return its sample buffer.
    pub fn into_raw(self) -> Vec<T> {
        self.data
    }

    // --- Internal helpers ---

    /// Index of the R sample of (x, y), or `OutOfBounds`.
    #[inline]
    fn pixel_index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y * self.width + x) * CHANNELS)
    }
}

// Debug formatting: prints the top-left corner only.
impl<T: Sample> fmt::Debug for Canvas<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Canvas<{}> {{ {}×{} }}",
            std::any::type_name::<T>(),
            self.width,
            self.height,
        )?;
        for y in 0..self.height.min(4) {
            write!(f, "  row {y}: [")?;
            for x in 0..self.width.min(8) {
                if x > 0 {
                    write!(f, ", ")?;
                }
                let base = (y * self.width + x) * CHANNELS;
                write!(f, "{:?}", &self.data[base..base + CHANNELS])?;
            }
            if self.width > 8 {
                write!(f, ", ...")?;
            }
            writeln!(f, "]")?;
        }
        if self.height > 4 {
            writeln!(f, "  ...")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let c: Canvas<u8> = Canvas::new(10, 5).unwrap();
        assert_eq!(c.width(), 10);
        assert_eq!(c.height(), 5);
        assert_eq!(c.raw_view().len(), 10 * 5 * 3);
        assert!(c.raw_view().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_channel_roundtrip() {
        let mut c: Canvas<u8> = Canvas::new(4, 3).unwrap();
        c.set_channel(0, 0, Channel::R, 10).unwrap();
        c.set_channel(3, 2, Channel::B, 255).unwrap();
        c.set_channel(1, 1, Channel::G, 42).unwrap();
        assert_eq!(c.get_channel(0, 0, Channel::R).unwrap(), 10);
        assert_eq!(c.get_channel(3, 2, Channel::B).unwrap(), 255);
        assert_eq!(c.get_channel(1, 1, Channel::G).unwrap(), 42);
        // Neighbouring channels untouched.
        assert_eq!(c.get_channel(0, 0, Channel::G).unwrap(), 0);
        assert_eq!(c.get_channel(1, 1, Channel::R).unwrap(), 0);
    }

    #[test]
    fn test_interleaved_layout() {
        let mut c: Canvas<u8> = Canvas::new(2, 2).unwrap();
        c.set_rgb(1, 0, [1, 2, 3]).unwrap();
        c.set_rgb(0, 1, [4, 5, 6]).unwrap();
        assert_eq!(&c.raw_view()[3..6], &[1, 2, 3]);
        assert_eq!(&c.raw_view()[6..9], &[4, 5, 6]);
    }

    #[test]
    fn test_pixels_iterator_order() {
        let mut c: Canvas<u8> = Canvas::new(3, 2).unwrap();
        c.set_rgb(2, 0, [9, 9, 9]).unwrap();
        let px: Vec<_> = c.pixels().collect();
        assert_eq!(px.len(), 6);
        assert_eq!(px[0], (0, 0, [0, 0, 0]));
        assert_eq!(px[2], (2, 0, [9, 9, 9]));
        assert_eq!(px[3], (0, 1, [0, 0, 0]));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut c: Canvas<u8> = Canvas::new(4, 4).unwrap();
        let err = c.get_channel(4, 0, Channel::R).unwrap_err();
        assert_eq!(err, Error::OutOfBounds { x: 4, y: 0, width: 4, height: 4 });
        assert!(c.set_channel(0, 4, Channel::G, 1).is_err());
        assert!(c.set_rgb(usize::MAX, 0, [0; 3]).is_err());
    }

    #[test]
    fn test_max_sample_value() {
        let c8: Canvas<u8> = Canvas::new(1, 1).unwrap();
        let c16: Canvas<u16> = Canvas::new(1, 1).unwrap();
        assert_eq!(c8.max_sample_value(), 255);
        assert_eq!(c16.max_sample_value(), 65535);
    }

    #[test]
    fn test_from_unit_clamps() {
        assert_eq!(u8::from_unit(-0.5), 0);
        assert_eq!(u8::from_unit(0.5), 128);
        assert_eq!(u8::from_unit(2.0), 255);
        assert_eq!(u8::from_unit(f64::NAN), 0);
        assert_eq!(u16::from_unit(1.0), 65535);
    }

    #[test]
    fn test_zero_extent_rejected() {
        assert!(Canvas::<u8>::new(0, 10).is_err());
        assert!(Canvas::<u8>::new(10, 0).is_err());
    }
}
