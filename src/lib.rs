// wallnoise: pixel canvas and coherent noise for procedural wallpapers
//
// A generator owns one `Canvas` and one `NoiseEngine` sized to it, seeds the
// engine from a random source, then fills the canvas from fractal noise
// values. Nothing here is global; independent generators can run on separate
// threads with their own canvas and engine.

pub mod error;
pub mod canvas;
pub mod lattice;
pub mod noise;
pub mod fractal;
pub mod paint;

pub use canvas::{Canvas, Channel, RgbCanvas, Sample};
pub use error::{AllocationFailure, Error, Result};
pub use fractal::FractalConfig;
pub use lattice::{FnSource, GradientSource};
pub use noise::NoiseEngine;
