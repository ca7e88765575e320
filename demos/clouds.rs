// demos/clouds.rs
//
// Render the clouds wallpaper and show it in a window.
// Run with: cargo run --release --example clouds [seed]
//
// Keys: Space = new seed, Esc/Q = quit.
// Without a seed argument the first image is seeded from the clock.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::env;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use wallnoise::paint::{self, shade};
use wallnoise::{Canvas, FractalConfig, NoiseEngine, RgbCanvas};

const WIDTH: usize = 960;
const HEIGHT: usize = 540;

fn main() {
    let mut seed: u64 = match env::args().nth(1) {
        Some(s) => s.parse().expect("seed must be an unsigned integer"),
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };

    let mut canvas: RgbCanvas = Canvas::new(WIDTH, HEIGHT).expect("canvas allocation");
    let mut engine = NoiseEngine::for_canvas(&canvas).expect("engine allocation");
    let mut fb = vec![0u32; WIDTH * HEIGHT];

    let mut window = Window::new(
        "wallnoise - clouds (Space: reseed, Esc: quit)",
        WIDTH,
        HEIGHT,
        WindowOptions::default(),
    )
    .expect("failed to open window");
    window.set_target_fps(30);

    let mut dirty = true;
    while window.is_open() && !window.is_key_down(Key::Escape) && !window.is_key_down(Key::Q) {
        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            seed = seed.wrapping_add(1);
            dirty = true;
        }

        if dirty {
            let t0 = Instant::now();
            render(&mut canvas, &mut engine, seed);
            blit(&canvas, &mut fb);
            println!("seed {seed}: rendered {WIDTH}x{HEIGHT} in {:.1?}", t0.elapsed());
            dirty = false;
        }

        window
            .update_with_buffer(&fb, WIDTH, HEIGHT)
            .expect("window update failed");
    }
}

/// One clouds image: random base frequency in [0.003, 0.005], 7 octaves.
fn render(canvas: &mut RgbCanvas, engine: &mut NoiseEngine, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    engine.seed_gradients(&mut rng);
    let frequency = 0.003 + 0.002 * rng.gen::<u8>() as f64 / 255.0;
    let config = FractalConfig::new(frequency, 7).expect("valid config");
    shade(canvas, engine, &config, paint::clouds).expect("clouds pass");
}

/// Pack the canvas into minifb's 0x00RRGGBB framebuffer.
fn blit(canvas: &RgbCanvas, fb: &mut [u32]) {
    for (px, [r, g, b]) in fb.iter_mut().zip(canvas.pixels().map(|(_, _, rgb)| rgb)) {
        *px = ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
    }
}
