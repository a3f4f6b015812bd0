// Drag with the left mouse button inside DRAW. On release both noise fields
// are reseeded, their dot grids redrawn and the stroke re-synthesized.
// Double click resets the stroke, S saves a PNG snapshot, Esc quits.

use std::time::Instant;
use anyhow::{anyhow, Result};
use cgmath::Point2;
use log::info;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use noise_sketch::canvas::FrameBuffer;
use noise_sketch::config::ISketch;
use noise_sketch::painter;

fn main() -> Result<()> {
    env_logger::init();
    let cfg = ISketch::from_args(std::env::args().skip(1))?;
    let layout = cfg.layout();
    let mut session = cfg.session(&layout)?;
    let mut clicks = cfg.click_timer();

    let (width, height) = layout.canvas_size();
    let mut window = Window::new("noise sketch", width, height, WindowOptions::default())
        .map_err(|e| anyhow!("window init: {e}"))?;
    window.set_target_fps(60);
    info!("canvas {}x{}, gap {}, perlin seed {}", width, height, cfg.gap, cfg.perlin_seed);

    let mut fb = FrameBuffer::new(width, height);
    let mut frame = None;
    let mut was_down = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mouse = window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point2::new(x as f64, y as f64));
        let down = window.get_mouse_down(MouseButton::Left);

        match (was_down, down, mouse) {
            (false, true, Some(p)) => {
                if let Some(f) = session.press(p, Instant::now(), &mut clicks) {
                    frame = Some(f);
                }
            }
            (true, true, Some(p)) => session.pointer_move(p),
            (true, false, _) => {
                if let Some(f) = session.pointer_up() {
                    frame = Some(f);
                }
            }
            _ => {}
        }
        was_down = down;

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            fb.save_png(&cfg.snapshot_path)?;
        }

        painter::paint(&mut fb, &layout, session.stroke(), frame.as_ref());
        window
            .update_with_buffer(&fb.pixels, fb.width, fb.height)
            .map_err(|e| anyhow!("window update: {e}"))?;
    }

    Ok(())
}
