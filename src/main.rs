// A window full of cartoon eyes.
// • Every eye blinks on its own randomized timer.
// • Move the mouse: every pupil follows it.
// • Left-click: a new eye spawns there; anything it overlaps blinks shut
//   for good.
// • ESC or closing the window quits.

mod color;
mod draw;
mod easing;
mod error;
mod eye;
mod scene;
mod types;

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use draw::{Canvas, Drawer};
use error::Error;
use eye::EyeSettings;
use scene::Scene;
use types::{FrameBuffer, Viewport};

const WIDTH: usize = 960;
const HEIGHT: usize = 600;

/// Logic cadence (~60 ticks per second). Rendering runs on the display
/// cadence and is not phase-locked to this.
const TICK_MS: f64 = 16.0;

fn main() -> Result<(), Error> {
    let mut rng = SmallRng::from_entropy();
    let mut drawer = Drawer::new("Eyeballs — click to spawn", WIDTH, HEIGHT)?;
    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    let mut screen = FrameBuffer::new(WIDTH, HEIGHT);

    // One backdrop hue per run; pupils are punched through in this color.
    let background = color::random_background(&mut rng);

    let clock = Instant::now();
    let now_ms = |clock: &Instant| clock.elapsed().as_secs_f64() * 1000.0;

    let mut scene = Scene::new(Viewport { width: WIDTH as f64, height: HEIGHT as f64 });
    scene.spawn(
        EyeSettings {
            x: Some(WIDTH as f64 / 2.0),
            y: Some(HEIGHT as f64 / 2.0),
            size: Some(80.0),
            pointiness: Some(50.0),
            wideness: Some(80.0),
        },
        now_ms(&clock),
        &mut rng,
    );

    let mut last_tick = now_ms(&clock);
    let mut last_mouse: Option<(f32, f32)> = None;

    // FPS bookkeeping, printed to the terminal once per second.
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    while drawer.is_open() && !drawer.esc_pressed() {
        let now = now_ms(&clock);

        /* 1) Resize: adopt the new bounds and reallocate both buffers.
           Existing eyes keep their positions. */
        let (w, h) = drawer.size();
        if w > 0 && h > 0 && (w, h) != (screen.width, screen.height) {
            canvas = Canvas::new(w, h);
            screen = FrameBuffer::new(w, h);
            scene.set_viewport(w as f64, h as f64);
        }

        /* 2) Pointer: retarget pupils on movement, spawn on click. Both
           run on the event cadence, outside the logic tick. */
        if let Some((mx, my)) = drawer.mouse_pos() {
            if last_mouse != Some((mx, my)) {
                scene.retarget(mx as f64, my as f64);
                last_mouse = Some((mx, my));
            }
            if drawer.left_click_once() {
                scene.spawn(EyeSettings::at(mx as f64, my as f64), now, &mut rng);
            }
        }

        /* 3) Fixed-rate logic: run 0..n ticks depending on how long the
           last frame took. After a long stall (window drag, etc.) skip
           ahead instead of replaying every missed tick. */
        if now - last_tick > 500.0 {
            last_tick = now - TICK_MS;
        }
        while now - last_tick >= TICK_MS {
            scene.tick(now, &mut rng);
            last_tick += TICK_MS;
        }

        /* 4) Render into the off-screen canvas, then present the whole
           frame at once so no partially drawn eye is ever visible. */
        scene.draw(&mut canvas, background);
        canvas.blit_onto(&mut screen, background);
        drawer.present(&screen)?;

        frames_this_second += 1;
        if last_fps_time.elapsed() >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / last_fps_time.elapsed().as_secs_f32();
            println!("FPS: {:.1} | eyes: {}", fps, scene.eyes().len());
            frames_this_second = 0;
            last_fps_time = Instant::now();
        }
    }

    Ok(())
}
