// The population of eyes and the operations the event loop drives it with.
//
// Mutation rules: the eye list only changes inside `spawn` and `tick`.
// The render pass and pointer retargeting never add or remove eyes, so a
// frame can interleave with either without seeing a half-applied change.

use rand::Rng;

use crate::draw::Canvas;
use crate::eye::{Eye, EyeSettings};
use crate::types::Viewport;

/// Chance per ~16 ms logic tick that a steady-open eye blinks on its own.
const SPONTANEOUS_BLINK_CHANCE: f64 = 0.01;

pub struct Scene {
    eyes: Vec<Eye>,
    viewport: Viewport,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self { eyes: Vec::new(), viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize handler. Existing eyes keep their positions even if the
    /// window shrank around them; only future spawns see the new bounds.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
    }

    pub fn eyes(&self) -> &[Eye] {
        &self.eyes
    }

    /// Add an eye at `now`. Any existing eye overlapping the newcomer
    /// (center distance under the sum of the two sizes) is closed for
    /// good; the new eye always wins the spot.
    pub fn spawn<R: Rng + ?Sized>(&mut self, settings: EyeSettings, now: f64, rng: &mut R) {
        let eye = Eye::new(settings, self.viewport, now, rng);
        for other in &mut self.eyes {
            let distance = (other.x - eye.x).hypot(other.y - eye.y);
            if distance < other.size + eye.size {
                other.close(now);
            }
        }
        self.eyes.push(eye);
    }

    /// One fixed-rate logic step: advance every blink, drop eyes whose
    /// closing blink finished, and roll the spontaneous-blink trial for
    /// eyes that end the step steady open.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) {
        self.eyes.retain_mut(|eye| {
            if !eye.tick(now, rng) {
                return false;
            }
            if eye.is_open() && rng.gen_range(0.0..1.0) <= SPONTANEOUS_BLINK_CHANCE {
                eye.blink(now);
            }
            true
        });
    }

    /// Pointer moved: every pupil re-aims at the new position. Runs on the
    /// event cadence, independent of tick and render.
    pub fn retarget(&mut self, x: f64, y: f64) {
        let viewport = self.viewport;
        for eye in &mut self.eyes {
            eye.look_toward(x, y, viewport);
        }
    }

    /// Render pass: wipe the off-screen canvas and paint every eye in
    /// insertion order. The caller blits the finished canvas to the window
    /// in one piece so no partial frame is ever visible.
    pub fn draw(&self, canvas: &mut Canvas, pupil_color: u32) {
        canvas.clear();
        for eye in &self.eyes {
            eye.draw(canvas, pupil_color);
        }
    }
}
