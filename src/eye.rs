// One cartoon eye: an eyelid outline whose aperture follows a blink curve,
// a pupil that trails the pointer, and a fixed highlight.
//
// The blink state machine has three shapes:
// - steady open: `blink_start` is None, `blink_state` pinned to 1.
// - blinking: `blink_start` is Some; `blink_state` is recomputed from the
//   curve every tick and snaps back to steady open once it overshoots 1.
// - closing for good: same as blinking but `marked_for_removal` is set;
//   the eye is dropped at the low point of the curve, before it would
//   reopen.

use rand::Rng;

use crate::draw::{Canvas, CompositeMode, CurveSegment};
use crate::easing::ease_in_out_quart;
use crate::types::Viewport;

const WHITE: u32 = 0x00FFFFFF;

/// Where the white glint sits, relative to the socket center.
const HIGHLIGHT_ANGLE: f64 = -0.6;
const HIGHLIGHT_RADIUS: f64 = 8.0;

/// How far the pupil may wander from center, as a fraction of `size`.
const PUPIL_TRAVEL: f64 = 0.62;

/// Openness below this counts as "closed enough" to remove a closing eye.
const REMOVAL_THRESHOLD: f64 = 0.1;

/// Optional construction overrides; anything left None is randomized.
#[derive(Clone, Copy, Default)]
pub struct EyeSettings {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub size: Option<f64>,
    pub pointiness: Option<f64>,
    pub wideness: Option<f64>,
}

impl EyeSettings {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }
}

pub struct Eye {
    // Socket center, clamped at creation so the whole shape fits on screen.
    pub x: f64,
    pub y: f64,
    /// Overall scale; also the vertical half-extent at full openness.
    pub size: f64,
    /// Horizontal inset of the bezier control points (sharper corners when small).
    pub pointiness: f64,
    /// Horizontal half-extent of the eyelid outline.
    pub wideness: f64,
    pub max_height: f64,

    pub pupil_x: f64,
    pub pupil_y: f64,
    pub pupil_radius: f64,

    /// Eyelid aperture: 1 = fully open, 0 = fully closed. Overshoots 1
    /// transiently at the end of a blink; that is the reopen signal.
    pub blink_state: f64,
    /// Timestamp (ms) the current blink began, or None when steady open.
    pub blink_start: Option<f64>,
    /// Duration (ms) of the current blink, re-rolled on every reopen.
    pub blink_speed: f64,
    /// Once set, the eye is dropped as soon as its blink reaches near-closed.
    pub marked_for_removal: bool,
}

/// Integer draw in [min, max], both inclusive (floats floored/ceiled first).
fn rand_int<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen_range(min.ceil() as i64..=max.floor() as i64) as f64
}

impl Eye {
    /// Build an eye at `now`, clamped into the viewport. The blink timer is
    /// pre-seeded 80% of the way through a blink with `blink_state` forced
    /// to 0, so a new eye pops open instead of appearing instantaneously.
    pub fn new<R: Rng + ?Sized>(
        settings: EyeSettings,
        viewport: Viewport,
        now: f64,
        rng: &mut R,
    ) -> Self {
        let size = settings.size.unwrap_or_else(|| rand_int(rng, 40.0, 120.0));
        let mut x = settings
            .x
            .unwrap_or_else(|| rng.gen_range(0.0..viewport.width).floor());
        let mut y = settings
            .y
            .unwrap_or_else(|| rng.gen_range(0.0..viewport.height).floor());
        let pointiness = settings
            .pointiness
            .unwrap_or_else(|| rand_int(rng, size / 2.0, size));
        let wideness = settings
            .wideness
            .unwrap_or_else(|| rand_int(rng, size / 2.0, size));
        let max_height = size;
        let blink_speed = rand_int(rng, 200.0, 800.0);

        // Make sure it sits inside the viewport.
        if x - size < 0.0 {
            x = size;
        }
        if x + size > viewport.width {
            x = viewport.width - size;
        }
        if y - max_height < 0.0 {
            y = max_height;
        }
        if y + max_height > viewport.height {
            y = viewport.height - max_height;
        }

        Self {
            x,
            y,
            size,
            pointiness,
            wideness,
            max_height,
            pupil_x: x,
            pupil_y: y,
            pupil_radius: rand_int(rng, 10.0, 20.0),
            blink_state: 0.0,
            blink_start: Some(now - blink_speed * 0.8),
            blink_speed,
            marked_for_removal: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.blink_start.is_none()
    }

    /// Start (or restart) a blink at `now`.
    pub fn blink(&mut self, now: f64) {
        self.blink_start = Some(now);
    }

    /// Close the eye for good: it blinks shut from wherever it is and never
    /// reopens; the population drops it near the low point of the curve.
    pub fn close(&mut self, now: f64) {
        self.blink(now);
        self.marked_for_removal = true;
    }

    /// Back to steady open with a fresh speed for the next blink.
    fn reopen<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.blink_speed = rand_int(rng, 200.0, 800.0);
        self.blink_start = None;
        self.blink_state = 1.0;
    }

    /// Advance the blink state machine to `now`. Returns false once the eye
    /// should be removed from the population.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> bool {
        let Some(start) = self.blink_start else {
            // Steady open: the aperture is pinned, not animated.
            if self.blink_state != 1.0 {
                self.blink_state = 1.0;
            }
            return true;
        };
        self.blink_state = ease_in_out_quart(now - start, 1.0, -1.0, self.blink_speed);
        if self.blink_state <= REMOVAL_THRESHOLD && self.marked_for_removal {
            // Dropped at the low point, before the curve would reopen.
            return false;
        }
        if self.blink_state > 1.0 {
            // Curve overshot the end of the animation: the reopen finished.
            self.reopen(rng);
        }
        true
    }

    /// Aim the pupil at `(tx, ty)`. The offset direction is the angle from
    /// center to target; its magnitude is the target distance normalized by
    /// the larger viewport dimension, saturating at `size * 0.62` so the
    /// pupil never escapes the socket even for far-away pointers.
    pub fn look_toward(&mut self, tx: f64, ty: f64, viewport: Viewport) {
        let angle = (ty - self.y).atan2(tx - self.x);
        let reach = (tx - self.x).hypot(ty - self.y) / viewport.width.max(viewport.height);
        let offset = self.size * PUPIL_TRAVEL * reach.min(1.0);
        self.pupil_x = self.x + angle.cos() * offset;
        self.pupil_y = self.y + angle.sin() * offset;
    }

    /// Paint this eye into the off-screen canvas.
    /// Visual: a white almond shape whose height tracks the blink, a pupil
    /// in the backdrop color clipped to the almond, and a white glint.
    pub fn draw(&self, canvas: &mut Canvas, pupil_color: u32) {
        let aperture = (self.max_height * self.blink_state).floor();

        let x_start = self.x - self.wideness;
        let x_end = self.x + self.wideness;
        let y_up = self.y - aperture;
        let y_down = self.y + aperture;
        let cp_start = self.x - self.max_height + self.pointiness;
        let cp_end = self.x + self.max_height - self.pointiness;

        // Eyelid outline: two mirrored cubic beziers, upper arc then lower.
        canvas.fill_closed_curve(
            (x_start, self.y),
            &[
                CurveSegment { c1: (cp_start, y_up), c2: (cp_end, y_up), to: (x_end, self.y) },
                CurveSegment { c1: (cp_end, y_down), c2: (cp_start, y_down), to: (x_start, self.y) },
            ],
            WHITE,
        );

        // Pupil only paints atop pixels the eyelid already covered, so it
        // reads as a hole showing the backdrop. Not scaled by openness.
        canvas.set_composite_mode(CompositeMode::SourceAtop);
        canvas.fill_circle(self.pupil_x, self.pupil_y, self.pupil_radius, pupil_color);
        canvas.set_composite_mode(CompositeMode::Normal);

        canvas.fill_circle(
            self.x + HIGHLIGHT_ANGLE.cos() * self.size / 2.0,
            self.y + HIGHLIGHT_ANGLE.sin() * self.size / 2.0,
            HIGHLIGHT_RADIUS,
            WHITE,
        );
    }
}
