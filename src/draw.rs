// Window + software drawing utilities.
// Two halves:
// 1) `Drawer` wraps the minifb window: present a pixel buffer, poll the
//    mouse, notice clicks and resizes.
// 2) `Canvas` is the off-screen surface the eyes are painted into. It
//    carries an alpha bit per pixel so a "source atop" composite mode can
//    restrict a fill to pixels something already painted, the trick that
//    keeps pupils inside the eyelid shape. The finished canvas is blitted
//    over the backdrop color in one pass (double buffering).

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,     // the on-screen window you see
    was_left_down: bool, // previous left-button state, for click edges
}

impl Drawer {
    /// Open a resizable window capped at the display rate.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, was_left_down: false })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current inner size; changes when the user drags the window edges.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Clamp)
    }

    /// True exactly once per left-button press (edge, not level).
    pub fn left_click_once(&mut self) -> bool {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let clicked = down && !self.was_left_down;
        self.was_left_down = down;
        clicked
    }
}

/* ---------- Software drawing: the off-screen eye canvas ---------- */

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Paint everywhere inside the shape.
    Normal,
    /// Paint only where the canvas already has an opaque pixel.
    SourceAtop,
}

/// One cubic bezier leg of a closed outline: two control points and an
/// endpoint; the start point is wherever the previous leg ended.
#[derive(Clone, Copy)]
pub struct CurveSegment {
    pub c1: (f64, f64),
    pub c2: (f64, f64),
    pub to: (f64, f64),
}

/// How finely each bezier leg is flattened before scanline filling.
const CURVE_STEPS: usize = 24;

pub struct Canvas {
    pub width: usize,
    pub height: usize,
    /// 0xAARRGGBB; alpha is all-or-nothing (0 = untouched this frame).
    pub pixels: Vec<u32>,
    mode: CompositeMode,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u32; width * height],
            mode: CompositeMode::Normal,
        }
    }

    /// Wipe the whole canvas back to untouched (fully transparent).
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.mode = CompositeMode::Normal;
    }

    pub fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    /// Stamp one pixel, honoring bounds and the current composite mode.
    #[inline]
    fn put(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        if self.mode == CompositeMode::SourceAtop && self.pixels[idx] >> 24 == 0 {
            return;
        }
        self.pixels[idx] = 0xFF00_0000 | (color & 0x00FF_FFFF);
    }

    /// Fill a solid disc centered at (cx, cy).
    /// Visual: a filled circle; under SourceAtop only the part overlapping
    /// earlier paint shows up.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: u32) {
        if radius <= 0.0 {
            return;
        }
        let r = radius.ceil() as i32;
        let (cxi, cyi) = (cx.round() as i32, cy.round() as i32);
        let r2 = radius * radius;

        // Scan just the bounding box (fast enough for small radii)
        for y in (cyi - r)..=(cyi + r) {
            for x in (cxi - r)..=(cxi + r) {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Fill a closed outline made of cubic bezier legs starting at `start`.
    /// The legs are flattened to a polygon, then scanline-filled.
    pub fn fill_closed_curve(&mut self, start: (f64, f64), legs: &[CurveSegment], color: u32) {
        let mut outline = Vec::with_capacity(legs.len() * CURVE_STEPS + 1);
        outline.push(start);
        for leg in legs {
            let from = *outline.last().unwrap();
            for i in 1..=CURVE_STEPS {
                let t = i as f64 / CURVE_STEPS as f64;
                outline.push(cubic_point(from, leg.c1, leg.c2, leg.to, t));
            }
        }
        self.fill_polygon(&outline, color);
    }

    // Even-odd scanline fill. Each scanline is tested at pixel-center
    // height, so a fully flat outline (blink_state == 0) fills nothing.
    fn fill_polygon(&mut self, outline: &[(f64, f64)], color: u32) {
        if outline.len() < 3 {
            return;
        }
        let min_y = outline.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = outline.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let y_first = (min_y.floor() as i32).max(0);
        let y_last = (max_y.ceil() as i32).min(self.height as i32 - 1);

        let mut hits: Vec<f64> = Vec::new();
        for y in y_first..=y_last {
            let scan = y as f64 + 0.5;
            hits.clear();
            for i in 0..outline.len() {
                let (xa, ya) = outline[i];
                let (xb, yb) = outline[(i + 1) % outline.len()];
                if (ya <= scan && yb > scan) || (yb <= scan && ya > scan) {
                    let t = (scan - ya) / (yb - ya);
                    hits.push(xa + t * (xb - xa));
                }
            }
            hits.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in hits.chunks_exact(2) {
                let left = pair[0].round() as i32;
                let right = pair[1].round() as i32;
                for x in left..=right {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Copy the finished frame onto the visible buffer in one pass:
    /// painted pixels keep their color, untouched pixels get the backdrop.
    pub fn blit_onto(&self, fb: &mut FrameBuffer, background: u32) {
        debug_assert_eq!(self.pixels.len(), fb.pixels.len());
        for (dst, src) in fb.pixels.iter_mut().zip(&self.pixels) {
            *dst = if src >> 24 != 0 { src & 0x00FF_FFFF } else { background };
        }
    }
}

/// Point on a cubic bezier at parameter t in [0, 1].
fn cubic_point(
    from: (f64, f64),
    c1: (f64, f64),
    c2: (f64, f64),
    to: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        b0 * from.0 + b1 * c1.0 + b2 * c2.0 + b3 * to.0,
        b0 * from.1 + b1 * c1.1 + b2 * c2.1 + b3 * to.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: u32 = 0x00FFFFFF;
    const BLUE: u32 = 0x000000FF;

    fn pixel(canvas: &Canvas, x: usize, y: usize) -> u32 {
        canvas.pixels[y * canvas.width + x]
    }

    #[test]
    fn circle_fills_center_and_respects_radius() {
        let mut canvas = Canvas::new(100, 100);
        canvas.fill_circle(50.0, 50.0, 10.0, WHITE);
        assert_eq!(pixel(&canvas, 50, 50), 0xFF00_0000 | WHITE);
        assert_eq!(pixel(&canvas, 50, 41), 0xFF00_0000 | WHITE);
        // Outside the radius: untouched.
        assert_eq!(pixel(&canvas, 50, 38), 0);
        assert_eq!(pixel(&canvas, 70, 70), 0);
    }

    #[test]
    fn drawing_off_canvas_is_harmless() {
        let mut canvas = Canvas::new(32, 32);
        canvas.fill_circle(-5.0, -5.0, 10.0, WHITE);
        canvas.fill_circle(40.0, 16.0, 20.0, WHITE);
        // Clipped stamps still land on the pixels they do cover.
        assert_ne!(pixel(&canvas, 0, 0), 0);
        assert_ne!(pixel(&canvas, 31, 16), 0);
    }

    #[test]
    fn source_atop_paints_only_over_existing_pixels() {
        let mut canvas = Canvas::new(100, 100);
        canvas.fill_circle(40.0, 50.0, 10.0, WHITE);

        canvas.set_composite_mode(CompositeMode::SourceAtop);
        // Straddles the white disc's right edge at x=50.
        canvas.fill_circle(50.0, 50.0, 8.0, BLUE);
        canvas.set_composite_mode(CompositeMode::Normal);

        // Inside the white disc: repainted blue.
        assert_eq!(pixel(&canvas, 46, 50), 0xFF00_0000 | BLUE);
        // Outside it: the atop fill did not land.
        assert_eq!(pixel(&canvas, 55, 50), 0);
    }

    #[test]
    fn closed_curve_fills_a_lens_shape() {
        let mut canvas = Canvas::new(200, 120);
        // A symmetric almond from (20,60) to (180,60), bulging 30px.
        canvas.fill_closed_curve(
            (20.0, 60.0),
            &[
                CurveSegment { c1: (60.0, 30.0), c2: (140.0, 30.0), to: (180.0, 60.0) },
                CurveSegment { c1: (140.0, 90.0), c2: (60.0, 90.0), to: (20.0, 60.0) },
            ],
            WHITE,
        );
        // Solid through the middle...
        assert_ne!(pixel(&canvas, 100, 60), 0);
        assert_ne!(pixel(&canvas, 100, 45), 0);
        assert_ne!(pixel(&canvas, 100, 75), 0);
        // ...empty above/below the bulge and past the tips.
        assert_eq!(pixel(&canvas, 100, 20), 0);
        assert_eq!(pixel(&canvas, 100, 100), 0);
        assert_eq!(pixel(&canvas, 10, 60), 0);
        assert_eq!(pixel(&canvas, 190, 60), 0);
    }

    #[test]
    fn flat_outline_fills_nothing() {
        let mut canvas = Canvas::new(200, 120);
        // Zero vertical extent, i.e. an eyelid at blink_state == 0.
        canvas.fill_closed_curve(
            (20.0, 60.0),
            &[
                CurveSegment { c1: (60.0, 60.0), c2: (140.0, 60.0), to: (180.0, 60.0) },
                CurveSegment { c1: (140.0, 60.0), c2: (60.0, 60.0), to: (20.0, 60.0) },
            ],
            WHITE,
        );
        assert!(canvas.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn blit_paints_backdrop_behind_the_shapes() {
        let mut canvas = Canvas::new(16, 16);
        let mut fb = FrameBuffer::new(16, 16);
        canvas.fill_circle(8.0, 8.0, 3.0, WHITE);
        canvas.blit_onto(&mut fb, 0x00123456);
        assert_eq!(fb.pixels[8 * 16 + 8], WHITE);
        assert_eq!(fb.pixels[0], 0x00123456);
        // The visible buffer carries plain 0x00RRGGBB, no alpha bits.
        assert!(fb.pixels.iter().all(|&p| p >> 24 == 0));
    }

    #[test]
    fn clear_resets_pixels_and_mode() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_circle(4.0, 4.0, 2.0, WHITE);
        canvas.set_composite_mode(CompositeMode::SourceAtop);
        canvas.clear();
        assert!(canvas.pixels.iter().all(|&p| p == 0));
        // A fresh frame paints normally again.
        canvas.fill_circle(4.0, 4.0, 2.0, WHITE);
        assert_ne!(pixel(&canvas, 4, 4), 0);
    }
}
