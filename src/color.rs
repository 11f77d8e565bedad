// Background color picking. The scene gets one random pastel-ish hue at
// startup; pupils reuse the exact same color so the source-atop composite
// makes them read as holes punched through the white eyelid.

use rand::Rng;

/// Convert HSL (hue in degrees, saturation/lightness in [0,1]) to 0x00RRGGBB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> u32 {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hp = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u32;
    (to_channel(r) << 16) | (to_channel(g) << 8) | to_channel(b)
}

/// Roll the backdrop for this run: hsl(hue, 52.3%, 58%) with a random hue.
pub fn random_background<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let hue = rng.gen_range(0..=255) as f64;
    hsl_to_rgb(hue, 0.523, 0.58)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), 0x00FF0000);
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), 0x0000FF00);
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), 0x000000FF);
    }

    #[test]
    fn grays_ignore_hue() {
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), 0x00FFFFFF);
        assert_eq!(hsl_to_rgb(213.0, 0.0, 0.0), 0x00000000);
        assert_eq!(hsl_to_rgb(42.0, 0.0, 0.5), 0x00808080);
    }

    #[test]
    fn background_is_never_white() {
        // White is the eyelid color; the backdrop must stay distinguishable
        // or the atop-composited pupils would vanish.
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..64 {
            assert_ne!(random_background(&mut rng), 0x00FFFFFF);
        }
    }
}
