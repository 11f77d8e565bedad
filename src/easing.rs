// The blink curve: Penner's symmetric ease-in-out quartic in its classic
// (elapsed, from, delta, duration) form.
//
// The blink state machine calls it with from=1, delta=-1, so the value
// falls from 1 to 0 over `duration`, then the unclamped tail of the
// second branch climbs back up and crosses 1 at roughly 1.59x duration.
// That crossing past 1 is the signal that the reopen finished, so the
// input is deliberately NOT clamped to the duration.

pub fn ease_in_out_quart(elapsed: f64, from: f64, delta: f64, duration: f64) -> f64 {
    let t = elapsed / (duration / 2.0);
    if t < 1.0 {
        delta / 2.0 * t.powi(4) + from
    } else {
        let t = t - 2.0;
        -delta / 2.0 * (t.powi(4) - 2.0) + from
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_of_the_clamped_range() {
        assert_eq!(ease_in_out_quart(0.0, 1.0, -1.0, 400.0), 1.0);
        assert_eq!(ease_in_out_quart(200.0, 1.0, -1.0, 400.0), 0.5);
        assert_eq!(ease_in_out_quart(400.0, 1.0, -1.0, 400.0), 0.0);
    }

    #[test]
    fn falls_monotonically_to_the_low_point() {
        let mut prev = ease_in_out_quart(0.0, 1.0, -1.0, 400.0);
        for step in 1..=40 {
            let v = ease_in_out_quart(step as f64 * 10.0, 1.0, -1.0, 400.0);
            assert!(v <= prev, "curve rose before the low point at step {step}");
            prev = v;
        }
    }

    #[test]
    fn unclamped_tail_recovers_and_overshoots() {
        // Past the duration the second branch climbs back up...
        let halfway_back = ease_in_out_quart(600.0, 1.0, -1.0, 400.0);
        assert!(halfway_back > 0.0 && halfway_back < 1.0);
        // ...and crosses 1 near 1.59x duration. This is the reopen trigger.
        assert!(ease_in_out_quart(640.0, 1.0, -1.0, 400.0) > 1.0);
    }
}
