//! Polynomial easing curves.
//!
//! `PowerN` follows the usual naming: `Power1` is quadratic, `Power2`
//! cubic, `Power3` quartic, `Power4` quintic.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power2In,
    Power2Out,
    Power3Out,
    Power4In,
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => ease_out(t, 2),
            Ease::Power2In => t.powi(3),
            Ease::Power2Out => ease_out(t, 3),
            Ease::Power3Out => ease_out(t, 4),
            Ease::Power4In => t.powi(5),
        }
    }
}

fn ease_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}
