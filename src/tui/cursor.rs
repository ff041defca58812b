//! Cursor follower — a dot that tracks the pointer closely and a circle
//! that trails behind it, growing over hoverable regions.

use std::time::Duration;

use crate::anim::{Animated, Ease, Lerp};

const DOT: Duration = Duration::from_millis(100);
const CIRCLE: Duration = Duration::from_millis(300);
const HOVER: Duration = Duration::from_millis(500);

/// Circle scale while hovering a hoverable region.
pub const HOVER_SCALE: f64 = 1.5;

/// Terminal-cell position with sub-cell precision for smooth trailing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
        }
    }

    /// Nearest cell.
    pub fn cell(self) -> (u16, u16) {
        (round_cell(self.x), round_cell(self.y))
    }
}

fn round_cell(v: f64) -> u16 {
    v.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            x: self.x.lerp(to.x, t),
            y: self.y.lerp(to.y, t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CursorFollower {
    dot: Animated<Point>,
    circle: Animated<Point>,
    circle_scale: Animated<f64>,
    hovering: bool,
    /// Hidden until the first pointer move.
    visible: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollower {
    pub fn new() -> Self {
        let origin = Point::new(0, 0);
        Self {
            dot: Animated::new(origin),
            circle: Animated::new(origin),
            circle_scale: Animated::new(1.0),
            hovering: false,
            visible: false,
        }
    }

    pub fn on_move(&mut self, column: u16, row: u16, now: Duration) {
        let target = Point::new(column, row);
        if !self.visible {
            self.visible = true;
            self.dot.set(target);
            self.circle.set(target);
            return;
        }
        self.dot.animate_to(target, now, DOT, Ease::Power1Out);
        self.circle.animate_to(target, now, CIRCLE, Ease::Power2Out);
    }

    /// Enter or leave a hoverable region. Repeats are ignored.
    pub fn set_hover(&mut self, hovering: bool, now: Duration) {
        if hovering == self.hovering {
            return;
        }
        self.hovering = hovering;
        let scale = if hovering { HOVER_SCALE } else { 1.0 };
        self.circle_scale
            .animate_to(scale, now, HOVER, Ease::Power1Out);
    }

    pub fn tick(&mut self, now: Duration) {
        self.dot.tick(now);
        self.circle.tick(now);
        self.circle_scale.tick(now);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn dot(&self) -> Option<(u16, u16)> {
        self.visible.then(|| self.dot.value().cell())
    }

    pub fn circle(&self) -> Option<(u16, u16)> {
        self.visible.then(|| self.circle.value().cell())
    }

    pub fn circle_scale(&self) -> f64 {
        self.circle_scale.value()
    }

    /// Draw the circle with its large glyph past the midpoint of the grow.
    pub fn is_enlarged(&self) -> bool {
        self.circle_scale() > (1.0 + HOVER_SCALE) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn hidden_until_first_move() {
        let mut c = CursorFollower::new();
        assert!(!c.is_visible());
        assert_eq!(c.dot(), None);
        c.on_move(10, 4, ms(0));
        assert!(c.is_visible());
        assert_eq!(c.dot(), Some((10, 4)));
        assert_eq!(c.circle(), Some((10, 4)));
    }

    #[test]
    fn circle_trails_the_dot() {
        let mut c = CursorFollower::new();
        c.on_move(0, 0, ms(0));
        c.on_move(40, 0, ms(0));
        c.tick(ms(100));
        assert_eq!(c.dot(), Some((40, 0)));
        let (cx, _) = c.circle().unwrap();
        assert!(cx > 0 && cx < 40, "circle at {cx}");
        c.tick(ms(300));
        assert_eq!(c.circle(), Some((40, 0)));
    }

    #[test]
    fn hover_grows_and_shrinks_circle() {
        let mut c = CursorFollower::new();
        c.set_hover(true, ms(0));
        assert!(c.is_hovering());
        c.tick(ms(500));
        assert_eq!(c.circle_scale(), HOVER_SCALE);
        assert!(c.is_enlarged());

        c.set_hover(false, ms(500));
        c.tick(ms(1000));
        assert_eq!(c.circle_scale(), 1.0);
        assert!(!c.is_enlarged());
    }

    #[test]
    fn repeated_hover_does_not_restart() {
        let mut c = CursorFollower::new();
        c.set_hover(true, ms(0));
        c.tick(ms(250));
        let mid = c.circle_scale();
        c.set_hover(true, ms(250));
        c.tick(ms(250));
        assert_eq!(c.circle_scale(), mid);
    }
}
