//! Time-sampled interpolation of a value between two states.

use std::time::Duration;

use super::Ease;

/// Values that can be blended linearly.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

/// A single `from → to` interpolation anchored at an absolute start time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: Duration,
    duration: Duration,
    ease: Ease,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease,
        }
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn start(&self) -> Duration {
        self.start
    }

    /// Absolute time at which the tween reaches its target.
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end()
    }

    /// Value at `now`. Holds `from` until `start`, `to` from `end` on.
    /// A zero-length tween is already at `to` on its start instant.
    pub fn sample(&self, now: Duration) -> T {
        if self.is_finished(now) {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let elapsed = (now - self.start).as_secs_f64();
        let progress = elapsed / self.duration.as_secs_f64();
        self.from.lerp(self.to, self.ease.apply(progress))
    }
}

/// A value with at most one running tween.
///
/// Starting a new tween overwrites the running one, picking up from the
/// value it had reached. `set` jumps instantly and cancels any tween.
#[derive(Debug, Clone)]
pub struct Animated<T> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    /// Last sampled value.
    pub fn value(&self) -> T {
        self.value
    }

    /// Where the value is heading: the running tween's target, else the value.
    pub fn target(&self) -> T {
        self.tween.map_or(self.value, |t| t.target())
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// End time of the running tween, if any.
    pub fn settles_at(&self) -> Option<Duration> {
        self.tween.map(|t| t.end())
    }

    /// Jump to `value` without animating.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.tween = None;
    }

    /// Tween from the current value to `to`, starting at `start`.
    pub fn animate_to(&mut self, to: T, start: Duration, duration: Duration, ease: Ease) {
        self.tween = Some(Tween::new(self.value, to, start, duration, ease));
    }

    /// Sample the running tween at `now`. Returns true when it finished on this call.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        if tween.is_finished(now) {
            self.value = tween.target();
            self.tween = None;
            return true;
        }
        self.value = tween.sample(now);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn tween_holds_before_start() {
        let t = Tween::new(0.0, 10.0, ms(100), ms(100), Ease::Linear);
        assert_eq!(t.sample(ms(0)), 0.0);
        assert_eq!(t.sample(ms(100)), 0.0);
    }

    #[test]
    fn tween_linear_midpoint() {
        let t = Tween::new(0.0, 10.0, ms(100), ms(100), Ease::Linear);
        assert!((t.sample(ms(150)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn tween_clamps_after_end() {
        let t = Tween::new(0.0, 10.0, ms(0), ms(100), Ease::Power3Out);
        assert_eq!(t.sample(ms(100)), 10.0);
        assert_eq!(t.sample(ms(5000)), 10.0);
        assert!(t.is_finished(ms(100)));
        assert!(!t.is_finished(ms(99)));
    }

    #[test]
    fn zero_duration_snaps() {
        let t = Tween::new(1.0, 2.0, ms(10), Duration::ZERO, Ease::Linear);
        assert_eq!(t.sample(ms(9)), 1.0);
        assert_eq!(t.sample(ms(10)), 2.0);
        assert_eq!(t.sample(ms(11)), 2.0);
    }

    #[test]
    fn animated_zero_duration_lands_on_start_tick() {
        let mut a = Animated::new(0.0);
        a.animate_to(1.0, ms(10), Duration::ZERO, Ease::Linear);
        assert!(a.tick(ms(10)));
        assert_eq!(a.value(), 1.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn animated_tick_reports_completion_once() {
        let mut a = Animated::new(0.0);
        a.animate_to(1.0, ms(0), ms(100), Ease::Linear);
        assert!(a.is_animating());
        assert_eq!(a.settles_at(), Some(ms(100)));
        assert!(!a.tick(ms(50)));
        assert!((a.value() - 0.5).abs() < 1e-9);
        assert!(a.tick(ms(100)));
        assert!(!a.tick(ms(200)));
        assert_eq!(a.value(), 1.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn animated_overwrite_starts_from_current_value() {
        let mut a = Animated::new(0.0);
        a.animate_to(10.0, ms(0), ms(100), Ease::Linear);
        a.tick(ms(50));
        a.animate_to(0.0, ms(50), ms(100), Ease::Linear);
        a.tick(ms(100));
        assert!((a.value() - 2.5).abs() < 1e-9);
        assert_eq!(a.target(), 0.0);
    }

    #[test]
    fn animated_set_cancels() {
        let mut a = Animated::new(0.0);
        a.animate_to(10.0, ms(0), ms(100), Ease::Linear);
        a.set(3.0);
        assert!(!a.is_animating());
        a.tick(ms(100));
        assert_eq!(a.value(), 3.0);
    }
}
