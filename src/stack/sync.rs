//! Text/progress synchronizer — keeps the title, counter and progress bar
//! in step with the active card.
//!
//! The title swap is a small phase machine:
//!
//! ```text
//! Idle ─update_text─▶ SlideOut ─(swap + jump right)─▶ Hold ─▶ SlideIn ─▶ Idle
//! ```
//!
//! Phase boundaries are computed from the previous phase's scheduled end,
//! not from when `tick` happened to observe it, so frame jitter never
//! stretches the sequence.

use std::time::Duration;

use crate::anim::{Animated, Ease, Lerp};
use crate::config::{secs, Timing};

/// Horizontal offset (percent of the text width) of an off-screen title.
pub const OFFSCREEN_PERCENT: f64 = 110.0;

/// Position and visibility of the title text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPose {
    /// Percent of the text's own width; negative is left.
    pub x_percent: f64,
    pub opacity: f64,
}

impl TextPose {
    pub const REST: Self = Self {
        x_percent: 0.0,
        opacity: 1.0,
    };
    const EXIT: Self = Self {
        x_percent: -OFFSCREEN_PERCENT,
        opacity: 0.0,
    };
    const ENTRY: Self = Self {
        x_percent: OFFSCREEN_PERCENT,
        opacity: 0.0,
    };
}

impl Lerp for TextPose {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            x_percent: self.x_percent.lerp(to.x_percent, t),
            opacity: self.opacity.lerp(to.opacity, t),
        }
    }
}

/// Where the title swap currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum TextPhase {
    Idle,
    SlideOut { pending: String, ends: Duration },
    Hold { until: Duration },
    SlideIn { ends: Duration },
}

/// The subset of [`Timing`] the synchronizer needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextTiming {
    pub slide_out: Duration,
    pub gap: Duration,
    pub slide_in: Duration,
    pub progress: Duration,
}

impl From<&Timing> for TextTiming {
    fn from(t: &Timing) -> Self {
        Self {
            slide_out: secs(t.text_out_secs),
            gap: secs(t.text_gap_secs),
            slide_in: secs(t.text_in_secs),
            progress: secs(t.progress_secs),
        }
    }
}

impl Default for TextTiming {
    fn default() -> Self {
        Self::from(&Timing::default())
    }
}

/// `"02 / 04"` — one-based position over total, each padded to two digits.
pub fn format_counter(index: usize, total: usize) -> String {
    format!("{:02} / {:02}", index + 1, total)
}

/// Fraction of the deck reached when `index` is active.
pub fn progress_fraction(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (index + 1) as f64 / total as f64
}

/// Secondary displays driven by the active index.
#[derive(Debug, Clone)]
pub struct TextSynchronizer {
    total: usize,
    timing: TextTiming,
    content: String,
    pose: Animated<TextPose>,
    phase: TextPhase,
    counter: String,
    progress: Animated<f64>,
}

impl TextSynchronizer {
    /// Start at rest, showing `title` as card `index` of `total`.
    pub fn new(index: usize, title: &str, total: usize, timing: TextTiming) -> Self {
        Self {
            total,
            timing,
            content: title.to_string(),
            pose: Animated::new(TextPose::REST),
            phase: TextPhase::Idle,
            counter: format_counter(index, total),
            progress: Animated::new(progress_fraction(index, total)),
        }
    }

    /// Begin the title swap to `title` and retarget counter and progress.
    /// A swap already in progress is abandoned; the text leaves from
    /// wherever it currently is.
    pub fn update_text(&mut self, index: usize, title: &str, now: Duration) {
        self.pose
            .animate_to(TextPose::EXIT, now, self.timing.slide_out, Ease::Power2In);
        self.phase = TextPhase::SlideOut {
            pending: title.to_string(),
            ends: now + self.timing.slide_out,
        };

        self.counter = format_counter(index, self.total);
        self.progress.animate_to(
            progress_fraction(index, self.total),
            now,
            self.timing.progress,
            Ease::Power2Out,
        );
    }

    /// Advance phases whose scheduled end has passed, then sample.
    pub fn tick(&mut self, now: Duration) {
        loop {
            match &mut self.phase {
                TextPhase::SlideOut { pending, ends } if now >= *ends => {
                    let ends = *ends;
                    self.content = std::mem::take(pending);
                    self.pose.set(TextPose::ENTRY);
                    self.phase = TextPhase::Hold {
                        until: ends + self.timing.gap,
                    };
                }
                TextPhase::Hold { until } if now >= *until => {
                    let start = *until;
                    self.pose
                        .animate_to(TextPose::REST, start, self.timing.slide_in, Ease::Power2Out);
                    self.phase = TextPhase::SlideIn {
                        ends: start + self.timing.slide_in,
                    };
                }
                TextPhase::SlideIn { ends } if now >= *ends => {
                    self.phase = TextPhase::Idle;
                }
                _ => break,
            }
        }
        self.pose.tick(now);
        self.progress.tick(now);
    }

    /// Title currently on display (the old one until the swap point).
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn pose(&self) -> TextPose {
        self.pose.value()
    }

    pub fn phase(&self) -> &TextPhase {
        &self.phase
    }

    pub fn counter(&self) -> &str {
        &self.counter
    }

    /// Current progress fill, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    /// Fill the progress bar is heading to.
    pub fn progress_target(&self) -> f64 {
        self.progress.target()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TextPhase::Idle && !self.progress.is_animating()
    }
}
