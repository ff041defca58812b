//! Tween and easing primitives.
//!
//! Time is a `Duration` measured from an arbitrary epoch owned by the
//! caller. Nothing here reads a clock — every sample takes `now` — so the
//! whole stack is deterministic under test.

pub mod ease;
pub mod tween;

pub use ease::Ease;
pub use tween::{Animated, Lerp, Tween};
