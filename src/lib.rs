//! cardstack — a terminal card-stack presenter.
//!
//! A deck of overlapping cards that the user flips through with the
//! wheel, a drag or the keyboard. Each move throws or drops a card,
//! restacks the rest, and swaps the title, counter and progress bar in
//! step.

pub mod anim;
pub mod config;
pub mod error;
pub mod stack;
pub mod tui;
