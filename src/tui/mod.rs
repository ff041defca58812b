//! Terminal presentation layer — ratatui view over the card stack.
//!
//! ## Architecture (TEA)
//!
//! Model (`StackApp`) + Update (message handler) + View (render).
//! Immediate mode: each frame is drawn from the latest sampled
//! transforms, nothing is retained between frames except the hover
//! regions the view hands back for hit-testing.

pub mod app;
pub mod clock;
pub mod cursor;
pub mod event;
pub mod input;
pub mod layout;
pub mod runner;
