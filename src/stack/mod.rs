//! The card stack: registry, transition engine, text/progress
//! synchronizer and gesture router.
//!
//! ```text
//! GestureRouter ──±1──▶ StackController ──▶ CardRegistry (card tweens)
//!                              │
//!                              └──────────▶ TextSynchronizer (title, counter, progress)
//! ```
//!
//! Nothing in here touches the terminal. The TUI layer feeds events and
//! timestamps in and reads transforms and text back out.

pub mod engine;
pub mod gesture;
pub mod registry;
pub mod sync;

pub use engine::{Completion, StackController, StackState, TransitionDone};
pub use gesture::{Direction, GestureRouter};
pub use registry::{Card, CardRegistry, CardTransform};
pub use sync::{format_counter, TextPhase, TextPose, TextSynchronizer};
