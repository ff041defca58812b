//! TUI event loop messages.
//!
//! The runner multiplexes:
//! - crossterm key, mouse and resize events (read on a blocking thread)
//! - tick interval (60Hz — advance animations)
//! - render interval (~30fps — draw frame)
//! - clock interval (1Hz — refresh the header clock)
//!
//! Everything reaches the model as a TuiMessage.

use crossterm::event::Event;

/// Messages that drive the TUI update loop.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// Raw terminal input.
    Input(Event),
    /// Advance animations to the current time.
    Tick,
    /// Render: draw a frame.
    Render,
    /// Refresh the header clock.
    ClockTick,
    /// Quit the TUI.
    Quit,
}
