//! Gesture router — folds wheel, drag and key input into a single ±1 signal.
//!
//! Wheel notches and drag travel accumulate until they cross the
//! tolerance; then one direction is emitted and the accumulator resets.
//! Reversing mid-gesture discards travel in the old direction. The router
//! never debounces: dropping gestures during a transition is the
//! controller's job.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::config::GestureSettings;

/// Normalized gesture direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Downward gesture: next card.
    Forward,
    /// Upward gesture: previous card.
    Backward,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// `Forward` for positive, `Backward` for negative, nothing for zero.
    pub fn from_sign(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Forward)
        } else if value < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct GestureRouter {
    settings: GestureSettings,
    units_per_row: f64,
    /// Signed travel not yet converted into a direction.
    travel: f64,
    /// Row where the current drag was last anchored.
    drag_anchor: Option<u16>,
}

impl GestureRouter {
    pub fn new(settings: GestureSettings, units_per_row: f64) -> Self {
        Self {
            settings,
            units_per_row,
            travel: 0.0,
            drag_anchor: None,
        }
    }

    /// Route any terminal event. Non-gesture events return `None`.
    pub fn route(&mut self, event: &Event) -> Option<Direction> {
        match event {
            Event::Mouse(mouse) => self.route_mouse(mouse),
            Event::Key(key) => Self::route_key(key),
            _ => None,
        }
    }

    pub fn route_mouse(&mut self, mouse: &MouseEvent) -> Option<Direction> {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.accumulate(self.settings.wheel_delta),
            MouseEventKind::ScrollUp => self.accumulate(-self.settings.wheel_delta),
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_anchor = Some(mouse.row);
                self.travel = 0.0;
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let anchor = *self.drag_anchor.get_or_insert(mouse.row);
                let rows = f64::from(mouse.row) - f64::from(anchor);
                let travel = rows * self.units_per_row;
                if travel.abs() >= self.settings.tolerance {
                    self.drag_anchor = Some(mouse.row);
                    self.travel = 0.0;
                    return Direction::from_sign(travel);
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_anchor = None;
                self.travel = 0.0;
                None
            }
            _ => None,
        }
    }

    /// Keyboard stand-ins for scrolling.
    pub fn route_key(key: &KeyEvent) -> Option<Direction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match key.code {
            KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') | KeyCode::Char(' ') => {
                Some(Direction::Forward)
            }
            KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') => Some(Direction::Backward),
            _ => None,
        }
    }

    fn accumulate(&mut self, delta: f64) -> Option<Direction> {
        if self.travel * delta < 0.0 {
            self.travel = 0.0;
        }
        self.travel += delta;
        if self.travel.abs() >= self.settings.tolerance {
            let direction = Direction::from_sign(self.travel);
            self.travel = 0.0;
            return direction;
        }
        None
    }
}
