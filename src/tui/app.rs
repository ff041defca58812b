//! StackApp — the TEA model.
//!
//! All state lives here. Update receives TuiMessages, mutates state.
//! View reads state to produce ratatui widgets. Animation time is a
//! `Duration` since the app started; `update_at` takes it explicitly so
//! tests can drive the clock.

use std::time::{Duration, Instant};

use ratatui::layout::{Position, Rect};

use crate::config::DeckConfig;
use crate::error::StackResult;
use crate::stack::{GestureRouter, StackController};

use super::clock::ClockDisplay;
use super::cursor::CursorFollower;
use super::event::TuiMessage;

/// The main TUI application state (TEA model).
#[derive(Debug)]
pub struct StackApp {
    /// Card stack, text and progress.
    pub controller: StackController,
    /// Turns wheel/drag/key input into directions.
    pub router: GestureRouter,
    pub cursor: CursorFollower,
    pub clock: ClockDisplay,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Regions that enlarge the cursor circle (set by renderer).
    pub hover_zones: Vec<Rect>,
    /// Layout units per terminal row.
    pub units_per_row: f64,
    epoch: Instant,
}

impl StackApp {
    pub fn new(config: &DeckConfig) -> StackResult<Self> {
        let controller = StackController::from_config(config)?;
        let router = GestureRouter::new(config.gesture.clone(), config.display.units_per_row);
        Ok(Self {
            controller,
            router,
            cursor: CursorFollower::new(),
            clock: ClockDisplay::new(),
            should_quit: false,
            hover_zones: Vec::new(),
            units_per_row: config.display.units_per_row,
            epoch: Instant::now(),
        })
    }

    /// Animation time: elapsed since the app started.
    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    pub fn update(&mut self, msg: TuiMessage) {
        let now = self.now();
        self.update_at(msg, now);
    }

    pub fn update_at(&mut self, msg: TuiMessage, now: Duration) {
        match msg {
            TuiMessage::Input(event) => {
                super::input::handle_event(self, event, now);
            }
            TuiMessage::Tick => {
                self.controller.tick(now);
                self.cursor.tick(now);
            }
            TuiMessage::Render => {
                // Render handled externally by runner
            }
            TuiMessage::ClockTick => {
                self.clock.refresh();
            }
            TuiMessage::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Terminal resized to `rows` rows.
    pub fn resize(&mut self, rows: u16) {
        self.controller
            .set_viewport_height(f64::from(rows) * self.units_per_row);
    }

    /// Pointer moved (or dragged) to a cell.
    pub fn on_pointer(&mut self, column: u16, row: u16, now: Duration) {
        self.cursor.on_move(column, row, now);
        let position = Position::new(column, row);
        let hovering = self.hover_zones.iter().any(|zone| zone.contains(position));
        self.cursor.set_hover(hovering, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
    };

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn app() -> StackApp {
        let config = DeckConfig {
            seed: Some(1),
            ..DeckConfig::builtin()
        };
        StackApp::new(&config).unwrap()
    }

    fn key(code: KeyCode) -> TuiMessage {
        TuiMessage::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> TuiMessage {
        TuiMessage::Input(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    #[test]
    fn app_default_state() {
        let app = app();
        assert!(!app.should_quit);
        assert_eq!(app.controller.active_index(), 0);
        assert_eq!(app.controller.total(), 4);
    }

    #[test]
    fn app_quit_on_ctrl_c() {
        let mut app = app();
        app.update_at(
            TuiMessage::Input(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
            ms(0),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn app_quit_on_q_and_message() {
        let mut app = app();
        app.update_at(key(KeyCode::Char('q')), ms(0));
        assert!(app.should_quit);

        let mut app = self::app();
        app.update_at(TuiMessage::Quit, ms(0));
        assert!(app.should_quit);
    }

    #[test]
    fn scroll_down_advances_and_tick_settles() {
        let mut app = app();
        app.update_at(mouse(MouseEventKind::ScrollDown, 5, 5), ms(0));
        assert_eq!(app.controller.active_index(), 1);
        assert_eq!(app.controller.sync().counter(), "02 / 04");

        // Swallowed while the transition runs
        app.update_at(mouse(MouseEventKind::ScrollDown, 5, 5), ms(500));
        assert_eq!(app.controller.active_index(), 1);

        app.update_at(TuiMessage::Tick, ms(1200));
        assert!(!app.controller.is_animating());
        app.update_at(key(KeyCode::Up), ms(1300));
        assert_eq!(app.controller.active_index(), 0);
    }

    #[test]
    fn resize_sets_viewport() {
        let mut app = app();
        app.update_at(TuiMessage::Input(Event::Resize(100, 40)), ms(0));
        assert_eq!(app.controller.viewport_height(), 40.0 * 15.0);
    }

    #[test]
    fn pointer_over_hover_zone_enlarges_circle() {
        let mut app = app();
        app.hover_zones = vec![Rect::new(10, 0, 5, 1)];
        app.update_at(mouse(MouseEventKind::Moved, 2, 0), ms(0));
        assert!(!app.cursor.is_hovering());
        app.update_at(mouse(MouseEventKind::Moved, 12, 0), ms(10));
        assert!(app.cursor.is_hovering());
        app.update_at(TuiMessage::Tick, ms(600));
        assert!(app.cursor.is_enlarged());
    }

    #[test]
    fn tui_message_variants() {
        let mut app = app();
        app.update_at(TuiMessage::Render, ms(0));
        app.update_at(TuiMessage::ClockTick, ms(0));
        assert_eq!(app.clock.text().len(), 5);
        assert!(!app.should_quit);
    }
}
