//! Header clock — local `HH:MM`, refreshed once per second by the runner.

use chrono::{Local, NaiveTime};

pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[derive(Debug, Clone)]
pub struct ClockDisplay {
    text: String,
}

impl Default for ClockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockDisplay {
    pub fn new() -> Self {
        let mut clock = Self {
            text: String::new(),
        };
        clock.refresh();
        clock
    }

    /// Re-read the local wall clock.
    pub fn refresh(&mut self) {
        self.set_time(Local::now().time());
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.text = format_clock(time);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
