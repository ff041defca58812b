//! TUI runner — main loop that wires everything together.
//!
//! Creates terminal, spawns the input reader, runs main TEA loop.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};

use crate::config::DeckConfig;

use super::app::StackApp;
use super::event::TuiMessage;
use super::layout;

/// Read crossterm events on a blocking thread and forward them.
/// Exits once the receiver is dropped.
fn spawn_input_reader(tx: mpsc::UnboundedSender<Event>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("terminal read failed: {e}");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("terminal poll failed: {e}");
                    break;
                }
            }
        }
    });
}

/// Puts the terminal back in cooked mode on the main screen when dropped,
/// so every exit path after raw mode is enabled restores it.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn new(out: W) -> Self {
        Self { out }
    }

    fn restore(&mut self) -> io::Result<()> {
        let raw = disable_raw_mode();
        let screen = self
            .out
            .execute(DisableMouseCapture)
            .and_then(|out| out.execute(LeaveAlternateScreen))
            .and_then(|out| out.execute(Show))
            .map(|_| ());
        raw.and(screen)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("terminal restore failed: {e}");
        }
    }
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(config: DeckConfig) -> anyhow::Result<()> {
    let mut app = StackApp::new(&config)?;

    // Setup terminal. The guard restores it on the way out, error or not.
    enable_raw_mode()?;
    let _guard = TerminalGuard::new(io::stdout());
    io::stdout()
        .execute(EnterAlternateScreen)?
        .execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    event_loop(&mut terminal, &mut app).await
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut StackApp,
) -> anyhow::Result<()> {
    let size = terminal.size()?;
    app.resize(size.height);
    info!(
        cards = app.controller.total(),
        rows = size.height,
        "presentation started"
    );

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    spawn_input_reader(input_tx);

    let mut tick_interval = interval(Duration::from_millis(16)); // ~60Hz
    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps
    let mut clock_interval = interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                app.update(TuiMessage::Tick);
            }
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, app))?;
            }
            _ = clock_interval.tick() => {
                app.update(TuiMessage::ClockTick);
            }
            maybe_event = input_rx.recv() => {
                match maybe_event {
                    Some(event) => app.update(TuiMessage::Input(event)),
                    None => app.update(TuiMessage::Quit),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!(active = app.controller.active_index(), "presentation closed");
    Ok(())
}
