//! Terminal UI for Strictly Quarto.
//!
//! The engine is loaded on a background task while the loading screen is
//! shown; the result arrives over a channel and every later orchestrator call
//! happens on this loop.

mod app;
mod input;
mod ui;

pub use app::{App, AppEvent, Focus, LoadState};
pub use input::{command_for, move_cursor, move_tray, Command, Nudge};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::engine::EngineLoader;

/// Runs the terminal UI until the user quits.
#[instrument(skip_all)]
pub async fn run_tui(loader: Arc<dyn EngineLoader>) -> Result<()> {
    info!("Starting Strictly Quarto TUI");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let loaded = loader.load().await;
        if event_tx.send(AppEvent::EngineLoaded(loaded)).is_err() {
            info!("UI closed before the engine finished loading");
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "UI loop error");
    }
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            // crossterm reports both press and release on some platforms.
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if let Some(command) = command_for(key.code) {
                app.handle_command(command);
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
