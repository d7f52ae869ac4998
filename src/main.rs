//! Multi-timer TUI
//!
//! A terminal user interface for running several countdown timers at once.
//! Run with: multitimer [--minutes <MIN>] [--pause-mode legacy|freeze]

mod app;
mod clock;
mod config;
mod constants;
mod event;
mod progress;
mod timer;
mod timer_list;
mod ui;
mod validation;

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;

use crate::app::App;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::event::{AppEvent, EventHandler};
use crate::timer_list::TimerList;

/// Sends logs to the configured file. The terminal belongs to the UI, so
/// without a file nothing is logged.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("multitimer={}", config.log_level()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

/// Entry point for the application.
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    info!(
        "Starting multitimer v{} (pause mode {:?})",
        env!("CARGO_PKG_VERSION"),
        config.pause_mode
    );

    // Initialize the terminal
    let terminal = ratatui::init();

    let app = App::new(TimerList::new(config.draft(), config.pause_mode));

    // Run the application
    let result = run_app(terminal, app, SystemClock).await;

    // Restore the terminal to its original state
    ratatui::restore();

    info!("Shutdown complete");
    result
}

/// Main application loop.
///
/// This function runs the TUI event loop:
/// 1. Draw the current UI state
/// 2. Wait for a key press or a frame tick
/// 3. Update application state
/// 4. Repeat until the user quits
async fn run_app(
    mut terminal: ratatui::DefaultTerminal,
    mut app: App,
    clock: impl Clock,
) -> Result<()> {
    let mut event_handler = EventHandler::new();

    loop {
        let width = terminal.size().context("Failed to read terminal size")?.width;
        app.set_grid_columns(ui::columns_for_width(width));

        terminal
            .draw(|frame| ui::draw(frame, &app))
            .context("Failed to draw UI")?;

        match event_handler.next().await? {
            AppEvent::Tick => app.on_tick(clock.now_ms()),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                // Use different key mapping for text entry vs everything else
                let action = if app.wants_raw_keys() {
                    event_handler.key_to_input_action(key)
                } else {
                    event_handler.key_to_action(key)
                };

                if let Some(action) = action {
                    if app.handle_event(action, clock.now_ms()) {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
