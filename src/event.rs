//! Event handling module.
//!
//! Keyboard input is read on a blocking task and forwarded over a channel,
//! together with frame ticks from a tokio interval. The main loop receives
//! one [`AppEvent`] at a time, so timer updates never overlap. A terminal
//! read failure travels down the same channel and ends the loop.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::constants::POLL_TIMEOUT;

/// Something the main loop has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// The terminal was resized
    Resize,
    /// Frame tick: advance timers and redraw
    Tick,
}

/// Represents the different actions a user can take in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Move selection up
    Up,
    /// Move selection down
    Down,
    /// Move selection left
    Left,
    /// Move selection right
    Right,
    /// Move to the first timer
    Top,
    /// Move to the last timer
    Bottom,
    /// Submit / confirm
    Enter,
    /// Go back to the previous view
    Back,
    /// Pause or resume the selected timer
    PauseResume,
    /// Delete the selected timer
    Delete,
    /// Focus the duration form
    EditForm,
    /// Show help
    Help,
    /// Focus the next form field
    NextField,
    /// Focus the previous form field
    PrevField,
    /// Character input (for text entry mode)
    Char(char),
    /// Backspace key (for text entry mode)
    Backspace,
}

/// Receives terminal events and frame ticks.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Result<AppEvent>>,
}

impl EventHandler {
    /// Starts the input reader and the frame ticker.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_input_reader(tx.clone(), POLL_TIMEOUT);
        spawn_frame_ticker(tx, POLL_TIMEOUT);
        Self { rx }
    }

    /// Waits for the next event.
    ///
    /// Returns an error if reading the terminal failed or every sender is gone.
    pub async fn next(&mut self) -> Result<AppEvent> {
        self.rx
            .recv()
            .await
            .context("Event channel closed")?
            .context("Failed to read terminal input")
    }

    /// Converts a key event to an input-mode action.
    pub(crate) fn key_to_input_action(&self, key: KeyEvent) -> Option<Action> {
        key_to_input_action(key)
    }

    /// Converts a key event to an application action.
    pub(crate) fn key_to_action(&self, key: KeyEvent) -> Option<Action> {
        key_to_action(key)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads crossterm events on a blocking task.
fn spawn_input_reader(tx: mpsc::UnboundedSender<Result<AppEvent>>, poll_timeout: Duration) {
    tokio::task::spawn_blocking(move || {
        forward_input(&tx, || event::poll(poll_timeout), event::read);
    });
}

/// Forwards input events until the receiving side goes away or the terminal
/// fails. A failure is sent as the last message.
fn forward_input<P, R>(tx: &mpsc::UnboundedSender<Result<AppEvent>>, mut poll: P, mut read: R)
where
    P: FnMut() -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    loop {
        if tx.is_closed() {
            break;
        }
        let ready = match poll() {
            Ok(ready) => ready,
            Err(e) => {
                error!("Failed to poll terminal events: {}", e);
                let err = anyhow::Error::new(e).context("Failed to poll terminal events");
                let _ = tx.send(Err(err));
                break;
            }
        };
        if !ready {
            continue;
        }
        let forwarded = match read() {
            // Only process key press events (not releases)
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Ok(Event::Resize(_, _)) => Some(AppEvent::Resize),
            Ok(_) => None,
            Err(e) => {
                error!("Failed to read terminal event: {}", e);
                let err = anyhow::Error::new(e).context("Failed to read terminal event");
                let _ = tx.send(Err(err));
                break;
            }
        };
        if let Some(app_event) = forwarded {
            if tx.send(Ok(app_event)).is_err() {
                break;
            }
        }
    }
}

/// Emits [`AppEvent::Tick`] every `period` until the receiving side goes away.
fn spawn_frame_ticker(tx: mpsc::UnboundedSender<Result<AppEvent>>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if tx.send(Ok(AppEvent::Tick)).is_err() {
                debug!("Frame ticker stopped");
                break;
            }
        }
    });
}

/// Maps keys while the duration form has focus.
fn key_to_input_action(key: KeyEvent) -> Option<Action> {
    // Check for Ctrl+C (quit)
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab | KeyCode::Right => Some(Action::NextField),
        KeyCode::BackTab | KeyCode::Left => Some(Action::PrevField),
        KeyCode::Char(c) => Some(Action::Char(c)),
        _ => None,
    }
}

/// Maps keys everywhere else.
fn key_to_action(key: KeyEvent) -> Option<Action> {
    // Check for Ctrl+C first (quit)
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Right),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Esc => Some(Action::Back),

        // Timers
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::PauseResume),
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => Some(Action::Delete),
        KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('i') | KeyCode::Tab => {
            Some(Action::EditForm)
        }

        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::Help),

        // No matching action
        _ => None,
    }
}
