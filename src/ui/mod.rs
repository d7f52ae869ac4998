//! UI rendering module.
//!
//! This module handles all the terminal UI rendering using Ratatui.
//! Each part of the screen is rendered by a separate submodule for clarity.

mod colors;
mod dialogs;
mod form;
mod grid;
mod header;
mod help;
mod ring;
mod status;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, View};
use crate::constants::layout;

// Re-export submodule draw functions for internal use
use dialogs::{draw_alert_dialog, draw_confirm_dialog};
use form::draw_form;
use grid::draw_timer_grid;
use header::draw_header;
use help::draw_help_overlay;
use status::{draw_commands_bar, draw_status_bar};

pub use grid::columns_for_width;

/// Main draw function - lays out the screen and draws overlays.
pub fn draw(frame: &mut Frame, app: &App) {
    // Create the main layout: header, form, timers, commands bar, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout::HEADER_HEIGHT),
            Constraint::Length(layout::FORM_HEIGHT),
            Constraint::Min(0), // Timer grid
            Constraint::Length(layout::COMMANDS_BAR_HEIGHT),
            Constraint::Length(layout::STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_form(frame, chunks[1], app);
    draw_timer_grid(frame, chunks[2], app);

    // Dialogs go on top of the grid
    match &app.current_view {
        View::Alert(message) => draw_alert_dialog(frame, message),
        View::Confirm(action) => draw_confirm_dialog(frame, action, app),
        View::Grid | View::Form(_) => {}
    }

    // Draw the commands bar (shows available actions)
    draw_commands_bar(frame, chunks[3], app);

    // Draw the status bar (shows messages)
    draw_status_bar(frame, chunks[4], app);

    // Draw help overlay if enabled
    if app.show_help {
        draw_help_overlay(frame);
    }
}
