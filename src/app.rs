//! Application state and logic.
//!
//! This module contains the core application state, view management,
//! and event handling logic.

use tracing::debug;

use crate::event::Action;
use crate::progress::format_hms;
use crate::timer::{TimerEntry, TimerId, TimerStatus};
use crate::timer_list::{DraftField, MsgOutcome, TimerList, TimerMsg};

/// The different views/screens in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Grid of timer cards
    Grid,
    /// Editing one field of the duration form
    Form(DraftField),
    /// Blocking message; any key dismisses it
    Alert(String),
    /// Confirmation dialog (for destructive actions)
    Confirm(ConfirmAction),
}

/// Actions that require confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Delete a timer
    DeleteTimer(TimerId),
}

/// Status message to display to the user.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text
    pub text: String,
    /// Whether this is an error message
    pub is_error: bool,
}

/// Main application state.
pub struct App {
    /// All timers and the form draft
    pub timers: TimerList,
    /// Current view/screen
    pub current_view: View,
    /// Previous view (for going back)
    pub previous_view: Option<View>,
    /// Status message to display
    pub status: Option<StatusMessage>,
    /// Index of the selected card
    pub selected: Option<usize>,
    /// Number of card columns currently on screen
    pub grid_columns: usize,
    pub show_help: bool,
}

impl App {
    /// Creates a new application instance around a timer list.
    pub fn new(timers: TimerList) -> Self {
        Self {
            timers,
            current_view: View::Grid,
            previous_view: None,
            status: None,
            selected: None,
            grid_columns: 1,
            show_help: false,
        }
    }

    /// Advances every running timer to `now_ms`.
    pub fn on_tick(&mut self, now_ms: i64) {
        if let MsgOutcome::Ticked { expired } = self.timers.apply(TimerMsg::Tick, now_ms) {
            for id in expired {
                // Wall time since creation, which includes any frozen pauses
                let ran_for = self
                    .timers
                    .get(id)
                    .map_or(0, |t| (now_ms - t.created_at_ms).max(0) as u64);
                let text = format!("Timer {} finished after {}", id, format_hms(ran_for));
                self.set_status(&text, false);
            }
        }
    }

    /// Records how many card columns the grid is using.
    pub fn set_grid_columns(&mut self, columns: usize) {
        self.grid_columns = columns.max(1);
    }

    /// Whether the duration form currently has keyboard focus.
    pub fn is_editing(&self) -> bool {
        matches!(self.current_view, View::Form(_))
    }

    /// Whether keys should be read as text rather than as commands.
    ///
    /// True for the form, and for alerts so that letters dismiss them too.
    pub fn wants_raw_keys(&self) -> bool {
        matches!(self.current_view, View::Form(_) | View::Alert(_))
    }

    /// Handles an action and returns true if the app should quit.
    pub fn handle_event(&mut self, action: Action, now_ms: i64) -> bool {
        // Alerts swallow the next key, whatever it is
        if let View::Alert(_) = self.current_view {
            if action == Action::Quit {
                return true;
            }
            self.go_back();
            return false;
        }

        // Handle help toggle from any view but the form
        if action == Action::Help && !self.is_editing() {
            self.show_help = !self.show_help;
            return false;
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return false;
        }

        match self.current_view.clone() {
            View::Confirm(confirm) => self.handle_confirm_action(action, confirm, now_ms),
            View::Form(field) => self.handle_form_action(action, field, now_ms),
            View::Grid => self.handle_grid_action(action, now_ms),
            View::Alert(_) => false,
        }
    }

    /// Handles actions in the timer grid.
    fn handle_grid_action(&mut self, action: Action, now_ms: i64) -> bool {
        match action {
            Action::Quit => return true,
            Action::Up => self.move_selection(-(self.grid_columns as isize)),
            Action::Down => self.move_selection(self.grid_columns as isize),
            Action::Left => self.move_selection(-1),
            Action::Right => self.move_selection(1),
            Action::Top => self.select_first(),
            Action::Bottom => self.select_last(),
            Action::Enter => self.add_timer(now_ms),
            Action::PauseResume => self.pause_resume_selected(now_ms),
            Action::Delete => self.confirm_delete_selected(),
            Action::EditForm => self.start_editing(DraftField::Hours),
            _ => {}
        }
        false
    }

    /// Handles actions while the duration form has focus.
    fn handle_form_action(&mut self, action: Action, field: DraftField, now_ms: i64) -> bool {
        match action {
            Action::Quit => return true,
            Action::Back => self.go_back(),
            Action::Enter => self.add_timer(now_ms),
            Action::NextField => self.current_view = View::Form(field.next()),
            Action::PrevField => self.current_view = View::Form(field.previous()),
            Action::Char(c) => self.timers.push_char(field, c),
            Action::Backspace => self.timers.pop_char(field),
            _ => {}
        }
        false
    }

    /// Handles actions in confirmation dialogs.
    fn handle_confirm_action(&mut self, action: Action, confirm: ConfirmAction, now_ms: i64) -> bool {
        match action {
            Action::Enter => {
                // User confirmed the action
                self.execute_confirmed_action(confirm, now_ms);
            }
            Action::Back | Action::Quit => {
                // User cancelled
                self.go_back();
            }
            _ => {}
        }
        false
    }

    // --- Navigation helpers ---

    fn move_selection(&mut self, delta: isize) {
        let len = self.timers.len();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let new = (current + delta).clamp(0, len as isize - 1);
        self.selected = Some(new as usize);
    }

    fn select_first(&mut self) {
        if !self.timers.is_empty() {
            self.selected = Some(0);
        }
    }

    fn select_last(&mut self) {
        let len = self.timers.len();
        if len > 0 {
            self.selected = Some(len - 1);
        }
    }

    /// Goes back to the previous view.
    fn go_back(&mut self) {
        if let Some(prev) = self.previous_view.take() {
            self.current_view = prev;
        } else {
            self.current_view = View::Grid;
        }
    }

    // --- Form handling ---

    fn start_editing(&mut self, field: DraftField) {
        self.previous_view = Some(View::Grid);
        self.current_view = View::Form(field);
    }

    /// Adds a timer from the current draft, or raises an alert.
    fn add_timer(&mut self, now_ms: i64) {
        match self.timers.submit_new_timer(now_ms) {
            Ok(id) => {
                let duration = self.timers.get(id).map_or(0, |t| t.duration_ms);
                self.set_status(&format!("Added timer {} ({})", id, format_hms(duration)), false);
                self.selected = Some(self.timers.len() - 1);
                self.current_view = View::Grid;
                self.previous_view = None;
            }
            Err(e) => {
                // Come back to wherever the user was, draft intact
                self.previous_view = Some(self.current_view.clone());
                self.current_view = View::Alert(e.to_string());
            }
        }
    }

    // --- Timer operations ---

    fn pause_resume_selected(&mut self, now_ms: i64) {
        let Some(id) = self.selected_timer().map(|t| t.id) else {
            return;
        };
        match self.timers.apply(TimerMsg::PauseResume(id), now_ms) {
            MsgOutcome::Paused(id) => self.set_status(&format!("Paused timer {}", id), false),
            MsgOutcome::Resumed(id) => self.set_status(&format!("Resumed timer {}", id), false),
            _ => match self.timers.get(id).map(|t| t.status()) {
                Some(TimerStatus::Expired) => self.set_status("Timer has already finished", true),
                _ => self.set_status(&format!("Could not resume timer {}", id), true),
            },
        }
    }

    fn confirm_delete_selected(&mut self) {
        if let Some(id) = self.selected_timer().map(|t| t.id) {
            self.previous_view = Some(self.current_view.clone());
            self.current_view = View::Confirm(ConfirmAction::DeleteTimer(id));
        }
    }

    fn execute_confirmed_action(&mut self, action: ConfirmAction, now_ms: i64) {
        match action {
            ConfirmAction::DeleteTimer(id) => {
                if let MsgOutcome::Deleted(id) = self.timers.apply(TimerMsg::Delete(id), now_ms) {
                    self.set_status(&format!("Deleted timer {}", id), false);
                }
                self.clamp_selection();
                self.go_back();
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.timers.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(idx) if idx >= len => Some(len - 1),
            other => other,
        };
        debug!(selected = ?self.selected, remaining = len, "selection clamped");
    }

    // --- Status message helpers ---

    fn set_status(&mut self, text: &str, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            is_error,
        });
    }

    /// Returns the currently selected timer (if any).
    pub fn selected_timer(&self) -> Option<&TimerEntry> {
        self.selected.and_then(|idx| self.timers.entries().get(idx))
    }
}
