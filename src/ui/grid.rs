//! Timer card grid.
//!
//! One card per timer, in list order, one or two columns depending on the
//! terminal width. The grid scrolls so the selected card stays visible.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::app::App;
use crate::constants::layout;
use crate::progress::{format_duration_minutes, format_hms};
use crate::timer::{TimerEntry, TimerStatus};

use super::colors;
use super::ring::ProgressRing;
use super::utils::square_rect;

/// Number of card columns for a terminal `width` cells wide.
pub fn columns_for_width(width: u16) -> usize {
    if width >= layout::WIDE_BREAKPOINT {
        2
    } else {
        1
    }
}

/// First card row to draw so that `selected_row` is on screen.
fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    selected_row.saturating_sub(visible_rows.saturating_sub(1))
}

/// Draws the grid of timer cards.
pub fn draw_timer_grid(frame: &mut Frame, area: Rect, app: &App) {
    let entries = app.timers.entries();
    if entries.is_empty() {
        draw_no_timers(frame, area, app);
        return;
    }

    let columns = columns_for_width(frame.area().width);
    let visible_rows = usize::from((area.height / layout::CARD_HEIGHT).max(1));
    let selected_row = app.selected.unwrap_or(0) / columns;
    let first_row = first_visible_row(selected_row, visible_rows);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(layout::CARD_HEIGHT); visible_rows])
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col_idx, card_area) in cols.iter().enumerate() {
            let idx = (first_row + row_idx) * columns + col_idx;
            if let Some(entry) = entries.get(idx) {
                draw_timer_card(frame, *card_area, entry, app.selected == Some(idx));
            }
        }
    }
}

/// Draws a single timer card: ring, remaining time, duration and controls.
fn draw_timer_card(frame: &mut Frame, area: Rect, entry: &TimerEntry, is_selected: bool) {
    let border_color = if is_selected {
        colors::SELECTION
    } else {
        colors::BORDER
    };
    let (status_icon, status_color) = status_style(entry.status());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .border_set(if is_selected {
            symbols::border::THICK
        } else {
            symbols::border::ROUNDED
        })
        .title(Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled(entry.id.to_string(), Style::default().fg(colors::SECONDARY).bold()),
            Span::styled(" ", Style::default()),
        ]))
        .title_top(
            Line::from(vec![
                Span::styled(format!(" {status_icon} "), Style::default().fg(status_color)),
                Span::styled(entry.status().label(), Style::default().fg(status_color)),
                Span::styled(" ", Style::default()),
            ])
            .right_aligned(),
        )
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Ring
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    let fill = match entry.status() {
        TimerStatus::Running => colors::PRIMARY,
        TimerStatus::Paused => colors::WARNING,
        TimerStatus::Expired => colors::MUTED,
    };
    let ring = ProgressRing::new(entry.time_left_ms, entry.duration_ms)
        .colors(fill, colors::RING_TRACK)
        .label(format_hms(entry.time_left_ms), Style::default().fg(Color::White))
        .sublabel(
            format_duration_minutes(entry.duration_ms),
            Style::default().fg(colors::MUTED),
        );
    frame.render_widget(ring, square_rect(chunks[0]));

    frame.render_widget(controls_line(entry.status()), chunks[1]);
}

/// Icon and color for a timer's run state.
fn status_style(status: TimerStatus) -> (&'static str, Color) {
    match status {
        TimerStatus::Running => ("▶", colors::SUCCESS),
        TimerStatus::Paused => ("⏸", colors::WARNING),
        TimerStatus::Expired => ("✓", colors::MUTED),
    }
}

/// Delete on the left, pause/resume on the right.
fn controls_line(status: TimerStatus) -> Paragraph<'static> {
    let toggle = match status {
        TimerStatus::Running => Some("pause"),
        TimerStatus::Paused => Some("resume"),
        TimerStatus::Expired => None,
    };

    let mut spans = vec![
        Span::styled("d", Style::default().fg(colors::KEY).bold()),
        Span::styled(" ✕ delete", Style::default().fg(colors::MUTED)),
    ];
    if let Some(label) = toggle {
        spans.push(Span::styled("   ", Style::default()));
        spans.push(Span::styled("space", Style::default().fg(colors::KEY).bold()));
        spans.push(Span::styled(format!(" {label}"), Style::default().fg(colors::WARNING)));
    }

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Draws the empty state shown before the first timer is added.
fn draw_no_timers(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BORDER))
        .border_set(symbols::border::ROUNDED);

    let draft = app.timers.draft();
    let content = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("◷", Style::default().fg(colors::ACCENT))),
        Line::from(""),
        Line::from(Span::styled(
            "No timers yet",
            Style::default().fg(colors::PRIMARY).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Press Enter to start a {}:{}:{} timer",
                draft.hrs, draft.mins, draft.secs
            ),
            Style::default().fg(colors::SUCCESS),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'a' to change the duration first",
            Style::default().fg(colors::MUTED),
        )),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
