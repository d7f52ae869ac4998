//! Dialog rendering (alert, confirm).

use ratatui::{
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, ConfirmAction};
use crate::constants::dialog;
use crate::progress::format_hms;

use super::colors;
use super::utils::centered_rect;

/// Draws a blocking alert; any key dismisses it.
pub fn draw_alert_dialog(frame: &mut Frame, message: &str) {
    let area = centered_rect(dialog::ALERT_WIDTH, dialog::ALERT_HEIGHT, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::WARNING))
        .border_set(symbols::border::DOUBLE)
        .title(Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled("⚠", Style::default().fg(colors::WARNING)),
            Span::styled(" ", Style::default()),
            Span::styled("Alert", Style::default().fg(Color::White).bold()),
            Span::styled(" ", Style::default()),
        ]))
        .padding(Padding::uniform(1));

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(colors::WARNING).bold())),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled("any key", Style::default().fg(colors::KEY).bold()),
            Span::styled(" dismiss", Style::default().fg(colors::MUTED)),
        ]),
    ];

    let alert_widget = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(alert_widget, area);
}

/// Draws the confirmation dialog.
pub fn draw_confirm_dialog(frame: &mut Frame, action: &ConfirmAction, app: &App) {
    let (title, message) = match action {
        ConfirmAction::DeleteTimer(id) => {
            let remaining = app
                .timers
                .get(*id)
                .map(|t| format!(" with {} left", format_hms(t.time_left_ms)))
                .unwrap_or_default();
            (
                "Delete Timer",
                format!("Delete timer {id}{remaining}?\n\nIt cannot be brought back."),
            )
        }
    };

    let area = centered_rect(dialog::CONFIRM_WIDTH, dialog::CONFIRM_HEIGHT, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::ERROR))
        .border_set(symbols::border::DOUBLE)
        .title(Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled("✕", Style::default().fg(colors::ERROR)),
            Span::styled(" ", Style::default()),
            Span::styled(title, Style::default().fg(colors::ERROR).bold()),
            Span::styled(" ", Style::default()),
        ]))
        .padding(Padding::uniform(1));

    let mut content: Vec<Line> = vec![Line::from("")];
    content.extend(
        message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(colors::WARNING)))),
    );
    content.extend([
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled("Enter", Style::default().fg(colors::ERROR).bold()),
            Span::styled(" confirm deletion  ", Style::default().fg(colors::MUTED)),
            Span::styled("Esc", Style::default().fg(colors::KEY).bold()),
            Span::styled(" cancel", Style::default().fg(colors::MUTED)),
        ]),
    ]);

    let confirm_widget = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(confirm_widget, area);
}
