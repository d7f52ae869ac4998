//! Help overlay rendering.

use ratatui::{
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::constants::dialog;

use super::colors;
use super::utils::centered_rect;

/// Draws a help overlay popup.
pub fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(dialog::HELP_WIDTH, dialog::HELP_HEIGHT, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let help = Paragraph::new(get_help_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::PRIMARY))
                .border_set(symbols::border::DOUBLE)
                .title(Line::from(vec![
                    Span::styled(" ", Style::default()),
                    Span::styled(" Help ", Style::default().fg(Color::White).bold()),
                    Span::styled(
                        "- Press any key to close ",
                        Style::default().fg(colors::MUTED),
                    ),
                ])),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}

/// One key binding row.
fn binding(keys: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("    ", Style::default()),
        Span::styled(format!("{keys:<12}"), Style::default().fg(colors::KEY).bold()),
        Span::styled(desc, Style::default().fg(Color::White)),
    ])
}

/// A section heading.
fn section(title: &'static str) -> Line<'static> {
    let style = Style::default().fg(colors::PRIMARY).bold();
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled("▸", style),
        Span::styled(format!(" {title}"), style),
    ])
}

/// Returns the help text content.
fn get_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from(""),
        section("TIMERS"),
        Line::from(""),
        binding("Enter", "Add a timer with the current duration"),
        binding("Space / p", "Pause or resume the selected timer"),
        binding("d / x", "Delete the selected timer"),
        binding("h j k l", "Move between timers (arrows work too)"),
        binding("g / G", "Jump to first / last timer"),
        Line::from(""),
        section("DURATION"),
        Line::from(""),
        binding("a / Tab", "Edit hours, minutes and seconds"),
        binding("Tab", "Next field (Shift+Tab previous)"),
        binding("Enter", "Add timer from the form"),
        binding("Esc", "Leave the form, keeping what you typed"),
        Line::from(""),
        section("GENERAL"),
        Line::from(""),
        binding("? / F1", "Show this help"),
        binding("q / Ctrl+C", "Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            "    Timers must be at least 10 seconds long.",
            Style::default().fg(colors::MUTED),
        )),
    ])
}
