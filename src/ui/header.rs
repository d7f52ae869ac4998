//! Header rendering: title banner and timer counts.

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::timer::{PausePolicy, TimerStatus};

use super::colors;

/// Timer counts by run state: (running, paused, done).
fn status_counts(app: &App) -> (usize, usize, usize) {
    app.timers
        .entries()
        .iter()
        .fold((0, 0, 0), |(running, paused, done), entry| match entry.status() {
            TimerStatus::Running => (running + 1, paused, done),
            TimerStatus::Paused => (running, paused + 1, done),
            TimerStatus::Expired => (running, paused, done + 1),
        })
}

/// Draws the header with the title and a summary of all timers.
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = Style::default().fg(colors::BORDER);
    let dim_style = Style::default().fg(Color::Rgb(55, 65, 81));
    let muted_style = Style::default().fg(Color::Rgb(75, 85, 99));

    let (running, paused, done) = status_counts(app);
    let mode = match app.timers.pause_policy() {
        PausePolicy::Legacy => "pause: legacy",
        PausePolicy::Freeze => "pause: freeze",
    };

    let line0 = Line::from(vec![
        Span::styled("┏", Style::default().fg(colors::ACCENT)),
        Span::styled("━━━━━━━━━━━━━━━━━━━━━━━", border_style),
        Span::styled("┓", Style::default().fg(colors::PRIMARY)),
        Span::styled("░▒▓", dim_style),
        Span::styled("╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍", dim_style),
    ]);

    let line1 = Line::from(vec![
        Span::styled("┃", Style::default().fg(colors::ACCENT)),
        Span::styled(" ◷ ", Style::default().fg(colors::ACCENT)),
        Span::styled("MULTI", Style::default().fg(colors::PRIMARY).bold()),
        Span::styled("::", muted_style),
        Span::styled("TIMER", Style::default().fg(colors::KEY).bold()),
        Span::styled(format!(" v{:<7}", env!("CARGO_PKG_VERSION")), border_style),
        Span::styled("┃", Style::default().fg(colors::PRIMARY)),
        Span::styled("  ▪ ", Style::default().fg(colors::SUCCESS)),
        Span::styled(format!("{running} running"), Style::default().fg(colors::MUTED)),
        Span::styled("  ▪ ", Style::default().fg(colors::WARNING)),
        Span::styled(format!("{paused} paused"), Style::default().fg(colors::MUTED)),
        Span::styled("  ▪ ", Style::default().fg(colors::SECONDARY)),
        Span::styled(format!("{done} done"), Style::default().fg(colors::MUTED)),
        Span::styled("  │ ", dim_style),
        Span::styled(mode, muted_style),
    ]);

    let line2 = Line::from(vec![
        Span::styled("┗", Style::default().fg(colors::ACCENT)),
        Span::styled("━━━━━━━━━━━━━━━━━━━━━━━", border_style),
        Span::styled("┛", Style::default().fg(colors::PRIMARY)),
    ]);

    let header = Paragraph::new(vec![line0, line1, line2]);
    frame.render_widget(header, area);
}
