//! Layout helpers shared by the renderers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Returns a rectangle centered in `area`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Returns the widest rectangle inside `area` in which a circle looks round.
///
/// Terminal cells are about twice as tall as they are wide.
pub fn square_rect(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).max(1).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
