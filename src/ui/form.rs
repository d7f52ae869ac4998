//! Duration form: hour, minute and second fields plus the add button.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, View};
use crate::timer_list::DraftField;

use super::colors;

/// Block cursor character for input fields.
pub(crate) const BLOCK_CURSOR: &str = "█";

/// Width of one field box.
const FIELD_WIDTH: u16 = 9;
/// Width of the add button.
const BUTTON_WIDTH: u16 = 17;

const FIELDS: [DraftField; 3] = [DraftField::Hours, DraftField::Minutes, DraftField::Seconds];

/// Draws the duration form.
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let focused = match app.current_view {
        View::Form(field) => Some(field),
        _ => None,
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .flex(Flex::Center)
        .spacing(2)
        .constraints([
            Constraint::Length(FIELD_WIDTH),
            Constraint::Length(FIELD_WIDTH),
            Constraint::Length(FIELD_WIDTH),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .split(area);

    for (field, field_area) in FIELDS.iter().zip(chunks.iter()) {
        draw_field(
            frame,
            *field_area,
            *field,
            app.timers.draft().field(*field),
            focused == Some(*field),
        );
    }

    draw_add_button(frame, chunks[3]);
}

/// Draws one labelled input box.
fn draw_field(frame: &mut Frame, area: Rect, field: DraftField, value: &str, is_focused: bool) {
    let (border_color, text_style) = if is_focused {
        (
            colors::ACCENT,
            Style::default().fg(Color::Black).bg(colors::ACCENT).bold(),
        )
    } else {
        (colors::BORDER, Style::default().fg(Color::White).bold())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .border_set(symbols::border::ROUNDED)
        .title(Line::from(Span::styled(
            format!(" {} ", field.short_label()),
            Style::default().fg(colors::MUTED),
        )));

    let mut spans = vec![Span::styled(value.to_string(), text_style)];
    if is_focused {
        spans.push(Span::styled(
            BLOCK_CURSOR,
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let content = vec![Line::from(""), Line::from(spans)];
    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Draws the "Add Timer" button.
fn draw_add_button(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SUCCESS))
        .border_set(symbols::border::ROUNDED);

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(colors::KEY).bold()),
            Span::styled(" Add Timer", Style::default().fg(colors::SUCCESS).bold()),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::timer::PausePolicy;
    use crate::timer_list::{DraftInput, TimerList};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    const WIDTH: u16 = 70;
    const HEIGHT: u16 = 5;

    fn render(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal
            .draw(|frame| draw_form(frame, frame.area(), app))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Left edges of the boxes, read from their rounded top-left corners.
    fn box_edges(buffer: &Buffer) -> Vec<u16> {
        (0..WIDTH).filter(|&x| buffer[(x, 0)].symbol() == "╭").collect()
    }

    fn cursor_cells(buffer: &Buffer) -> Vec<(u16, u16)> {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&pos| buffer[pos].symbol() == BLOCK_CURSOR)
            .collect()
    }

    fn app_focused_on(field: DraftField) -> App {
        let mut app = App::new(TimerList::new(
            DraftInput::new("00", "01", "00"),
            PausePolicy::Legacy,
        ));
        app.handle_event(Action::EditForm, 0);
        while app.current_view != View::Form(field) {
            app.handle_event(Action::NextField, 0);
        }
        app
    }

    #[test]
    fn test_cursor_only_in_focused_field() {
        for (idx, field) in FIELDS.iter().enumerate() {
            let buffer = render(&app_focused_on(*field));
            let edges = box_edges(&buffer);
            assert_eq!(edges.len(), 4);

            let cursors = cursor_cells(&buffer);
            assert_eq!(cursors.len(), 1, "one cursor while editing {}", field);
            let (x, _) = cursors[0];
            assert!(
                x > edges[idx] && x < edges[idx] + FIELD_WIDTH - 1,
                "cursor for {} drawn at column {}",
                field,
                x
            );
        }
    }

    #[test]
    fn test_no_cursor_outside_form() {
        let app = App::new(TimerList::default());
        let buffer = render(&app);
        assert!(cursor_cells(&buffer).is_empty());
    }

    #[test]
    fn test_field_order() {
        assert_eq!(FIELDS[0].next(), FIELDS[1]);
        assert_eq!(FIELDS[1].next(), FIELDS[2]);
        assert_eq!(FIELDS[2].next(), FIELDS[0]);
    }
}
