//! Circular progress indicator drawn on a braille canvas.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Points},
        Widget,
    },
};

use crate::constants::ring::{ARC_STEPS, CANVAS_HALF_EXTENT, RADIUS};
use crate::progress::arc_points;

/// A ring that unwinds as a timer runs down, with text in the middle.
pub struct ProgressRing {
    time_left_ms: u64,
    duration_ms: u64,
    fill: Color,
    track: Color,
    label: Option<(String, Style)>,
    sublabel: Option<(String, Style)>,
}

impl ProgressRing {
    pub fn new(time_left_ms: u64, duration_ms: u64) -> Self {
        Self {
            time_left_ms,
            duration_ms,
            fill: Color::White,
            track: Color::DarkGray,
            label: None,
            sublabel: None,
        }
    }

    pub fn colors(mut self, fill: Color, track: Color) -> Self {
        self.fill = fill;
        self.track = track;
        self
    }

    /// Main text, printed bold just above the center.
    pub fn label(mut self, text: impl Into<String>, style: Style) -> Self {
        self.label = Some((text.into(), style.add_modifier(Modifier::BOLD)));
        self
    }

    /// Secondary text, printed below the center.
    pub fn sublabel(mut self, text: impl Into<String>, style: Style) -> Self {
        self.sublabel = Some((text.into(), style));
        self
    }
}

/// X coordinate that centers `text_width` cells on a canvas `area_width` cells wide.
fn centered_x(text_width: usize, area_width: u16) -> f64 {
    let cell = 2.0 * CANVAS_HALF_EXTENT / f64::from(area_width.max(1));
    -(text_width as f64) * cell / 2.0
}

impl Widget for ProgressRing {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let arc = arc_points(self.time_left_ms, self.duration_ms, ARC_STEPS);
        let row = 2.0 * CANVAS_HALF_EXTENT / f64::from(area.height);

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-CANVAS_HALF_EXTENT, CANVAS_HALF_EXTENT])
            .y_bounds([-CANVAS_HALF_EXTENT, CANVAS_HALF_EXTENT])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: RADIUS,
                    color: self.track,
                });
                // Fill goes on its own layer so it wins shared cells
                ctx.layer();
                ctx.draw(&Points {
                    coords: &arc,
                    color: self.fill,
                });
                ctx.layer();

                if let Some((text, style)) = &self.label {
                    let x = centered_x(text.chars().count(), area.width);
                    ctx.print(x, row / 2.0, Span::styled(text.clone(), *style));
                }
                if let Some((text, style)) = &self.sublabel {
                    let x = centered_x(text.chars().count(), area.width);
                    ctx.print(x, -row, Span::styled(text.clone(), *style));
                }
            });

        canvas.render(area, buf);
    }
}
