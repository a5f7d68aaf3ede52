//! Booking form rendering

use super::field_renderer::draw_field;
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{form_rows, SUCCESS_PANEL_HEIGHT};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::palette::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Widest the form grows on large terminals
const MAX_FORM_WIDTH: u16 = 72;
const SUBMIT_BUTTON_WIDTH: u16 = 36;

/// Draw the booking form scrolled to `form_scroll`
pub fn draw_booking_form(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let state = &app.state;
    let view = &state.form_view;

    let background = Block::default()
        .padding(Padding::horizontal(2))
        .style(Style::default().bg(palette.background).fg(palette.text));
    let inner = background.inner(area);
    frame.render_widget(background, area);

    let width = inner.width.min(MAX_FORM_WIDTH);
    let scroll = state.form_scroll;
    let visible = |top: u16, height: u16| -> Option<Rect> {
        if top < scroll || top - scroll >= inner.height {
            return None;
        }
        let y = inner.y + (top - scroll);
        let height = height.min(inner.y + inner.height - y);
        Some(Rect::new(inner.x, y, width, height))
    };

    if view.success_visible {
        if let Some(rect) = visible(0, SUCCESS_PANEL_HEIGHT) {
            draw_success_panel(frame, rect, palette);
        }
    }

    let rows = form_rows(&state.form, view.success_visible);
    let active = state.form.active_index();

    for (index, field) in state.form.fields().iter().enumerate() {
        let (top, height) = rows[index];
        if let Some(rect) = visible(top, height) {
            draw_field(
                frame,
                rect,
                field,
                index == active,
                view.error_for(field.name()),
                view.is_invalid(field.name()),
                palette,
            );
        }
    }

    let (top, height) = rows[state.form.fields().len()];
    if let Some(mut rect) = visible(top, height.min(BUTTON_HEIGHT)) {
        rect.width = rect.width.min(SUBMIT_BUTTON_WIDTH);
        let label = if view.loading {
            "Sending...".to_string()
        } else {
            format!("Send Booking Request ({SUBMIT_SHORTCUT})")
        };
        render_button(
            frame,
            rect,
            &label,
            state.form.is_submit_row_active(),
            view.submit_enabled,
            palette.accent,
        );
    }
}

fn draw_success_panel(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(
            "Thank you! Your booking request has been sent.",
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("I'll be in touch within two working days."),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.success));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}
