//! Field rendering utilities for forms

use crate::state::{FieldKind, FieldState, FIELD_ERROR_HEIGHT};
use crate::ui::palette::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a field box with its error line underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldState,
    is_active: bool,
    error: Option<&str>,
    is_invalid: bool,
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(FIELD_ERROR_HEIGHT)])
        .split(area);

    let border_style = if is_invalid {
        Style::default().fg(palette.error)
    } else if is_active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    let text_style = if is_active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.text)
    };
    let cursor = Span::styled("▌", Style::default().fg(palette.accent));

    let display_value = field.display_value();
    let content = match field.rule.kind {
        FieldKind::Select(_) => {
            let mut spans = Vec::new();
            if is_active {
                spans.push(Span::styled("◂ ", Style::default().fg(palette.muted)));
            }
            let style = if field.value.is_empty() {
                Style::default().fg(palette.muted)
            } else {
                text_style
            };
            spans.push(Span::styled(display_value, style));
            if is_active {
                spans.push(Span::styled(" ▸", Style::default().fg(palette.muted)));
            }
            Paragraph::new(Line::from(spans))
        }
        _ if field.is_multiline() => {
            let mut lines: Vec<Line> = display_value
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
                .collect();
            if is_active {
                if let Some(last) = lines.last_mut() {
                    last.spans.push(cursor);
                }
            }
            Paragraph::new(lines)
        }
        _ => {
            let mut spans = vec![Span::styled(display_value, text_style)];
            if is_active {
                spans.push(cursor);
            }
            Paragraph::new(Line::from(spans))
        }
    };

    let marker = if field.rule.required { " *" } else { "" };
    let block = Block::default()
        .title(format!(" {}{} ", field.label(), marker))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), chunks[0]);

    if let Some(message) = error {
        let error_line = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(error_line, chunks[1]);
    }
}
