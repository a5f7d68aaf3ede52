//! Modal failure notice

use crate::state::wrap_text;
use crate::ui::palette::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
    Frame,
};

const DIALOG_MAX_WIDTH: u16 = 56;
/// Borders plus horizontal padding
const DIALOG_CHROME_WIDTH: u16 = 6;
const TITLE: &str = " Something went wrong ";

/// Render the oldest queued error centered over the screen
pub fn render_error_dialog(frame: &mut Frame, message: &str, pending: usize, palette: &Palette) {
    let screen = frame.area();
    let width = DIALOG_MAX_WIDTH.min(screen.width);
    let text_width = width.saturating_sub(DIALOG_CHROME_WIDTH).max(1) as usize;

    let mut content: Vec<Line> = wrap_text(message, text_width)
        .into_iter()
        .map(Line::from)
        .collect();
    content.push(Line::from(""));
    content.push(dismiss_hint(pending, palette));

    let area = centered(screen, width, content.len() as u16 + 2);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.error))
        .title(Span::styled(
            TITLE,
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(2));
    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );
}

fn dismiss_hint<'a>(pending: usize, palette: &Palette) -> Line<'a> {
    let key = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled("Enter", key),
        Span::raw(" / "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ];
    if pending > 1 {
        spans.push(Span::styled(
            format!("  (1 of {pending})"),
            Style::default().fg(palette.muted),
        ));
    }
    Line::from(spans)
}

/// A `width` x `height` box in the middle of `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
