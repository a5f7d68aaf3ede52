//! Marketing page rendering

use super::palette::Palette;
use crate::app::App;
use crate::content::resolve_image;
use crate::state::PageLine;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
    Frame,
};

/// Draw the visible slice of the page
pub fn draw(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let state = &app.state;
    let start = state.page_scroll as usize;
    let end = (start + area.height as usize).min(state.page.lines.len());

    let lines: Vec<Line> = state.page.lines[start.min(end)..end]
        .iter()
        .map(|line| render_line(line, app, palette))
        .collect();

    let block = Block::default()
        .padding(Padding::horizontal(2))
        .style(Style::default().bg(palette.background).fg(palette.text));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_line<'a>(line: &'a PageLine, app: &App, palette: &Palette) -> Line<'a> {
    match line {
        PageLine::Heading(text) => Line::from(Span::styled(
            text.as_str(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        PageLine::Text(text) => Line::from(text.as_str()),
        PageLine::Blank => Line::from(""),
        PageLine::Image { image, row } => render_image_row(*image, *row, app, palette),
    }
}

/// One row of a deferred image: the art once loaded, its alt text before
fn render_image_row<'a>(image: usize, row: u16, app: &App, palette: &Palette) -> Line<'a> {
    let Some(slot) = app.state.page.images.get(image) else {
        return Line::from("");
    };

    if app.state.images.is_loaded(image) {
        if let Some(art) = resolve_image(slot.asset.source) {
            let text = art.get(row as usize).copied().unwrap_or_default();
            return Line::from(Span::styled(text, Style::default().fg(palette.accent)))
                .alignment(Alignment::Center);
        }
    }

    if row == slot.asset.height / 2 {
        Line::from(Span::styled(
            format!("[ {} ]", slot.asset.alt),
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
    } else {
        Line::from("")
    }
}
