//! Layout components (header, navigation menu, status bar)

use super::palette::Palette;
use crate::app::App;
use crate::content::BRAND;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{
    HeaderStyle, NavTarget, Theme, View, HEADER_HEIGHT, NAV_ITEMS, STATUS_HEIGHT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Width of the compact navigation menu
const NAV_MENU_WIDTH: u16 = 24;

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Where the compact navigation menu drops down, below the header's right edge
pub fn nav_menu_area(area: Rect, item_count: usize) -> Rect {
    let width = NAV_MENU_WIDTH.min(area.width);
    let height = (item_count as u16 + 2).min(area.height.saturating_sub(HEADER_HEIGHT));
    Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y + HEADER_HEIGHT,
        width,
        height,
    }
}

/// Draw the header: brand, navigation links (or the menu button) and theme
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let style = app.state.header.style();
    let background = palette.header_background(style);
    let border_color = match style {
        HeaderStyle::Resting => palette.muted,
        HeaderStyle::Raised => palette.accent,
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(
        format!(" {BRAND} "),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )];

    if app.state.compact_nav {
        let label = if app.state.nav_menu.is_open() {
            " ✕ Close (n)"
        } else {
            " ≡ Menu (n)"
        };
        spans.push(Span::styled(label, Style::default().fg(palette.text)));
    } else {
        for (idx, item) in NAV_ITEMS.iter().enumerate() {
            let selected = match app.state.current_view {
                View::Page => idx == app.state.nav_index,
                View::Booking => item.target == NavTarget::Booking,
            };
            let item_style = if selected {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(palette.text)
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(item.label, item_style));
        }
    }

    let theme_icon = match app.theme.theme() {
        Theme::Dark => "☾",
        Theme::Light => "☀",
    };
    spans.push(Span::styled(
        format!("  {theme_icon} (t)"),
        Style::default().fg(palette.muted),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Draw the compact navigation menu overlay
pub fn draw_nav_menu(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let menu = &app.state.nav_menu;
    let menu_area = nav_menu_area(area, menu.items().len());
    frame.render_widget(Clear, menu_area);

    let items: Vec<ListItem> = menu
        .items()
        .iter()
        .map(|item| ListItem::new(format!(" {} ", item.label)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .style(Style::default().bg(palette.background)),
        )
        .style(Style::default().fg(palette.text))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌");

    let mut state = ListState::default().with_selected(Some(menu.selected));
    frame.render_stateful_widget(list, menu_area, &mut state);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mut spans = vec![Span::styled(
        format!(" {}", view_hints(app)),
        Style::default().fg(palette.text),
    )];

    // Live announcements from the booking form
    let announcement = match app.state.current_view {
        View::Booking => app.state.form_view.announcement.as_deref(),
        View::Page => None,
    };
    if let Some(msg) = announcement {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            msg,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(palette.success)));
    }

    let quit_hint = " ^C:quit ";
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(quit_hint.len() as u16),
        ])
        .split(area);

    let status_style = Style::default().bg(palette.status_background);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(status_style), chunks[0]);
    frame.render_widget(
        Paragraph::new(quit_hint).style(status_style.fg(palette.muted)),
        chunks[1],
    );
}

/// Keyboard hints for the current view
fn view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Page if app.state.nav_menu.is_open() => "j/k:nav  Enter:go  Esc:close".to_string(),
        View::Page if app.state.compact_nav => {
            "j/k:scroll  n:menu  m:skip to content  b:book".to_string()
        }
        View::Page => "j/k:scroll  Tab:links  Enter:go  m:skip to content  b:book".to_string(),
        View::Booking => {
            format!("Tab:next  ←/→:choose  {SUBMIT_SHORTCUT}:send  ^T:theme  Esc:back")
        }
    }
}
