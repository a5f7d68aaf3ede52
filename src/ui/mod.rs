//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod page;
mod palette;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use palette::Palette;
use ratatui::{style::Style, widgets::Block, Frame};

pub use layout::nav_menu_area;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = Palette::for_theme(app.theme.theme());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let (header_area, content_area, status_area) = layout::create_layout(area);

    // Draw main content based on current view
    match app.state.current_view {
        View::Page => page::draw(frame, content_area, app, &palette),
        View::Booking => forms::draw_booking_form(frame, content_area, app, &palette),
    }

    layout::draw_header(frame, header_area, app, &palette);
    if app.state.nav_menu.is_open() {
        layout::draw_nav_menu(frame, area, app, &palette);
    }
    layout::draw_status_bar(frame, status_area, app, &palette);

    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.error_queue.len(), &palette);
    }
}
