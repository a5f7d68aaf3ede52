//! Application state definitions

use super::forms::{booking_rules, BookingFormView, FieldState, FormController};
use super::header::HeaderScrollEffect;
use super::lazy_images::LazyImageLoader;
use super::nav::{is_compact, NavMenu, NavTarget, NAV_ITEMS};
use super::page::PageLayout;
use super::smooth_scroll::SmoothScroll;
use crate::content::SectionId;
use std::collections::VecDeque;
use std::time::Instant;

/// Rows taken by the header above the page
pub const HEADER_HEIGHT: u16 = 3;
/// Rows taken by the status bar
pub const STATUS_HEIGHT: u16 = 1;

/// Bordered single-line input
pub const FIELD_BOX_HEIGHT: u16 = 3;
/// Bordered multi-line input
pub const TEXTAREA_BOX_HEIGHT: u16 = 5;
/// Inline error text under every input
pub const FIELD_ERROR_HEIGHT: u16 = 1;
/// Success panel shown above the fields
pub const SUCCESS_PANEL_HEIGHT: u16 = 4;
pub const SUBMIT_ROW_HEIGHT: u16 = 3;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Scrollable marketing page
    #[default]
    Page,
    /// Booking form
    Booking,
}

/// Rows a form field occupies, error line included
pub fn field_height(field: &FieldState) -> u16 {
    let input = if field.is_multiline() {
        TEXTAREA_BOX_HEIGHT
    } else {
        FIELD_BOX_HEIGHT
    };
    input + FIELD_ERROR_HEIGHT
}

/// Top row and height of every focusable form row, submit button last
pub fn form_rows(form: &FormController, success_visible: bool) -> Vec<(u16, u16)> {
    let mut top = if success_visible {
        SUCCESS_PANEL_HEIGHT
    } else {
        0
    };
    let mut rows = Vec::with_capacity(form.row_count());
    for field in form.fields() {
        let height = field_height(field);
        rows.push((top, height));
        top += height;
    }
    rows.push((top, SUBMIT_ROW_HEIGHT));
    rows
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub nav_index: usize,
    pub nav_menu: NavMenu,
    pub compact_nav: bool,

    // Page
    pub page: PageLayout,
    pub page_scroll: u16,
    pub page_viewport_height: u16,
    pub scroll_animation: Option<SmoothScroll>,
    pub header: HeaderScrollEffect,
    pub images: LazyImageLoader,

    // Booking form
    pub form: FormController,
    pub form_view: BookingFormView,
    pub form_scroll: u16,
    pub form_viewport_height: u16,

    // Notices
    pub error_queue: VecDeque<String>,
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::Page,
            nav_index: 0,
            nav_menu: NavMenu::default(),
            compact_nav: false,
            page: PageLayout::default(),
            page_scroll: 0,
            page_viewport_height: 0,
            scroll_animation: None,
            header: HeaderScrollEffect::default(),
            images: LazyImageLoader::default(),
            form: FormController::new(booking_rules()),
            form_view: BookingFormView::default(),
            form_scroll: 0,
            form_viewport_height: 0,
            error_queue: VecDeque::new(),
            status_message: None,
        }
    }
}

impl AppState {
    // --- errors ----------------------------------------------------------

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_queue.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    // --- layout ----------------------------------------------------------

    /// Recompute layout for a terminal size
    pub fn relayout(&mut self, width: u16, height: u16) {
        let content_height = height.saturating_sub(HEADER_HEIGHT + STATUS_HEIGHT);
        self.page_viewport_height = content_height;
        self.form_viewport_height = content_height;

        self.compact_nav = is_compact(width);
        if !self.compact_nav {
            self.nav_menu.close();
        }

        if self.page.width != width || self.page.lines.is_empty() {
            self.page = PageLayout::build(width);
            for (id, slot) in self.page.images.iter().enumerate() {
                self.images.observe(id, slot.top, slot.asset.height);
            }
            tracing::debug!(
                rows = self.page.height(),
                images_pending = self.images.pending(),
                "Page laid out for width {width}"
            );
        }

        let max = self.page.max_scroll(self.page_viewport_height);
        if self.page_scroll > max {
            self.page_scroll = max;
            self.header.request_tick();
        }
        self.images.update(self.page_scroll, self.page_viewport_height);
        self.ensure_form_row_visible(self.form.active_index());
    }

    // --- page scrolling --------------------------------------------------

    /// Jump the page to an offset, cancelling any running animation
    pub fn set_page_scroll(&mut self, offset: u16) {
        self.scroll_animation = None;
        self.apply_page_scroll(offset);
    }

    pub fn scroll_page_by(&mut self, delta: i32) {
        let target = (self.page_scroll as i32 + delta).max(0);
        self.set_page_scroll(target.min(u16::MAX as i32) as u16);
    }

    fn apply_page_scroll(&mut self, offset: u16) {
        let offset = offset.min(self.page.max_scroll(self.page_viewport_height));
        if offset != self.page_scroll {
            self.page_scroll = offset;
            self.header.request_tick();
        }
        self.images.update(self.page_scroll, self.page_viewport_height);
    }

    /// Animate to a section, leaving one row above its heading
    pub fn scroll_to_section(&mut self, id: SectionId) -> bool {
        let Some(anchor) = self.page.anchor(id) else {
            return false;
        };
        let target = anchor
            .saturating_sub(1)
            .min(self.page.max_scroll(self.page_viewport_height));
        self.scroll_animation = Some(SmoothScroll::new(self.page_scroll, target));
        true
    }

    /// Skip link: jump straight past the hero to the main content
    pub fn skip_to_main(&mut self) {
        let main = self
            .page
            .anchors
            .get(1)
            .map(|(_, row)| *row)
            .unwrap_or_default();
        self.set_page_scroll(main);
    }

    pub fn is_animating(&self) -> bool {
        self.scroll_animation.is_some()
    }

    /// Advance per-frame effects
    pub fn tick(&mut self, now: Instant) {
        if let Some(animation) = self.scroll_animation {
            self.apply_page_scroll(animation.offset_at(now));
            if animation.is_finished_at(now) {
                self.scroll_animation = None;
            }
        }
        self.header.on_frame(self.page_scroll);
    }

    // --- navigation ------------------------------------------------------

    pub fn next_nav_item(&mut self) {
        self.nav_index = (self.nav_index + 1) % NAV_ITEMS.len();
    }

    pub fn prev_nav_item(&mut self) {
        self.nav_index = (self.nav_index + NAV_ITEMS.len() - 1) % NAV_ITEMS.len();
    }

    /// Follow a navigation link
    pub fn follow(&mut self, target: NavTarget) {
        match target {
            NavTarget::Section(id) => {
                self.leave_booking();
                self.scroll_to_section(id);
            }
            NavTarget::Booking => self.open_booking(),
        }
    }

    pub fn open_booking(&mut self) {
        self.current_view = View::Booking;
        self.nav_menu.close();
    }

    /// Return to the page; the active field loses focus and is validated
    pub fn leave_booking(&mut self) {
        if self.current_view == View::Booking {
            let active = self.form.active_index();
            self.form.blur(active, &mut self.form_view);
        }
        self.current_view = View::Page;
    }

    // --- booking form ----------------------------------------------------

    /// Scroll the form so a row is fully visible
    pub fn ensure_form_row_visible(&mut self, index: usize) {
        let rows = form_rows(&self.form, self.form_view.success_visible);
        let Some(&(top, height)) = rows.get(index) else {
            return;
        };
        let viewport = self.form_viewport_height.max(1);
        if top < self.form_scroll {
            self.form_scroll = top;
        } else if top + height > self.form_scroll + viewport {
            self.form_scroll = (top + height).saturating_sub(viewport);
        }
    }

    /// Bring the success panel into view
    pub fn scroll_form_to_success(&mut self) {
        self.form_scroll = 0;
    }
}
