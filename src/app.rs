//! Application state and core logic

use crate::config::SiteConfig;
use crate::state::{
    system_theme, AppState, FieldEdit, JsonPreferenceStore, SubmitAttempt, Theme, ThemeToggle,
    View, HEADER_HEIGHT, NAV_ITEMS,
};
use crate::transport::{build_transport, Receipt, SubmissionError, Transport};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot::{self, error::TryRecvError};

type SubmissionResult = Result<Receipt, SubmissionError>;

/// Rows scrolled per mouse wheel notch
const WHEEL_STEP: i32 = 3;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Light/dark theme with its persisted preference
    pub theme: ThemeToggle<JsonPreferenceStore>,
    /// Where completed booking forms are sent
    transport: Arc<dyn Transport>,
    /// Outcome of the in-flight submission, if any
    pending: Option<oneshot::Receiver<SubmissionResult>>,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let transport = build_transport(&config.transport)?;
        let store = match SiteConfig::preferences_path() {
            Some(path) => JsonPreferenceStore::load(path),
            None => JsonPreferenceStore::in_memory(),
        };
        Ok(Self::with_parts(
            transport,
            ThemeToggle::new(store, system_theme()),
        ))
    }

    pub fn with_parts(
        transport: Arc<dyn Transport>,
        theme: ThemeToggle<JsonPreferenceStore>,
    ) -> Self {
        Self {
            state: AppState::default(),
            theme,
            transport,
            pending: None,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the event loop should poll at frame rate
    pub fn is_busy(&self) -> bool {
        self.state.is_animating() || self.is_submitting()
    }

    /// Record a new terminal size and lay the page out for it
    pub fn relayout(&mut self, width: u16, height: u16) {
        self.terminal_size = Some((height, width));
        self.state.relayout(width, height);
    }

    /// Advance animations and collect a finished submission
    pub fn tick(&mut self, now: Instant) {
        self.state.tick(now);
        self.poll_submission();
    }

    // --- keyboard --------------------------------------------------------

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        self.state.status_message = None;

        if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.toggle_theme();
            return;
        }

        match self.state.current_view {
            View::Page => self.handle_page_key(key),
            View::Booking => self.handle_booking_key(key),
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        if self.state.nav_menu.is_open() {
            self.handle_nav_menu_key(key);
            return;
        }

        let viewport = self.state.page_viewport_height.max(1) as i32;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_page_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_page_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.state.scroll_page_by(viewport),
            KeyCode::PageUp => self.state.scroll_page_by(-viewport),
            KeyCode::Home | KeyCode::Char('g') => self.state.set_page_scroll(0),
            KeyCode::End | KeyCode::Char('G') => self.state.set_page_scroll(u16::MAX),
            KeyCode::Tab | KeyCode::Right => self.state.next_nav_item(),
            KeyCode::BackTab | KeyCode::Left => self.state.prev_nav_item(),
            KeyCode::Enter => {
                let item = NAV_ITEMS[self.state.nav_index];
                self.state.follow(item.target);
            }
            KeyCode::Char('n') if self.state.compact_nav => self.state.nav_menu.toggle(),
            KeyCode::Char('m') => self.state.skip_to_main(),
            KeyCode::Char('b') => self.state.open_booking(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_nav_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.state.nav_menu.select_next()
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.state.nav_menu.select_prev()
            }
            KeyCode::Enter => {
                let selected = self.state.nav_menu.selected;
                if let Some(item) = self.state.nav_menu.activate(selected) {
                    self.state.follow(item.target);
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => self.state.nav_menu.close(),
            _ => {}
        }
    }

    fn handle_booking_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let state = &mut self.state;
        let presenter = &mut state.form_view;

        match key.code {
            KeyCode::Char('s') if ctrl => {
                self.submit();
                return;
            }
            KeyCode::Esc => {
                state.leave_booking();
                return;
            }
            KeyCode::Tab | KeyCode::Down => state.form.focus_next(presenter),
            KeyCode::BackTab | KeyCode::Up => state.form.focus_prev(presenter),
            KeyCode::Enter if state.form.is_submit_row_active() => {
                self.submit();
                return;
            }
            KeyCode::Enter => {
                let multiline = state.form.active_field().is_some_and(|f| f.is_multiline());
                if multiline {
                    state.form.edit(FieldEdit::Newline, presenter);
                } else {
                    state.form.focus_next(presenter);
                }
            }
            KeyCode::Right => {
                state.form.edit(FieldEdit::NextOption, presenter);
            }
            KeyCode::Left => {
                state.form.edit(FieldEdit::PrevOption, presenter);
            }
            KeyCode::Backspace => {
                state.form.edit(FieldEdit::Backspace, presenter);
            }
            KeyCode::Char(c) if !ctrl => {
                state.form.edit(FieldEdit::Insert(c), presenter);
            }
            _ => {}
        }

        let active = state.form.active_index();
        state.ensure_form_row_visible(active);
        self.drain_form_effects();
    }

    // --- mouse -----------------------------------------------------------

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state.has_errors() {
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        match self.state.current_view {
            View::Page => self.state.scroll_page_by(delta),
            View::Booking => {
                let scroll = (self.state.form_scroll as i32 + delta).max(0);
                self.state.form_scroll = scroll.min(u16::MAX as i32) as u16;
            }
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if !self.state.nav_menu.is_open() {
            return;
        }
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        let menu = crate::ui::nav_menu_area(
            Rect::new(0, 0, width, height),
            self.state.nav_menu.items().len(),
        );
        let position = Position::new(column, row);

        if menu.contains(position) {
            // Items sit inside the menu border, one per row
            let index = row.saturating_sub(menu.y + 1) as usize;
            if row > menu.y {
                if let Some(item) = self.state.nav_menu.activate(index) {
                    self.state.follow(item.target);
                }
            }
            return;
        }
        self.state.nav_menu.click(row < HEADER_HEIGHT);
    }

    /// The terminal regained focus; follow the system theme if the visitor
    /// has not picked one
    pub fn handle_focus_gained(&mut self) {
        if self.theme.on_system_change(system_theme()) {
            tracing::debug!(theme = self.theme.theme().as_str(), "Following system theme");
        }
    }

    // --- theme -----------------------------------------------------------

    fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(theme) => {
                self.state.status_message = Some(format!("{} theme", label_for(theme)));
            }
            Err(err) => {
                tracing::warn!("Failed to save theme preference: {err}");
                self.state.status_message =
                    Some(format!("{} theme (not saved)", label_for(self.theme.theme())));
            }
        }
    }

    // --- submission ------------------------------------------------------

    /// Start a submit attempt; a valid form is handed to the transport on a
    /// background task
    pub fn submit(&mut self) {
        let state = &mut self.state;
        match state.form.begin_submit(&mut state.form_view) {
            SubmitAttempt::Started(request) => {
                let (tx, rx) = oneshot::channel();
                let transport = Arc::clone(&self.transport);
                tokio::spawn(async move {
                    let result = transport.submit(&request).await;
                    // The receiver is gone only if the app is shutting down
                    let _ = tx.send(result);
                });
                self.pending = Some(rx);
            }
            SubmitAttempt::Invalid { .. } | SubmitAttempt::Ignored => {}
        }
        self.drain_form_effects();
    }

    /// Collect the outcome of the in-flight submission if it has arrived
    pub fn poll_submission(&mut self) -> bool {
        let Some(receiver) = self.pending.as_mut() else {
            return false;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(SubmissionError::Network(
                "submission task ended without a result".to_string(),
            )),
        };
        self.pending = None;

        let state = &mut self.state;
        state.form.finish_submit(result, &mut state.form_view);
        self.drain_form_effects();
        true
    }

    /// Apply the one-shot requests the form left on its view
    fn drain_form_effects(&mut self) {
        let state = &mut self.state;

        if state.form_view.take_focus_request().is_some() {
            let active = state.form.active_index();
            state.ensure_form_row_visible(active);
        }
        if state.form_view.take_scroll_to_success() {
            state.scroll_form_to_success();
        }
        for failure in state.form_view.take_failures() {
            state.push_error(failure);
        }
    }
}

fn label_for(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormPhase, FAILURE_NOTICE};
    use crate::transport::MockTransport;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app_with(transport: MockTransport) -> App {
        let theme = ThemeToggle::new(JsonPreferenceStore::in_memory(), Theme::Dark);
        let mut app = App::with_parts(Arc::new(transport), theme);
        app.relayout(100, 30);
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Fill every required field from the top of the form
    fn fill_valid_form(app: &mut App) {
        app.handle_key(key(KeyCode::Char('b')));
        type_text(app, "Jo Smith");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "jo@example.com");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "34");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "Weekday mornings");
    }

    /// Let the spawned transport task run until its result is collected
    async fn settle(app: &mut App) {
        for _ in 0..100 {
            if app.poll_submission() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("submission never completed");
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_form_never_reaches_transport() {
            let mut transport = MockTransport::new();
            transport.expect_submit().never();
            let mut app = app_with(transport);

            app.handle_key(key(KeyCode::Char('b')));
            app.handle_key(ctrl('s'));

            assert!(!app.is_submitting());
            assert_eq!(app.state.form.phase(), FormPhase::Idle);
            assert_eq!(app.state.form.active_index(), 0);
            assert!(app.state.form_view.is_invalid("fullName"));
        }

        #[tokio::test]
        async fn test_double_submit_sends_once() {
            let mut transport = MockTransport::new();
            transport
                .expect_submit()
                .withf(|req| req.get("fullName") == Some("Jo Smith"))
                .times(1)
                .returning(|_| Ok(Receipt::default()));
            let mut app = app_with(transport);

            fill_valid_form(&mut app);
            app.handle_key(ctrl('s'));
            assert!(app.is_submitting());
            assert!(app.state.form_view.loading);
            assert!(!app.state.form_view.submit_enabled);

            app.handle_key(ctrl('s'));
            settle(&mut app).await;

            assert_eq!(app.state.form.phase(), FormPhase::Success);
            assert!(app.state.form_view.success_visible);
            assert!(!app.state.form_view.loading);
            assert!(app.state.form_view.submit_enabled);
            assert_eq!(app.state.form_scroll, 0);
            assert_eq!(app.state.form.field("fullName").unwrap().value, "");
        }

        #[tokio::test]
        async fn test_failure_opens_error_dialog_and_keeps_values() {
            let mut transport = MockTransport::new();
            transport
                .expect_submit()
                .times(1)
                .returning(|_| Err(SubmissionError::Rejected { status: 503 }));
            let mut app = app_with(transport);

            fill_valid_form(&mut app);
            app.handle_key(ctrl('s'));
            settle(&mut app).await;

            assert_eq!(app.state.form.phase(), FormPhase::Error);
            assert_eq!(app.state.current_error(), Some(FAILURE_NOTICE));
            assert_eq!(app.state.form.field("email").unwrap().value, "jo@example.com");

            // The dialog is modal until dismissed
            app.handle_key(key(KeyCode::Char('x')));
            assert_eq!(app.state.form.field("availability").unwrap().value, "Weekday mornings");
            app.handle_key(key(KeyCode::Enter));
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_submit_row_enter_submits() {
            let mut transport = MockTransport::new();
            transport
                .expect_submit()
                .times(1)
                .returning(|_| Ok(Receipt::with_message("Sent")));
            let mut app = app_with(transport);

            fill_valid_form(&mut app);
            // Message, then the submit button
            app.handle_key(key(KeyCode::Tab));
            app.handle_key(key(KeyCode::Tab));
            assert!(app.state.form.is_submit_row_active());
            app.handle_key(key(KeyCode::Enter));
            settle(&mut app).await;

            assert_eq!(app.state.form_view.announcement.as_deref(), Some("Sent"));
        }
    }

    mod booking_keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_enter_adds_newline_only_in_textarea() {
            let mut app = app_with(MockTransport::new());
            app.handle_key(key(KeyCode::Char('b')));
            app.handle_key(key(KeyCode::Enter));
            // Enter on a single-line field moves on
            assert_eq!(app.state.form.active_index(), 1);

            for _ in 0..3 {
                app.handle_key(key(KeyCode::Tab));
            }
            type_text(&mut app, "Mon");
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "Tue");
            assert_eq!(app.state.form.field("availability").unwrap().value, "Mon\nTue");
        }

        #[tokio::test]
        async fn test_escape_returns_to_page_keeping_input() {
            let mut app = app_with(MockTransport::new());
            app.handle_key(key(KeyCode::Char('b')));
            type_text(&mut app, "Jo");
            app.handle_key(key(KeyCode::Esc));
            assert_eq!(app.state.current_view, View::Page);
            app.handle_key(key(KeyCode::Char('b')));
            assert_eq!(app.state.form.field("fullName").unwrap().value, "Jo");
        }

        #[tokio::test]
        async fn test_escape_validates_field_losing_focus() {
            let mut app = app_with(MockTransport::new());
            app.handle_key(key(KeyCode::Char('b')));
            type_text(&mut app, "J");
            app.handle_key(key(KeyCode::Esc));

            let field = app.state.form.field("fullName").unwrap();
            assert_eq!(field.value, "J");
            assert!(field.last_outcome.is_some());
            assert!(field.is_invalid());
            assert!(app.state.form_view.is_invalid("fullName"));
        }
    }

    mod page_keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_theme_toggle_keys() {
            let mut app = app_with(MockTransport::new());
            app.handle_key(key(KeyCode::Char('t')));
            assert_eq!(app.theme.theme(), Theme::Light);
            app.handle_key(key(KeyCode::Char('b')));
            app.handle_key(ctrl('t'));
            assert_eq!(app.theme.theme(), Theme::Dark);
            // Plain 't' in the form is typing
            assert_eq!(app.state.form.field("fullName").unwrap().value, "");
        }

        #[tokio::test]
        async fn test_system_theme_ignored_after_toggle() {
            let mut app = app_with(MockTransport::new());
            app.handle_key(key(KeyCode::Char('t')));
            app.handle_focus_gained();
            assert_eq!(app.theme.theme(), Theme::Light);
        }

        #[tokio::test]
        async fn test_compact_menu_navigates_and_closes() {
            let mut app = app_with(MockTransport::new());
            app.relayout(60, 30);

            app.handle_key(key(KeyCode::Char('n')));
            assert!(app.state.nav_menu.is_open());
            app.handle_key(key(KeyCode::Up));
            app.handle_key(key(KeyCode::Enter));

            assert!(!app.state.nav_menu.is_open());
            assert_eq!(app.state.current_view, View::Booking);
        }

        #[tokio::test]
        async fn test_menu_key_ignored_on_wide_terminal() {
            let mut app = app_with(MockTransport::new());
            app.handle_key(key(KeyCode::Char('n')));
            assert!(!app.state.nav_menu.is_open());
        }

        #[tokio::test]
        async fn test_click_outside_closes_menu() {
            let mut app = app_with(MockTransport::new());
            app.relayout(60, 30);
            app.handle_key(key(KeyCode::Char('n')));

            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 2,
                row: 20,
                modifiers: KeyModifiers::NONE,
            });
            assert!(!app.state.nav_menu.is_open());
        }

        #[tokio::test]
        async fn test_nav_enter_scrolls_to_section() {
            let mut app = app_with(MockTransport::new());
            app.handle_key(key(KeyCode::Tab));
            app.handle_key(key(KeyCode::Enter));
            assert!(app.state.is_animating());
            assert!(app.is_busy());
        }
    }
}
