//! Application state module

mod app_state;
mod forms;
mod header;
mod lazy_images;
mod nav;
mod page;
mod smooth_scroll;
mod theme;

pub use app_state::*;
pub use forms::{FieldEdit, FieldKind, FieldState, SubmitAttempt};
#[cfg(test)]
pub use forms::{FormPhase, FAILURE_NOTICE};
pub use header::HeaderStyle;
pub use nav::{NavTarget, NAV_ITEMS};
pub use page::{wrap_text, PageLine};
pub use theme::{system_theme, JsonPreferenceStore, Theme, ThemeToggle};
