//! Light/dark theme with a persisted preference

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Preference key holding the chosen theme
pub const THEME_KEY: &str = "theme";

/// Environment variable terminals use to advertise their colours
const COLORFGBG_ENV: &str = "COLORFGBG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Guess the terminal's theme from a `COLORFGBG` value such as `"15;0"`
///
/// The last component is the background colour index. Unknown or missing
/// values are treated as dark.
pub fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(7) | Some(9..=15) => Theme::Light,
        _ => Theme::Dark,
    }
}

/// The terminal's current theme preference
pub fn system_theme() -> Theme {
    theme_from_colorfgbg(std::env::var(COLORFGBG_ENV).ok().as_deref())
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key-value store for user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept in a JSON object on disk
#[derive(Debug, Clone, Default)]
pub struct JsonPreferenceStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl JsonPreferenceStore {
    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load preferences from `path`
    ///
    /// A missing or unreadable file starts an empty store; the file is
    /// (re)written on the next `set`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let values = match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt preferences at {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Could not read preferences at {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self {
            path: Some(path.to_path_buf()),
            values,
        }
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// Current theme, backed by a preference store
#[derive(Debug, Clone)]
pub struct ThemeToggle<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeToggle<S> {
    /// Start from the persisted preference, else the system theme
    pub fn new(store: S, system: Theme) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or(system);
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the visitor has chosen a theme explicitly
    pub fn has_preference(&self) -> bool {
        self.store
            .get(THEME_KEY)
            .is_some_and(|value| Theme::parse(&value).is_some())
    }

    /// Flip the theme and persist the choice
    ///
    /// The theme changes even if persisting fails.
    pub fn toggle(&mut self) -> Result<Theme, PreferenceError> {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = self.theme.as_str(), "Theme toggled");
        self.store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    /// Follow the system theme unless the visitor chose one
    pub fn on_system_change(&mut self, system: Theme) -> bool {
        if self.has_preference() || self.theme == system {
            return false;
        }
        self.theme = system;
        true
    }
}
