//! Light/dark color-mode preference, resolved once per process.
//!
//! Resolution order: saved `theme` preference, then the system dark-mode
//! signal, then `light`. Hosts without storage or a signal stay `light`.

pub mod preferences;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
pub use preferences::PreferenceStore;

/// Preference key under which the chosen mode is persisted.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(AppError::Validation(format!(
                "unknown color mode '{other}' (expected 'light' or 'dark')"
            ))),
        }
    }
}

/// Where the environment's theme signals come from.
/// Both reads are infallible: unavailable means `None`.
pub trait ThemeEnvironment {
    fn saved_theme(&self) -> Option<String>;
    fn prefers_dark(&self) -> Option<bool>;
}

/// Non-interactive host: no storage, no system signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessEnvironment;

impl ThemeEnvironment for HeadlessEnvironment {
    fn saved_theme(&self) -> Option<String> {
        None
    }

    fn prefers_dark(&self) -> Option<bool> {
        None
    }
}

/// Interactive host: a preference file plus the configured dark-mode signal.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    pub store: PreferenceStore,
    pub prefers_dark: Option<bool>,
}

impl ThemeEnvironment for SystemEnvironment {
    fn saved_theme(&self) -> Option<String> {
        self.store.get(THEME_KEY)
    }

    fn prefers_dark(&self) -> Option<bool> {
        self.prefers_dark
    }
}

/// One resolution pass over the environment.
pub fn resolve_color_mode(env: &dyn ThemeEnvironment) -> ColorMode {
    if let Some(saved) = env.saved_theme() {
        match saved.parse::<ColorMode>() {
            Ok(mode) => return mode,
            Err(e) => debug!("Ignoring saved theme: {e}"),
        }
    }
    match env.prefers_dark() {
        Some(true) => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}

/// Session-wide color mode: resolved on first read, cached afterwards.
#[derive(Debug, Default)]
pub struct ColorModeState {
    resolved: OnceCell<ColorMode>,
}

impl ColorModeState {
    pub const fn new() -> Self {
        Self {
            resolved: OnceCell::new(),
        }
    }

    pub fn get(&self, env: &dyn ThemeEnvironment) -> ColorMode {
        *self.resolved.get_or_init(|| {
            let mode = resolve_color_mode(env);
            info!("Color mode resolved to {mode}");
            mode
        })
    }
}

static COLOR_MODE: ColorModeState = ColorModeState::new();

/// The process-wide color-mode state.
pub fn color_mode_state() -> &'static ColorModeState {
    &COLOR_MODE
}

/// Persists `mode` for the next session. The current session keeps its value.
pub fn save_color_mode(store: &PreferenceStore, mode: ColorMode) -> Result<(), AppError> {
    store.set(THEME_KEY, mode.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeEnv {
        saved: Option<&'static str>,
        dark: Option<bool>,
        reads: Cell<usize>,
    }

    impl FakeEnv {
        fn new(saved: Option<&'static str>, dark: Option<bool>) -> Self {
            Self {
                saved,
                dark,
                reads: Cell::new(0),
            }
        }
    }

    impl ThemeEnvironment for FakeEnv {
        fn saved_theme(&self) -> Option<String> {
            self.reads.set(self.reads.get() + 1);
            self.saved.map(str::to_string)
        }

        fn prefers_dark(&self) -> Option<bool> {
            self.dark
        }
    }

    #[test]
    fn test_default_is_light_without_signals() {
        assert_eq!(resolve_color_mode(&FakeEnv::new(None, None)), ColorMode::Light);
        assert_eq!(resolve_color_mode(&HeadlessEnvironment), ColorMode::Light);
    }

    #[test]
    fn test_saved_preference_wins_over_system() {
        assert_eq!(
            resolve_color_mode(&FakeEnv::new(Some("light"), Some(true))),
            ColorMode::Light
        );
    }

    #[test]
    fn test_system_signal_used_when_nothing_saved() {
        assert_eq!(resolve_color_mode(&FakeEnv::new(None, Some(true))), ColorMode::Dark);
        assert_eq!(resolve_color_mode(&FakeEnv::new(None, Some(false))), ColorMode::Light);
    }

    #[test]
    fn test_unknown_saved_value_falls_through() {
        assert_eq!(
            resolve_color_mode(&FakeEnv::new(Some("sepia"), Some(true))),
            ColorMode::Dark
        );
    }

    #[test]
    fn test_state_resolves_once() {
        let state = ColorModeState::new();
        let env = FakeEnv::new(Some("dark"), None);
        assert_eq!(state.get(&env), ColorMode::Dark);
        assert_eq!(state.get(&env), ColorMode::Dark);
        assert_eq!(state.get(&HeadlessEnvironment), ColorMode::Dark);
        assert_eq!(env.reads.get(), 1);
    }

    #[test]
    fn test_system_environment_reads_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        save_color_mode(&store, ColorMode::Dark).unwrap();
        let env = SystemEnvironment {
            store,
            prefers_dark: Some(false),
        };
        assert_eq!(resolve_color_mode(&env), ColorMode::Dark);
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!("blue".parse::<ColorMode>().is_err());
        assert_eq!("dark".parse::<ColorMode>().unwrap(), ColorMode::Dark);
    }
}
