use once_cell::sync::OnceCell;

use crate::config::Config;
use crate::errors::AppError;
use crate::resume::{load_resume, Resume};
use crate::theme::{PreferenceStore, SystemEnvironment};

/// Shared application state handed to every command handler.
pub struct AppState {
    pub config: Config,
    /// Parsed on first use, then immutable for the process lifetime.
    resume: OnceCell<Resume>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            resume: OnceCell::new(),
        }
    }

    pub fn resume(&self) -> Result<&Resume, AppError> {
        self.resume
            .get_or_try_init(|| load_resume(&self.config.resume_path))
    }

    pub fn preferences(&self) -> PreferenceStore {
        PreferenceStore::new(&self.config.preferences_path)
    }

    pub fn theme_environment(&self) -> SystemEnvironment {
        SystemEnvironment {
            store: self.preferences(),
            prefers_dark: self.config.prefers_dark,
        }
    }
}
