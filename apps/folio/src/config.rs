use std::path::PathBuf;

use anyhow::Result;

/// Application configuration loaded from environment variables.
/// Every value has a default; CLI flags override them in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub resume_path: PathBuf,
    pub content_dir: PathBuf,
    pub preferences_path: PathBuf,
    pub locale: String,
    /// System dark-mode signal. `None` when the host exposes none.
    pub prefers_dark: Option<bool>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Config {
            resume_path: or("FOLIO_RESUME_PATH", "data/resume.yml").into(),
            content_dir: or("FOLIO_CONTENT_DIR", "content").into(),
            preferences_path: or("FOLIO_PREFERENCES_PATH", ".folio/preferences.json").into(),
            locale: or("FOLIO_LOCALE", "fr"),
            prefers_dark: lookup("FOLIO_PREFERS_DARK").and_then(|v| parse_flag(&v)),
            rust_log: or("RUST_LOG", "info"),
        }
    }
}

/// Unrecognised values count as "no signal" rather than an error.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
