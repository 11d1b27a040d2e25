use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::AppError;

/// Local key-value preference file (a flat JSON object of strings).
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads one preference. A missing or unreadable file reads as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut prefs) => prefs.remove(key),
            Err(e) => {
                warn!("Ignoring preferences: {e}");
                None
            }
        }
    }

    /// Writes one preference, keeping the others.
    ///
    /// An existing file that cannot be read or parsed is left untouched and
    /// the write fails, so its other keys are never silently dropped.
    pub fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut prefs = self.read_all()?;
        prefs.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        let body = serde_json::to_string_pretty(&prefs)?;
        std::fs::write(&self.path, body).map_err(|e| AppError::io(&self.path, e))?;
        debug!("Saved preference '{key}' to {}", self.path.display());
        Ok(())
    }

    /// A missing file is an empty store.
    fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(AppError::io(&self.path, e)),
        };
        serde_json::from_str(&raw).map_err(|e| {
            AppError::Validation(format!(
                "malformed preferences at {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_set_then_get_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested/prefs.json"));
        store.set("i18n_redirected", "fr").unwrap();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(store.get("i18n_redirected").as_deref(), Some("fr"));
    }

    #[test]
    fn test_malformed_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(PreferenceStore::new(path).get("theme"), None);
    }

    #[test]
    fn test_set_refuses_to_overwrite_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let broken = "{ \"i18n_redirected\": \"fr\", ";
        std::fs::write(&path, broken).unwrap();

        let store = PreferenceStore::new(&path);
        let err = store.set("theme", "dark").unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn test_set_refuses_when_path_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be cannot be read as text
        let store = PreferenceStore::new(dir.path());
        let err = store.set("theme", "dark").unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
    }
}
