//! Local persistence for user preferences.
//!
//! Only one value is stored: the dark-mode flag. On the web it lives in
//! `window.localStorage` under [`DARK_MODE_KEY`]; natively it is a small JSON
//! preferences file in the platform config directory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed storage key for the dark-mode preference.
pub const DARK_MODE_KEY: &str = "chartroom.dark-mode";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage backend rejected the write: {0}")]
    Backend(String),
    #[error("preferences file could not be read or written: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences are malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Serialized preferences document (native backend).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "chartroom.dark-mode", default)]
    pub dark_mode: bool,
}

impl Preferences {
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Interprets a stored flag. Anything other than `"true"` reads as light mode.
pub fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("true"))
}

/// Read the dark-mode preference, defaulting to light mode on any failure.
pub fn load_dark_mode() -> bool {
    match backend::read_dark_mode() {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, "couldn't read dark-mode preference; using light mode");
            false
        }
    }
}

pub fn save_dark_mode(enabled: bool) -> Result<(), StorageError> {
    backend::write_dark_mode(enabled)
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::{parse_flag, StorageError, DARK_MODE_KEY};

    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    pub(super) fn read_dark_mode() -> Result<bool, StorageError> {
        let storage = local_storage()?;
        let raw = storage
            .get_item(DARK_MODE_KEY)
            .map_err(|_| StorageError::Unavailable)?;
        Ok(parse_flag(raw.as_deref()))
    }

    pub(super) fn write_dark_mode(enabled: bool) -> Result<(), StorageError> {
        local_storage()?
            .set_item(DARK_MODE_KEY, if enabled { "true" } else { "false" })
            .map_err(|err| StorageError::Backend(format!("{err:?}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::fs;
    use std::path::{Path, PathBuf};

    use directories::ProjectDirs;

    use super::{Preferences, StorageError};

    const PREFERENCES_FILE: &str = "preferences.json";

    fn preferences_path() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("org", "Chartroom", "Chartroom")
            .map(|dirs| dirs.config_dir().join(PREFERENCES_FILE))
            .ok_or(StorageError::Unavailable)
    }

    pub(super) fn read_from(path: &Path) -> Result<Preferences, StorageError> {
        match fs::read_to_string(path) {
            Ok(raw) => Preferences::from_json(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub(super) fn write_to(path: &Path, prefs: &Preferences) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, prefs.to_json()?)?;
        Ok(())
    }

    pub(super) fn read_dark_mode() -> Result<bool, StorageError> {
        Ok(read_from(&preferences_path()?)?.dark_mode)
    }

    pub(super) fn write_dark_mode(enabled: bool) -> Result<(), StorageError> {
        let path = preferences_path()?;
        let mut prefs = read_from(&path).unwrap_or_default();
        prefs.dark_mode = enabled;
        write_to(&path, &prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_strictly() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some(" true ")));
        assert!(!parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("1")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn preferences_use_fixed_key() {
        let prefs = Preferences { dark_mode: true };
        let json = prefs.to_json().unwrap();
        assert!(json.contains(DARK_MODE_KEY));
        assert_eq!(Preferences::from_json(&json).unwrap(), prefs);
        assert_eq!(Preferences::from_json("{}").unwrap(), Preferences::default());
        assert!(matches!(
            Preferences::from_json("not json"),
            Err(StorageError::Format(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_preferences_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        assert_eq!(backend::read_from(&path).unwrap(), Preferences::default());
        backend::write_to(&path, &Preferences { dark_mode: true }).unwrap();
        assert!(backend::read_from(&path).unwrap().dark_mode);
    }
}
