//! Small JSON settings document shared by the desktop and the game panel.
//!
//! The file lives at `<data dir>/settings.json`. A store without a path keeps
//! everything in memory (`--no-persist`, tests).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::SETTINGS_FILE;
use crate::theme::ThemeMode;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Option<ThemeMode>,
    #[serde(rename = "gameHighScore")]
    pub game_high_score: u32,
}

#[derive(Debug, Default)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    settings: Settings,
}

impl SettingsStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load `settings.json` from `dir`. A missing file yields defaults.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(SETTINGS_FILE);
        let settings = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self {
            path: Some(path),
            settings,
        })
    }

    /// Like `open`, but a broken file falls back to defaults and is
    /// overwritten on the next save.
    pub fn open_or_default(dir: &Path) -> Self {
        match Self::open(dir) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(error = %err, "using default settings");
                Self {
                    path: Some(dir.join(SETTINGS_FILE)),
                    settings: Settings::default(),
                }
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> Option<ThemeMode> {
        self.settings.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<(), StoreError> {
        self.settings.theme = Some(theme);
        self.save()
    }

    pub fn game_high_score(&self) -> u32 {
        self.settings.game_high_score
    }

    /// Record `score` if it beats the stored high score. Returns whether it
    /// did.
    pub fn record_game_score(&mut self, score: u32) -> Result<bool, StoreError> {
        if score <= self.settings.game_high_score {
            return Ok(false);
        }
        self.settings.game_high_score = score;
        self.save()?;
        Ok(true)
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.settings).map_err(|source| {
            StoreError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();
        assert_eq!(store.settings(), &Settings::default());
        assert_eq!(store.path(), Some(dir.path().join("settings.json").as_path()));
    }

    #[test]
    fn save_then_reload_keeps_values() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = SettingsStore::open(&nested).unwrap();
        store.set_theme(ThemeMode::Light).unwrap();
        assert!(store.record_game_score(40).unwrap());

        let reloaded = SettingsStore::open(&nested).unwrap();
        assert_eq!(reloaded.theme(), Some(ThemeMode::Light));
        assert_eq!(reloaded.game_high_score(), 40);
    }

    #[test]
    fn high_score_key_matches_saved_format() {
        let dir = tempdir().unwrap();
        let mut store = SettingsStore::open(dir.path()).unwrap();
        store.record_game_score(30).unwrap();
        let text = fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(text.contains("\"gameHighScore\": 30"));
    }

    #[test]
    fn lower_score_is_not_recorded() {
        let mut store = SettingsStore::in_memory();
        assert!(store.record_game_score(20).unwrap());
        assert!(!store.record_game_score(10).unwrap());
        assert_eq!(store.game_high_score(), 20);
    }

    #[test]
    fn corrupt_file_is_a_parse_error_and_falls_back() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert!(matches!(
            SettingsStore::open(dir.path()),
            Err(StoreError::Parse { .. })
        ));
        let store = SettingsStore::open_or_default(dir.path());
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn partial_document_fills_missing_fields() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), r#"{"theme":"dark"}"#).unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();
        assert_eq!(store.theme(), Some(ThemeMode::Dark));
        assert_eq!(store.game_high_score(), 0);
    }
}
