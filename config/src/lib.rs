//! Preference persistence for Gatekeeper.
//!
//! The game itself never touches the filesystem. This crate is the
//! collaborator that stores [`GameConfig`] between runs and hands it back as a
//! [`ConfigPatch`] for `GameManager::update_config`.
//!
//! ```toml
//! [game]
//! auto_advance = true
//! show_hints = true
//! sound_enabled = false
//! ```
//!
//! Saving edits the existing file in place with `toml_edit`, so comments and
//! unrelated keys survive, and writes through a temp file + rename so a crash
//! never leaves a half-written file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gatekeeper_types::{ConfigPatch, GameConfig};
use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

const DATA_DIR_NAME: &str = ".gatekeeper";
const PREFERENCES_FILE: &str = "preferences.toml";
const GAME_TABLE: &str = "game";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to edit {}: {source}", path.display())]
    Edit {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::NoHome => None,
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Edit { path, .. }
            | ConfigError::Write { path, .. } => Some(path),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPreferences {
    game: Option<ConfigPatch>,
}

/// `~/.gatekeeper`, home of preferences and logs.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

#[must_use]
pub fn preferences_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(PREFERENCES_FILE))
}

/// A preferences file at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self, ConfigError> {
        preferences_path().map(Self::at).ok_or(ConfigError::NoHome)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored settings.
    ///
    /// A missing file, or one without a `[game]` table, is `Ok(None)`.
    pub fn load(&self) -> Result<Option<ConfigPatch>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read preferences at {:?}: {}", self.path, err);
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        match toml::from_str::<RawPreferences>(&content) {
            Ok(raw) => Ok(raw.game),
            Err(err) => {
                tracing::warn!("Failed to parse preferences at {:?}: {}", self.path, err);
                Err(ConfigError::Parse {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }

    /// Store `config` under `[game]`, creating the file and parent directory
    /// if needed.
    pub fn persist(&self, config: &GameConfig) -> Result<(), ConfigError> {
        let write_err = |source: io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(write_err)?;

        let content = if self.path.exists() {
            fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
                path: self.path.clone(),
                source,
            })?
        } else {
            String::new()
        };

        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|source| ConfigError::Edit {
                path: self.path.clone(),
                source,
            })?;

        if !doc
            .get(GAME_TABLE)
            .is_some_and(toml_edit::Item::is_table_like)
        {
            doc[GAME_TABLE] = toml_edit::Item::Table(toml_edit::Table::new());
        }
        doc[GAME_TABLE]["auto_advance"] = toml_edit::value(config.auto_advance);
        doc[GAME_TABLE]["show_hints"] = toml_edit::value(config.show_hints);
        doc[GAME_TABLE]["sound_enabled"] = toml_edit::value(config.sound_enabled);

        let mut tmp = NamedTempFile::new_in(&parent).map_err(write_err)?;
        tmp.write_all(doc.to_string().as_bytes())
            .map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|err| write_err(err.error))?;

        tracing::debug!(path = %self.path.display(), "Saved preferences");
        Ok(())
    }
}
