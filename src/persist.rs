//! Durable desktop state behind one key-value interface.
//!
//! The store owns everything the desktop remembers across sessions:
//! per-title window geometry, the wallpaper choice, notepad documents and
//! the auto-name counter. It serializes to a single JSON file with an
//! explicit schema version; unreadable or mismatched files are discarded
//! with a warning and the session starts fresh. Persistence failures are
//! never fatal; the in-memory state stays authoritative.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Position, Size};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Last-known placement for a window title. Last write wins; there is no
/// merging across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub position: Position,
    pub size: Size,
    pub maximized: bool,
    pub minimized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopConfig {
    schema_version: u32,
    window_configs: BTreeMap<String, WindowConfig>,
    wallpaper: String,
    notepad_counter: u64,
    notepad_docs: BTreeMap<String, String>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            window_configs: BTreeMap::new(),
            wallpaper: crate::theme::default_wallpaper().name.to_string(),
            notepad_counter: 0,
            notepad_docs: BTreeMap::new(),
        }
    }
}

/// File-backed store. A store without a path (`in_memory`) behaves
/// identically minus durability, which keeps tests hermetic.
#[derive(Debug)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    config: DesktopConfig,
}

impl ConfigStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            config: DesktopConfig::default(),
        }
    }

    /// Load from `path`, falling back to defaults when the file is
    /// missing, unparsable, or carries a different schema version.
    pub fn load_or_default(path: PathBuf) -> Self {
        let config = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<DesktopConfig>(&raw) {
                Ok(config) if config.schema_version == SCHEMA_VERSION => config,
                Ok(config) => {
                    tracing::warn!(
                        found = config.schema_version,
                        expected = SCHEMA_VERSION,
                        "discarding persisted state with mismatched schema version"
                    );
                    DesktopConfig::default()
                }
                Err(err) => {
                    tracing::warn!(%err, "discarding unparsable persisted state");
                    DesktopConfig::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => DesktopConfig::default(),
            Err(err) => {
                tracing::warn!(%err, "could not read persisted state");
                DesktopConfig::default()
            }
        };
        Self {
            path: Some(path),
            config,
        }
    }

    pub fn window_config(&self, title: &str) -> Option<WindowConfig> {
        self.config.window_configs.get(title).copied()
    }

    pub fn set_window_config(&mut self, title: &str, config: WindowConfig) {
        self.config
            .window_configs
            .insert(title.to_string(), config);
        self.save_logged();
    }

    pub fn wallpaper(&self) -> &str {
        &self.config.wallpaper
    }

    pub fn set_wallpaper(&mut self, name: &str) {
        if self.config.wallpaper != name {
            self.config.wallpaper = name.to_string();
            self.save_logged();
        }
    }

    /// Allocate the next auto-generated notepad document name.
    pub fn next_notepad_name(&mut self) -> String {
        self.config.notepad_counter += 1;
        let name = format!("Untitled {}", self.config.notepad_counter);
        self.save_logged();
        name
    }

    pub fn notepad_doc(&self, name: &str) -> Option<&str> {
        self.config.notepad_docs.get(name).map(String::as_str)
    }

    pub fn save_notepad_doc(&mut self, name: &str, text: &str) {
        self.config
            .notepad_docs
            .insert(name.to_string(), text.to_string());
        self.save_logged();
    }

    pub fn notepad_doc_names(&self) -> Vec<String> {
        self.config.notepad_docs.keys().cloned().collect()
    }

    /// Write the config atomically (temp file + rename) so a crash never
    /// leaves a half-written file behind.
    pub fn save(&self) -> Result<(), PersistError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.config)?;
        let tmp = tmp_sibling(path);
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn save_logged(&self) {
        if let Err(err) = self.save() {
            tracing::warn!(%err, "failed to persist desktop state");
        }
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Default location of the state file, under the platform config dir.
pub fn default_state_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("term-desk")
        .join("state.json")
}

/// Sibling log file next to the state file.
pub fn default_log_path() -> PathBuf {
    default_state_path().with_file_name("term-desk.log")
}
