//! The persisted config record: one credential and one theme flag, mirrored
//! wholesale to a single JSON file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AssistError, Result};

/// File name of the stored record. Fixed; there is only ever one.
pub const STORAGE_KEY: &str = "aiAssistantConfig.json";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigRecord {
    /// Empty means "unconfigured".
    pub deepseek_key: String,
    pub is_dark_mode: bool,
}

impl ConfigRecord {
    pub fn is_configured(&self) -> bool {
        !self.deepseek_key.is_empty()
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "example", "assistant-tui").ok_or(AssistError::NoProjectDir("home"))
}

/// Platform data directory, e.g. `~/.local/share/assistant-tui`.
pub fn data_root() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

#[derive(Clone, Debug)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store rooted at `dir`; the record lives at `dir/aiAssistantConfig.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record back. A missing file yields the defaults.
    pub fn load(&self) -> Result<ConfigRecord> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no stored config, using defaults");
            return Ok(ConfigRecord::default());
        }
        let s = fs::read_to_string(&self.path).map_err(|e| AssistError::storage(&self.path, e))?;
        let record: ConfigRecord = serde_json::from_str(&s)?;
        debug!(
            configured = record.is_configured(),
            dark = record.is_dark_mode,
            "loaded config"
        );
        Ok(record)
    }

    /// Overwrites the stored record. Last write wins.
    pub fn save(&self, record: &ConfigRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AssistError::storage(parent, e))?;
        }
        let s = serde_json::to_string(record)?;
        fs::write(&self.path, s).map_err(|e| AssistError::storage(&self.path, e))?;
        info!(
            configured = record.is_configured(),
            dark = record.is_dark_mode,
            "saved config"
        );
        Ok(())
    }
}
