use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    config::project_dirs,
    error::{AssistError, Result},
    presets::Preset,
};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/api/assistant";

/// Optional `settings.toml`. Every field may be absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppSettings {
    pub endpoint: Option<String>,
    pub presets: Option<Vec<Preset>>,
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("settings.toml"))
}

pub fn load_settings(path: &Path) -> Result<AppSettings> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let s = fs::read_to_string(path).map_err(|e| AssistError::storage(path, e))?;
    toml::from_str(&s).map_err(|source| AssistError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

impl AppSettings {
    /// `explicit` comes from the command line or `ASSISTANT_ENDPOINT` and
    /// beats the file.
    pub fn endpoint(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn presets(&self) -> Vec<Preset> {
        match &self.presets {
            Some(p) if !p.is_empty() => p.clone(),
            _ => Preset::builtin(),
        }
    }
}
