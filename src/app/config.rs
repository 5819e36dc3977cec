use crate::infrastructure::default_storage_path;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const STORAGE_ENV: &str = "CHAT_THEME_STORAGE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Storage document location. Defaults to `~/.config/chat-theme/storage.toml`.
    pub storage_path: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            log_filter: "warn".to_string(),
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("chat-theme");
        path.push("config.toml");
        path
    })
}

impl Config {
    /// Loads the user config, falling back to defaults when it is missing or
    /// malformed. The storage path can be overridden from the environment.
    #[must_use]
    pub fn load() -> Self {
        let config = get_config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        config.with_storage_override(std::env::var_os(STORAGE_ENV))
    }

    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if let Ok(content) = std::fs::read_to_string(path) {
            if let Ok(config) = toml::from_str::<Config>(&content) {
                return config;
            }
        }
        Self::default()
    }

    #[must_use]
    pub fn with_storage_override(mut self, value: Option<OsString>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.storage_path = Some(PathBuf::from(value));
        }
        self
    }

    #[must_use]
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_path.clone().or_else(default_storage_path)
    }
}
