use std::env;
use std::path::PathBuf;

use crate::platform::{self, Platform};

use super::errors::ConfigError;

pub const ENV_DATA_DIR: &str = "AURA_KEYMAP_DATA_DIR";
pub const ENV_STORAGE: &str = "AURA_KEYMAP_STORAGE";
pub const ENV_PLATFORM: &str = "AURA_KEYMAP_PLATFORM";

/// File name of the JSON keymap inside the storage directory.
pub const KEYMAP_FILE_NAME: &str = "keybindings.json";
/// File name of the SQLite database inside the storage directory.
pub const DATABASE_FILE_NAME: &str = "aura-keymap.db";

/// Where the keymap is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    JsonFile,
    Sqlite,
    /// Nothing survives the process.
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(StorageBackend::JsonFile),
            "sqlite" => Some(StorageBackend::Sqlite),
            "memory" => Some(StorageBackend::Memory),
            _ => None,
        }
    }
}

/// Runtime configuration for the keymap subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapConfig {
    pub storage: StorageBackend,
    /// Overrides the per-OS directory for the chosen backend.
    pub data_dir: Option<PathBuf>,
    pub platform: Platform,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::JsonFile,
            data_dir: None,
            platform: Platform::current(),
        }
    }
}

impl KeymapConfig {
    /// Builds the configuration from `AURA_KEYMAP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(value) = lookup(ENV_STORAGE) {
            config.storage =
                StorageBackend::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                    name: ENV_STORAGE.to_string(),
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(ENV_PLATFORM) {
            config.platform = match value.trim().to_lowercase().as_str() {
                "apple" => Platform::Apple,
                "other" => Platform::Other,
                "" => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_PLATFORM.to_string(),
                        value,
                    })
                }
                _ => Platform::from_user_agent(&value),
            };
        }

        Ok(config)
    }

    /// Directory that holds the persisted keymap for the configured backend.
    pub fn storage_dir(&self) -> PathBuf {
        match (&self.data_dir, self.storage) {
            (Some(dir), _) => dir.clone(),
            (None, StorageBackend::Sqlite) => platform::get_data_dir(),
            (None, _) => platform::get_config_dir(),
        }
    }

    pub fn keymap_file(&self) -> PathBuf {
        self.storage_dir().join(KEYMAP_FILE_NAME)
    }

    pub fn database_file(&self) -> PathBuf {
        self.storage_dir().join(DATABASE_FILE_NAME)
    }
}
