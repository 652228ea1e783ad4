//! App Core for the Aura keymap.
//!
//! Wires the storage backend, keybinding manager and dispatcher into one
//! explicitly owned value. The host passes `&App` /
//! `&mut App` (or a `Mutex<App>` across threads) to whatever needs it.

use crate::managers::keybinding_manager::KeybindingManager;
use crate::platform::Platform;
use crate::services::dispatcher::Dispatcher;
use crate::services::keymap_storage::{
    JsonFileStorage, KeymapStorage, MemoryStorage, SqliteStorage,
};
use crate::types::config::{KeymapConfig, StorageBackend};
use crate::types::errors::StorageError;
use crate::types::key_event::RawKeyEvent;
use crate::types::keymap::DispatchOutcome;

pub struct App {
    pub config: KeymapConfig,
    pub platform: Platform,
    pub keymap: KeybindingManager,
    pub dispatcher: Dispatcher,
}

impl App {
    /// Opens the configured storage backend and loads the keymap from it.
    pub fn new(config: KeymapConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let storage: Box<dyn KeymapStorage> = match config.storage {
            StorageBackend::JsonFile => Box::new(JsonFileStorage::new(config.keymap_file())),
            StorageBackend::Sqlite => Box::new(
                SqliteStorage::open(config.database_file())
                    .map_err(|e| format!("Keymap database init failed: {}", e))?,
            ),
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
        };
        Ok(Self::with_storage(config, storage))
    }

    /// Reads `AURA_KEYMAP_*` overrides, then behaves like [`App::new`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::new(KeymapConfig::from_env()?)
    }

    /// Builds an app around an already constructed storage backend.
    pub fn with_storage(config: KeymapConfig, storage: Box<dyn KeymapStorage>) -> Self {
        let platform = config.platform;
        log::info!("Keymap starting on {:?} with {}", platform, storage.describe());
        Self {
            keymap: KeybindingManager::load(storage),
            dispatcher: Dispatcher::new(platform),
            platform,
            config,
        }
    }

    /// Resolves a raw key press against the live keymap.
    pub fn handle_key_event(&self, event: &RawKeyEvent) -> DispatchOutcome {
        self.dispatcher.dispatch(&self.keymap, event)
    }

    /// Flushes the keymap to storage. Call before exit.
    pub fn shutdown(&mut self) -> Result<(), StorageError> {
        self.keymap.flush()
    }
}
