//! Keybinding Manager for Aura Video Studio.
//!
//! Owns the live shortcut → action map together with its flags. Every
//! mutation is written back through a [`KeymapStorage`] before the call
//! returns. A failed write is logged and leaves the in-memory state
//! authoritative until the next successful save.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::services::keymap_storage::{KeymapStorage, MemoryStorage};
use crate::types::action::Action;
use crate::types::errors::{ImportError, StorageError};
use crate::types::keymap::{default_bindings, BindingConflict, BindingMap, PersistedKeymap};
use crate::types::shortcut::ShortcutKey;

/// Trait defining keybinding store operations.
pub trait KeybindingManagerTrait {
    /// Binds `key` to `action`, replacing whatever it was bound to.
    fn bind(&mut self, key: ShortcutKey, action: Action);
    /// Removes the binding for `key`; unbound keys are a no-op.
    fn unbind(&mut self, key: &ShortcutKey);
    fn reset_to_defaults(&mut self);
    /// Replaces the whole map with `entries`, or changes nothing on error.
    fn import_bindings(&mut self, entries: &Map<String, Value>) -> Result<usize, ImportError>;
    fn export_bindings(&self) -> BindingMap;
    fn enable(&mut self);
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;
    fn set_recording(&mut self, recording: bool);
    fn is_recording(&self) -> bool;
    fn is_customized(&self) -> bool;
    /// Reports the existing binding at `key` if it differs from `action`.
    fn validate(&self, key: &ShortcutKey, action: Action) -> Option<BindingConflict>;
    fn keys_for_action(&self, action: Action) -> Vec<ShortcutKey>;
    fn resolve(&self, key: &ShortcutKey) -> Option<Action>;
}

/// Keybinding store backed by a pluggable persistence layer.
pub struct KeybindingManager {
    bindings: BindingMap,
    is_customized: bool,
    enabled: bool,
    recording: bool,
    storage: Box<dyn KeymapStorage>,
    unsaved: bool,
}

impl KeybindingManager {
    /// Loads the persisted keymap from `storage`, falling back to the
    /// default map when nothing usable is stored.
    pub fn load(storage: Box<dyn KeymapStorage>) -> Self {
        let (bindings, is_customized) = match storage.load() {
            Ok(Some(record)) => {
                log::info!(
                    "Loaded {} keybindings from {} (customized: {})",
                    record.keybindings.len(),
                    storage.describe(),
                    record.is_customized
                );
                (record.keybindings, record.is_customized)
            }
            Ok(None) => {
                log::debug!("No persisted keymap in {}, using defaults", storage.describe());
                (default_bindings(), false)
            }
            Err(e) => {
                log::warn!(
                    "Failed to load keymap from {}, using defaults: {}",
                    storage.describe(),
                    e
                );
                (default_bindings(), false)
            }
        };

        Self {
            bindings,
            is_customized,
            enabled: true,
            recording: false,
            storage,
            unsaved: false,
        }
    }

    /// A manager with the default map and throwaway storage.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStorage::new()))
    }

    fn snapshot(&self) -> PersistedKeymap {
        PersistedKeymap::new(self.bindings.clone(), self.is_customized)
    }

    /// Best-effort save after a mutation.
    fn persist(&mut self) {
        match self.storage.save(&self.snapshot()) {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                self.unsaved = true;
                log::warn!(
                    "Keymap changes kept in memory only, save to {} failed: {}",
                    self.storage.describe(),
                    e
                );
            }
        }
    }

    /// Saves the current state, surfacing any storage error. Use before
    /// anything that must know the keymap is durable.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        self.storage.save(&self.snapshot())?;
        self.unsaved = false;
        Ok(())
    }

    /// True when the last save failed and a later one has not reconciled it.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Imports a shortcuts document `{ "keybindings": {...}, "version"?: n }`.
    pub fn import_document(&mut self, json: &str) -> Result<usize, ImportError> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| ImportError::Malformed(e.to_string()))?;

        let bindings = match document.get("keybindings") {
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ImportError::Malformed(
                    "keybindings must be an object".to_string(),
                ))
            }
            None => return Err(ImportError::MissingBindings),
        };

        self.import_bindings(bindings)
    }

    /// Reads and imports a shortcuts file.
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, ImportError> {
        let content = fs::read_to_string(path).map_err(|e| ImportError::Io(e.to_string()))?;
        self.import_document(&content)
    }

    /// The current state as a shortcuts document.
    pub fn export_document(&self) -> Result<String, StorageError> {
        self.snapshot().to_json()
    }

    /// Writes the current state as a shortcuts file.
    pub fn export_file<P: AsRef<Path>>(&self, path: P) -> Result<(), StorageError> {
        let json = self.export_document()?;
        fs::write(path, json)
            .map_err(|e| StorageError::IoError(format!("Failed to write shortcuts file: {}", e)))
    }
}

/// Validates every entry before anything is applied.
fn parse_entries(entries: &Map<String, Value>) -> Result<BindingMap, ImportError> {
    let mut bindings = BindingMap::new();

    for (raw_key, raw_action) in entries {
        if raw_key.trim().is_empty() {
            return Err(ImportError::InvalidKey {
                key: raw_key.clone(),
                reason: "key is empty".to_string(),
            });
        }
        let key = ShortcutKey::parse(raw_key).map_err(|e| ImportError::InvalidKey {
            key: raw_key.clone(),
            reason: e.to_string(),
        })?;

        let action_id = match raw_action {
            Value::String(id) if !id.trim().is_empty() => id,
            Value::String(_) => {
                return Err(ImportError::InvalidAction {
                    key: raw_key.clone(),
                    reason: "action is empty".to_string(),
                })
            }
            _ => {
                return Err(ImportError::InvalidAction {
                    key: raw_key.clone(),
                    reason: "action must be a string".to_string(),
                })
            }
        };
        let action = action_id.parse::<Action>().map_err(|e| ImportError::InvalidAction {
            key: raw_key.clone(),
            reason: e.to_string(),
        })?;

        if bindings.insert(key.clone(), action).is_some() {
            return Err(ImportError::InvalidKey {
                key: raw_key.clone(),
                reason: format!("duplicates '{}'", key),
            });
        }
    }

    Ok(bindings)
}

impl KeybindingManagerTrait for KeybindingManager {
    fn bind(&mut self, key: ShortcutKey, action: Action) {
        if let Some(previous) = self.bindings.insert(key.clone(), action) {
            if previous != action {
                log::info!("Rebound '{}' from '{}' to '{}'", key, previous, action);
            }
        } else {
            log::info!("Bound '{}' to '{}'", key, action);
        }
        self.is_customized = true;
        self.persist();
    }

    fn unbind(&mut self, key: &ShortcutKey) {
        if let Some(previous) = self.bindings.remove(key) {
            log::info!("Unbound '{}' (was '{}')", key, previous);
        }
        self.is_customized = true;
        self.persist();
    }

    fn reset_to_defaults(&mut self) {
        self.bindings = default_bindings();
        self.is_customized = false;
        log::info!("Keymap reset to defaults");
        self.persist();
    }

    fn import_bindings(&mut self, entries: &Map<String, Value>) -> Result<usize, ImportError> {
        let bindings = parse_entries(entries).map_err(|e| {
            log::warn!("Rejected keymap import: {}", e);
            e
        })?;

        let count = bindings.len();
        self.bindings = bindings;
        self.is_customized = true;
        log::info!("Imported {} keybindings", count);
        self.persist();
        Ok(count)
    }

    fn export_bindings(&self) -> BindingMap {
        self.bindings.clone()
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    fn is_recording(&self) -> bool {
        self.recording
    }

    fn is_customized(&self) -> bool {
        self.is_customized
    }

    fn validate(&self, key: &ShortcutKey, action: Action) -> Option<BindingConflict> {
        match self.bindings.get(key) {
            Some(existing) if *existing != action => Some(BindingConflict {
                key: key.clone(),
                existing: *existing,
                proposed: action,
            }),
            _ => None,
        }
    }

    fn keys_for_action(&self, action: Action) -> Vec<ShortcutKey> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn resolve(&self, key: &ShortcutKey) -> Option<Action> {
        self.bindings.get(key).copied()
    }
}
