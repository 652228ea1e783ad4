// Aura keymap storage backends
// Explicit load/save pair used by the keybinding manager after every mutation.
// The record is a pretty-printed JSON file or a single SQLite row. The memory
// backend is a fake for tests.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::database::Database;
use crate::types::errors::StorageError;
use crate::types::keymap::PersistedKeymap;

/// Durable home for the keymap record.
pub trait KeymapStorage: Send {
    /// Returns the stored record, or `None` if nothing usable is stored.
    fn load(&self) -> Result<Option<PersistedKeymap>, StorageError>;
    /// Replaces the stored record.
    fn save(&self, state: &PersistedKeymap) -> Result<(), StorageError>;
    /// Short human-readable location, used in log lines.
    fn describe(&self) -> String;
}

// === JSON file ===

/// Stores the keymap as a JSON document on disk.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeymapStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<PersistedKeymap>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::IoError(format!("Failed to read keymap file: {}", e)))?;

        PersistedKeymap::from_json(&content)
    }

    /// Writes and syncs a sibling temp file then renames it over the target,
    /// so a crash mid-write never leaves a truncated keymap behind.
    fn save(&self, state: &PersistedKeymap) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(format!("Failed to create keymap directory: {}", e))
            })?;
        }

        let json = state.to_json()?;
        let temp = self.temp_path();

        let mut file = fs::File::create(&temp)
            .map_err(|e| StorageError::IoError(format!("Failed to create keymap file: {}", e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| StorageError::IoError(format!("Failed to write keymap file: {}", e)))?;
        file.sync_all()
            .map_err(|e| StorageError::IoError(format!("Failed to sync keymap file: {}", e)))?;
        drop(file);

        fs::rename(&temp, &self.path)
            .map_err(|e| StorageError::IoError(format!("Failed to replace keymap file: {}", e)))?;

        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

// === SQLite ===

/// Stores the keymap record in the `keymap_state` table.
pub struct SqliteStorage {
    db: Database,
    label: String,
}

impl SqliteStorage {
    pub fn new(db: Database, label: &str) -> Self {
        Self {
            db,
            label: label.to_string(),
        }
    }

    /// Opens (creating and migrating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(format!("Failed to create database directory: {}", e))
            })?;
        }
        let db = Database::open(path)?;
        Ok(Self::new(db, &path.display().to_string()))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_in_memory()?, ":memory:"))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl KeymapStorage for SqliteStorage {
    fn load(&self) -> Result<Option<PersistedKeymap>, StorageError> {
        let result = self.db.connection().query_row(
            "SELECT payload FROM keymap_state WHERE id = 1",
            [],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(json) => PersistedKeymap::from_json(&json),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, state: &PersistedKeymap) -> Result<(), StorageError> {
        let json = state.to_json()?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        self.db.connection().execute(
            "INSERT OR REPLACE INTO keymap_state (id, record_version, payload, updated_at)
             VALUES (1, ?1, ?2, ?3)",
            rusqlite::params![state.version, json, now],
        )?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.label)
    }
}

// === Memory ===

#[derive(Debug, Default)]
struct MemoryState {
    payload: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// In-process storage. Clones share the same underlying record, so a test can
/// hand one clone to the manager and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `json` already stored, as if written by an earlier session.
    pub fn with_payload(json: &str) -> Self {
        let storage = Self::default();
        storage.state().payload = Some(json.to_string());
        storage
    }

    /// Makes every subsequent `save` fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    /// The raw stored JSON, if any.
    pub fn payload(&self) -> Option<String> {
        self.state().payload.clone()
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeymapStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedKeymap>, StorageError> {
        match self.payload() {
            Some(json) => PersistedKeymap::from_json(&json),
            None => Ok(None),
        }
    }

    fn save(&self, state: &PersistedKeymap) -> Result<(), StorageError> {
        let json = state.to_json()?;
        let mut inner = self.state();
        if inner.fail_writes {
            return Err(StorageError::IoError("memory storage is read-only".to_string()));
        }
        inner.payload = Some(json);
        inner.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
