use std::fmt;

// === ShortcutError ===

/// Errors raised while parsing a shortcut string or an action id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    /// The shortcut string was empty.
    Empty,
    /// A modifier token is not one of `ctrl`, `alt`, `shift`.
    InvalidModifier(String),
    /// Modifiers repeat or are not in `ctrl`, `alt`, `shift` order.
    ModifierOrder(String),
    /// The base key is missing or not shortcut-eligible.
    InvalidKey(String),
    /// The action id is not in the registry.
    UnknownAction(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::Empty => write!(f, "Shortcut cannot be empty"),
            ShortcutError::InvalidModifier(token) => {
                write!(f, "Invalid shortcut modifier: {}", token)
            }
            ShortcutError::ModifierOrder(shortcut) => {
                write!(f, "Modifiers out of order or repeated: {}", shortcut)
            }
            ShortcutError::InvalidKey(key) => write!(f, "Invalid shortcut key: {}", key),
            ShortcutError::UnknownAction(id) => write!(f, "Unknown action: {}", id),
        }
    }
}

impl std::error::Error for ShortcutError {}

// === ImportError ===

/// Errors raised by a keymap import. Any of these rejects the whole import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The document is not JSON or does not have the expected shape.
    Malformed(String),
    /// The document has no `keybindings` object.
    MissingBindings,
    /// An entry's key is empty or not a canonical shortcut.
    InvalidKey { key: String, reason: String },
    /// An entry's value is not a non-empty string naming a known action.
    InvalidAction { key: String, reason: String },
    /// The shortcuts file could not be read.
    Io(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Malformed(msg) => write!(f, "Invalid shortcuts file: {}", msg),
            ImportError::MissingBindings => {
                write!(f, "Invalid shortcuts file: missing keybindings object")
            }
            ImportError::InvalidKey { key, reason } => {
                write!(f, "Invalid shortcuts file: bad key '{}': {}", key, reason)
            }
            ImportError::InvalidAction { key, reason } => {
                write!(f, "Invalid shortcuts file: bad action for '{}': {}", key, reason)
            }
            ImportError::Io(msg) => write!(f, "Failed to read shortcuts file: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {}

// === StorageError ===

/// Errors related to keymap persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing the keymap file.
    IoError(String),
    /// Failed to serialize or deserialize the persisted keymap.
    SerializationError(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(msg) => write!(f, "Keymap storage I/O error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Keymap serialization error: {}", msg)
            }
            StorageError::DatabaseError(msg) => write!(f, "Keymap database error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}

// === ConfigError ===

/// Errors related to reading the keymap configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment override has an unrecognized value.
    InvalidValue { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value for {}: {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
