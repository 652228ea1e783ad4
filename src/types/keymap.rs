use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::action::Action;
use super::errors::StorageError;
use super::shortcut::ShortcutKey;

/// Current persisted-record schema version. Records with any other version
/// are ignored on load.
pub const SCHEMA_VERSION: u32 = 1;

/// Shortcut → action mapping. Not exhaustive in either direction, and several
/// shortcuts may share an action.
pub type BindingMap = BTreeMap<ShortcutKey, Action>;

/// Out-of-the-box bindings.
pub const DEFAULT_KEYMAP: &[(&str, Action)] = &[
    ("space", Action::TogglePlay),
    ("j", Action::SeekBackward),
    ("k", Action::TogglePlay),
    ("l", Action::SeekForward),
    ("left", Action::FrameStepBackward),
    ("right", Action::FrameStepForward),
    ("shift+left", Action::JumpBackward),
    ("shift+right", Action::JumpForward),
    ("home", Action::GotoStart),
    ("end", Action::GotoEnd),
    ("s", Action::SplitElement),
    ("n", Action::ToggleSnapping),
    ("r", Action::ToggleRippleEdit),
    ("ctrl+a", Action::SelectAll),
    ("ctrl+shift+a", Action::DeselectAll),
    ("ctrl+d", Action::DuplicateSelected),
    ("ctrl+c", Action::CopySelected),
    ("ctrl+v", Action::PasteSelected),
    ("ctrl+x", Action::CutSelected),
    ("delete", Action::DeleteSelected),
    ("backspace", Action::DeleteSelected),
    ("ctrl+z", Action::Undo),
    ("ctrl+shift+z", Action::Redo),
    ("ctrl+y", Action::Redo),
    ("ctrl+=", Action::ZoomIn),
    ("ctrl+-", Action::ZoomOut),
    ("ctrl+0", Action::ZoomToFit),
    ("i", Action::SetInPoint),
    ("o", Action::SetOutPoint),
    ("ctrl+shift+i", Action::ClearInPoint),
    ("ctrl+shift+o", Action::ClearOutPoint),
    ("m", Action::AddMarker),
    ("shift+m", Action::NextMarker),
    ("ctrl+shift+m", Action::PrevMarker),
    ("shift+h", Action::ToggleHideSelected),
];

/// Builds the default binding map from [`DEFAULT_KEYMAP`].
pub fn default_bindings() -> BindingMap {
    DEFAULT_KEYMAP
        .iter()
        .filter_map(|(key, action)| ShortcutKey::parse(key).ok().map(|key| (key, *action)))
        .collect()
}

/// The durable record written after every keymap mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedKeymap {
    pub version: u32,
    pub keybindings: BindingMap,
    pub is_customized: bool,
}

impl PersistedKeymap {
    pub fn new(keybindings: BindingMap, is_customized: bool) -> Self {
        Self {
            version: SCHEMA_VERSION,
            keybindings,
            is_customized,
        }
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            StorageError::SerializationError(format!("Failed to serialize keymap: {}", e))
        })
    }

    /// Decodes a stored record.
    ///
    /// Returns `Ok(None)` when the version is missing or differs from
    /// [`SCHEMA_VERSION`]; such records count as "nothing persisted".
    pub fn from_json(json: &str) -> Result<Option<Self>, StorageError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(|e| {
            StorageError::SerializationError(format!("Failed to parse keymap: {}", e))
        })?;

        let version = value.get("version").and_then(|v| v.as_u64());
        if version != Some(u64::from(SCHEMA_VERSION)) {
            log::warn!(
                "Ignoring persisted keymap with schema version {:?} (expected {})",
                version,
                SCHEMA_VERSION
            );
            return Ok(None);
        }

        serde_json::from_value(value).map(Some).map_err(|e| {
            StorageError::SerializationError(format!("Failed to decode keymap: {}", e))
        })
    }
}

/// Advisory result of checking a proposed binding against the current map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingConflict {
    pub key: ShortcutKey,
    pub existing: Action,
    pub proposed: Action,
}

impl fmt::Display for BindingConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is already bound to '{}'", self.key, self.existing)
    }
}

/// What dispatch did with a key event. `Handled` tells the UI to suppress the
/// event's default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled(Action),
    Unhandled,
}

impl DispatchOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled(_))
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            DispatchOutcome::Handled(action) => Some(*action),
            DispatchOutcome::Unhandled => None,
        }
    }
}
