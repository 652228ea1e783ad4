use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ShortcutError;

/// Editing operations a shortcut can trigger in the timeline editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    // Playback
    TogglePlay,
    SeekBackward,
    SeekForward,

    // Navigation
    FrameStepBackward,
    FrameStepForward,
    JumpBackward,
    JumpForward,
    GotoStart,
    GotoEnd,
    NextMarker,
    PrevMarker,

    // Editing
    SplitElement,
    ToggleRippleEdit,
    DuplicateSelected,
    DeleteSelected,
    Undo,
    Redo,
    SetInPoint,
    SetOutPoint,
    ClearInPoint,
    ClearOutPoint,
    AddMarker,
    ToggleHideSelected,

    // View
    ToggleSnapping,
    ZoomIn,
    ZoomOut,
    ZoomToFit,

    // Selection
    SelectAll,
    DeselectAll,
    CopySelected,
    PasteSelected,
    CutSelected,
}

impl Action {
    /// Every action, in registry order.
    pub const ALL: [Action; 32] = [
        Action::TogglePlay,
        Action::SeekBackward,
        Action::SeekForward,
        Action::FrameStepBackward,
        Action::FrameStepForward,
        Action::JumpBackward,
        Action::JumpForward,
        Action::GotoStart,
        Action::GotoEnd,
        Action::NextMarker,
        Action::PrevMarker,
        Action::SplitElement,
        Action::ToggleRippleEdit,
        Action::DuplicateSelected,
        Action::DeleteSelected,
        Action::Undo,
        Action::Redo,
        Action::SetInPoint,
        Action::SetOutPoint,
        Action::ClearInPoint,
        Action::ClearOutPoint,
        Action::AddMarker,
        Action::ToggleHideSelected,
        Action::ToggleSnapping,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::ZoomToFit,
        Action::SelectAll,
        Action::DeselectAll,
        Action::CopySelected,
        Action::PasteSelected,
        Action::CutSelected,
    ];

    /// The stable string id, as persisted and exchanged with the UI.
    pub fn id(&self) -> &'static str {
        match self {
            Action::TogglePlay => "toggle-play",
            Action::SeekBackward => "seek-backward",
            Action::SeekForward => "seek-forward",
            Action::FrameStepBackward => "frame-step-backward",
            Action::FrameStepForward => "frame-step-forward",
            Action::JumpBackward => "jump-backward",
            Action::JumpForward => "jump-forward",
            Action::GotoStart => "goto-start",
            Action::GotoEnd => "goto-end",
            Action::NextMarker => "next-marker",
            Action::PrevMarker => "prev-marker",
            Action::SplitElement => "split-element",
            Action::ToggleRippleEdit => "toggle-ripple-edit",
            Action::DuplicateSelected => "duplicate-selected",
            Action::DeleteSelected => "delete-selected",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::SetInPoint => "set-in-point",
            Action::SetOutPoint => "set-out-point",
            Action::ClearInPoint => "clear-in-point",
            Action::ClearOutPoint => "clear-out-point",
            Action::AddMarker => "add-marker",
            Action::ToggleHideSelected => "toggle-hide-selected",
            Action::ToggleSnapping => "toggle-snapping",
            Action::ZoomIn => "zoom-in",
            Action::ZoomOut => "zoom-out",
            Action::ZoomToFit => "zoom-to-fit",
            Action::SelectAll => "select-all",
            Action::DeselectAll => "deselect-all",
            Action::CopySelected => "copy-selected",
            Action::PasteSelected => "paste-selected",
            Action::CutSelected => "cut-selected",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.id() == s)
            .ok_or_else(|| ShortcutError::UnknownAction(s.to_string()))
    }
}

/// Grouping used by the shortcuts help surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Playback,
    Navigation,
    Editing,
    View,
    Selection,
}

impl Category {
    /// Categories in the order help sections are shown.
    pub const ALL: [Category; 5] = [
        Category::Playback,
        Category::Navigation,
        Category::Editing,
        Category::View,
        Category::Selection,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::Playback => "playback",
            Category::Navigation => "navigation",
            Category::Editing => "editing",
            Category::View => "view",
            Category::Selection => "selection",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Playback => "Playback Controls",
            Category::Navigation => "Timeline Navigation",
            Category::Editing => "Editing",
            Category::View => "View",
            Category::Selection => "Selection",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
