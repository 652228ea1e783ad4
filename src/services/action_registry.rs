//! Static catalog of bindable actions.
//!
//! Every [`Action`] has a default shortcut, a description and a category.
//! The catalog is fixed at compile time; only the binding map is mutable.

use serde::Serialize;

use crate::platform::Platform;
use crate::services::shortcut_formatter::format_for_display;
use crate::types::action::{Action, Category};
use crate::types::keymap::{BindingMap, DEFAULT_KEYMAP};
use crate::types::shortcut::ShortcutKey;

/// Registry metadata for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInfo {
    pub action: Action,
    /// First key [`DEFAULT_KEYMAP`] binds to the action.
    pub default_key: Option<ShortcutKey>,
    pub description: &'static str,
    pub category: Category,
}

/// Looks up the registry entry for `action`.
pub fn action_info(action: Action) -> ActionInfo {
    use Action::*;
    use Category::*;

    let (description, category) = match action {
        TogglePlay => ("Play / pause", Playback),
        SeekBackward => ("Shuttle backward", Playback),
        SeekForward => ("Shuttle forward", Playback),

        FrameStepBackward => ("Step one frame back", Navigation),
        FrameStepForward => ("Step one frame forward", Navigation),
        JumpBackward => ("Jump back one second", Navigation),
        JumpForward => ("Jump forward one second", Navigation),
        GotoStart => ("Go to start of timeline", Navigation),
        GotoEnd => ("Go to end of timeline", Navigation),
        NextMarker => ("Go to next marker", Navigation),
        PrevMarker => ("Go to previous marker", Navigation),

        SplitElement => ("Split element at playhead", Editing),
        ToggleRippleEdit => ("Toggle ripple edit", Editing),
        DuplicateSelected => ("Duplicate selection", Editing),
        DeleteSelected => ("Delete selection", Editing),
        Undo => ("Undo", Editing),
        Redo => ("Redo", Editing),
        SetInPoint => ("Set in point", Editing),
        SetOutPoint => ("Set out point", Editing),
        ClearInPoint => ("Clear in point", Editing),
        ClearOutPoint => ("Clear out point", Editing),
        AddMarker => ("Add marker at playhead", Editing),
        ToggleHideSelected => ("Hide / show selection", Editing),

        ToggleSnapping => ("Toggle snapping", View),
        ZoomIn => ("Zoom in", View),
        ZoomOut => ("Zoom out", View),
        ZoomToFit => ("Zoom to fit", View),

        SelectAll => ("Select all", Selection),
        DeselectAll => ("Deselect all", Selection),
        CopySelected => ("Copy", Selection),
        PasteSelected => ("Paste", Selection),
        CutSelected => ("Cut", Selection),
    };

    ActionInfo {
        action,
        default_key: default_key(action),
        description,
        category,
    }
}

/// The first key the default map binds to `action`.
pub fn default_key(action: Action) -> Option<ShortcutKey> {
    DEFAULT_KEYMAP
        .iter()
        .find(|(_, bound)| *bound == action)
        .and_then(|(key, _)| ShortcutKey::parse(key).ok())
}

/// The whole catalog, in registry order.
pub fn registry() -> Vec<ActionInfo> {
    Action::ALL.iter().map(|a| action_info(*a)).collect()
}

pub fn actions_in_category(category: Category) -> Vec<ActionInfo> {
    registry()
        .into_iter()
        .filter(|info| info.category == category)
        .collect()
}

/// Display name for a category id; unknown ids are returned unchanged.
pub fn category_display_name(category: &str) -> String {
    Category::ALL
        .iter()
        .find(|c| c.id() == category)
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| category.to_string())
}

/// One row of the shortcuts help screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub action: Action,
    pub description: &'static str,
    pub keys: Vec<ShortcutKey>,
    /// `keys`, formatted for the current platform.
    pub labels: Vec<String>,
}

/// A category block of the shortcuts help screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpSection {
    pub category: Category,
    pub title: &'static str,
    pub entries: Vec<HelpEntry>,
}

/// Groups every registry action by category with the keys currently bound to it.
/// Actions with no bound key are listed with empty `keys`.
pub fn help_sections(bindings: &BindingMap, platform: Platform) -> Vec<HelpSection> {
    Category::ALL
        .iter()
        .map(|category| {
            let entries = actions_in_category(*category)
                .into_iter()
                .map(|info| {
                    let keys: Vec<ShortcutKey> = bindings
                        .iter()
                        .filter(|(_, bound)| **bound == info.action)
                        .map(|(key, _)| key.clone())
                        .collect();
                    let labels = keys.iter().map(|k| format_for_display(k, platform)).collect();
                    HelpEntry {
                        action: info.action,
                        description: info.description,
                        keys,
                        labels,
                    }
                })
                .collect();
            HelpSection {
                category: *category,
                title: category.display_name(),
                entries,
            }
        })
        .collect()
}
