//! Property-based tests for keybinding manager operations.
//!
//! These tests run random sequences of bind, unbind, reset and import against
//! a plain model map and check that the live map, the customization flag and
//! the persisted record all agree with it.

use aura_keymap::managers::keybinding_manager::{KeybindingManager, KeybindingManagerTrait};
use aura_keymap::services::keymap_storage::{KeymapStorage, MemoryStorage};
use aura_keymap::types::action::Action;
use aura_keymap::types::keymap::{default_bindings, BindingMap};
use aura_keymap::types::shortcut::ShortcutKey;
use proptest::prelude::*;
use serde_json::{Map, Value};

const SHORTCUTS: &[&str] = &[
    "space", "k", "ctrl+z", "ctrl+shift+z", "ctrl+y", "shift+left", "ctrl+alt+f5", "delete",
    "ctrl+=", "m", "shift+m", "ctrl+shift+m",
];

#[derive(Debug, Clone)]
enum KeymapOp {
    Bind(&'static str, Action),
    Unbind(&'static str),
    Reset,
    Import(Vec<(&'static str, Action)>),
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn arb_shortcut() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SHORTCUTS)
}

fn arb_ops() -> impl Strategy<Value = Vec<KeymapOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => (arb_shortcut(), arb_action()).prop_map(|(k, a)| KeymapOp::Bind(k, a)),
            3 => arb_shortcut().prop_map(KeymapOp::Unbind),
            1 => Just(KeymapOp::Reset),
            1 => prop::collection::vec((arb_shortcut(), arb_action()), 0..5).prop_map(KeymapOp::Import),
        ],
        1..30,
    )
}

fn key(s: &str) -> ShortcutKey {
    ShortcutKey::parse(s).unwrap()
}

// **Keymap mutations track a model map**
//
// *For any* sequence of operations, `export_bindings()` equals the model,
// `is_customized()` is false exactly when the last map-replacing operation
// was a reset (or nothing happened), and storage holds the same state.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn keymap_tracks_model(ops in arb_ops()) {
        let storage = MemoryStorage::new();
        let mut manager = KeybindingManager::load(Box::new(storage.clone()));
        let mut model: BindingMap = default_bindings();
        let mut customized = false;

        for op in &ops {
            match op {
                KeymapOp::Bind(shortcut, action) => {
                    manager.bind(key(shortcut), *action);
                    model.insert(key(shortcut), *action);
                    customized = true;
                }
                KeymapOp::Unbind(shortcut) => {
                    manager.unbind(&key(shortcut));
                    model.remove(&key(shortcut));
                    customized = true;
                }
                KeymapOp::Reset => {
                    manager.reset_to_defaults();
                    model = default_bindings();
                    customized = false;
                }
                KeymapOp::Import(entries) => {
                    let document: Map<String, Value> = entries
                        .iter()
                        .map(|(k, a)| (k.to_string(), Value::String(a.id().to_string())))
                        .collect();
                    manager.import_bindings(&document).unwrap();
                    model = document
                        .iter()
                        .map(|(k, a)| (key(k), a.as_str().unwrap().parse().unwrap()))
                        .collect();
                    customized = true;
                }
            }
        }

        prop_assert_eq!(manager.export_bindings(), model.clone());
        prop_assert_eq!(manager.is_customized(), customized);
        prop_assert!(!manager.has_unsaved_changes());

        let stored = storage.load().unwrap().unwrap();
        prop_assert_eq!(stored.keybindings, model);
        prop_assert_eq!(stored.is_customized, customized);
    }
}

// **Reset then export yields the default map**
//
// *For any* sequence of operations followed by a reset, the exported map
// equals the default map and the keymap is no longer customized.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn reset_restores_defaults(ops in arb_ops()) {
        let mut manager = KeybindingManager::in_memory();
        for op in &ops {
            match op {
                KeymapOp::Bind(shortcut, action) => manager.bind(key(shortcut), *action),
                KeymapOp::Unbind(shortcut) => manager.unbind(&key(shortcut)),
                KeymapOp::Reset => manager.reset_to_defaults(),
                KeymapOp::Import(_) => {}
            }
        }

        manager.reset_to_defaults();
        prop_assert_eq!(manager.export_bindings(), default_bindings());
        prop_assert!(!manager.is_customized());
    }
}

// **keys_for_action is the inverse of resolve**
//
// *For any* sequence of binds, every key returned for an action resolves
// back to that action, and every bound key is listed under its action.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn keys_for_action_inverts_resolve(
        binds in prop::collection::vec((arb_shortcut(), arb_action()), 0..20),
    ) {
        let mut manager = KeybindingManager::in_memory();
        for (shortcut, action) in &binds {
            manager.bind(key(shortcut), *action);
        }

        for action in Action::ALL {
            for bound in manager.keys_for_action(action) {
                prop_assert_eq!(manager.resolve(&bound), Some(action));
            }
        }
        for (bound, action) in manager.export_bindings() {
            prop_assert!(manager.keys_for_action(action).contains(&bound));
        }
    }
}

const BAD_ENTRIES: &[(&str, &str)] = &[
    ("", "undo"),
    ("ctrl+z", ""),
    ("shift+ctrl+z", "redo"),
    ("ctrl+numpad1", "redo"),
    ("space", "explode"),
];

// **Imports are all-or-nothing**
//
// *For any* set of valid entries plus one malformed entry, the import is
// rejected, nothing is written, and the live map is left exactly as it was.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn malformed_import_changes_nothing(
        binds in prop::collection::vec((arb_shortcut(), arb_action()), 0..5),
        valid in prop::collection::vec((arb_shortcut(), arb_action()), 0..8),
        bad in prop::sample::select(BAD_ENTRIES),
    ) {
        let storage = MemoryStorage::new();
        let mut manager = KeybindingManager::load(Box::new(storage.clone()));
        for (shortcut, action) in &binds {
            manager.bind(key(shortcut), *action);
        }
        let before = manager.export_bindings();
        let customized = manager.is_customized();
        let writes = storage.write_count();

        let mut document: Map<String, Value> = valid
            .iter()
            .map(|(k, a)| (k.to_string(), Value::String(a.id().to_string())))
            .collect();
        document.insert(bad.0.to_string(), Value::String(bad.1.to_string()));

        prop_assert!(manager.import_bindings(&document).is_err());
        prop_assert_eq!(manager.export_bindings(), before);
        prop_assert_eq!(manager.is_customized(), customized);
        prop_assert_eq!(storage.write_count(), writes);
    }
}
