//! Unit tests for the RPC handler, covering the JSON-RPC methods dispatched
//! by `handle_method`.
//!
//! These go through the same code path as the `aura-keymap-rpc` binary, with
//! in-memory storage unless a test needs a file on disk.

use std::sync::Mutex;

use serde_json::{json, Value};
use tempfile::TempDir;

use aura_keymap::app::App;
use aura_keymap::managers::keybinding_manager::KeybindingManagerTrait;
use aura_keymap::platform::Platform;
use aura_keymap::rpc_handler::handle_method;
use aura_keymap::services::keymap_storage::MemoryStorage;
use aura_keymap::types::config::{KeymapConfig, StorageBackend};
use aura_keymap::types::keymap::default_bindings;

fn config(platform: Platform) -> KeymapConfig {
    KeymapConfig {
        storage: StorageBackend::Memory,
        data_dir: None,
        platform,
    }
}

/// Create a fresh App on the non-Apple platform backed by memory storage.
fn setup() -> (Mutex<App>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let app = App::with_storage(config(Platform::Other), Box::new(storage.clone()));
    (Mutex::new(app), storage)
}

fn call(app: &Mutex<App>, method: &str, params: Value) -> Value {
    handle_method(app, method, &params).unwrap_or_else(|e| panic!("{} failed: {}", method, e))
}

// ─── Ping ───

#[test]
fn test_ping() {
    let (app, _storage) = setup();
    assert_eq!(call(&app, "ping", json!({})), json!({"pong": true}));
}

#[test]
fn test_unknown_method_returns_error() {
    let (app, _storage) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Dispatch ───

#[test]
fn test_dispatch_default_undo() {
    let (app, _storage) = setup();
    let res = call(
        &app,
        "keymap.dispatch",
        json!({"event": {"key": "z", "code": "KeyZ", "ctrlKey": true}}),
    );
    assert_eq!(res, json!({"handled": true, "action": "undo", "shortcut": "ctrl+z"}));
}

#[test]
fn test_dispatch_in_text_input_unhandled() {
    let (app, _storage) = setup();
    let res = call(
        &app,
        "keymap.dispatch",
        json!({"event": {"key": "s", "code": "KeyS", "target": {"tagName": "INPUT"}}}),
    );
    assert_eq!(res, json!({"handled": false, "action": null, "shortcut": null}));
}

#[test]
fn test_dispatch_unbound_reports_shortcut() {
    let (app, _storage) = setup();
    let res = call(
        &app,
        "keymap.dispatch",
        json!({"event": {"key": "X", "code": "KeyX", "shiftKey": true}}),
    );
    assert_eq!(res["handled"], false);
    assert_eq!(res["shortcut"], "shift+x");
}

#[test]
fn test_dispatch_missing_event() {
    let (app, _storage) = setup();
    let err = handle_method(&app, "keymap.dispatch", &json!({})).unwrap_err();
    assert_eq!(err, "missing event");
}

#[test]
fn test_dispatch_invalid_event() {
    let (app, _storage) = setup();
    let err = handle_method(&app, "keymap.dispatch", &json!({"event": {"code": "KeyZ"}}))
        .unwrap_err();
    assert!(err.starts_with("invalid event"));
}

#[test]
fn test_normalize_and_capture() {
    let (app, _storage) = setup();
    let event = json!({"event": {"key": "s", "code": "KeyS", "target": {"tagName": "INPUT"}}});

    assert_eq!(call(&app, "keymap.normalize", event.clone()), Value::Null);
    assert_eq!(
        call(&app, "keymap.capture", event),
        json!({"shortcut": "s", "label": "S"})
    );

    let modifier_only = json!({"event": {"key": "Shift", "code": "ShiftLeft", "shiftKey": true}});
    assert_eq!(call(&app, "keymap.capture", modifier_only), Value::Null);
}

#[test]
fn test_resolve() {
    let (app, _storage) = setup();
    assert_eq!(call(&app, "keymap.resolve", json!({"shortcut": "space"})), "toggle-play");
    assert_eq!(call(&app, "keymap.resolve", json!({"shortcut": "ctrl+q"})), Value::Null);
    assert!(handle_method(&app, "keymap.resolve", &json!({"shortcut": "shift+ctrl+z"})).is_err());
}

// ─── Customization ───

#[test]
fn test_bind_and_unbind() {
    let (app, storage) = setup();

    let res = call(&app, "keymap.bind", json!({"shortcut": "ctrl+z", "action": "redo"}));
    assert_eq!(res, json!({"ok": true, "unsavedChanges": false}));
    assert_eq!(call(&app, "keymap.resolve", json!({"shortcut": "ctrl+z"})), "redo");
    assert_eq!(storage.write_count(), 1);

    call(&app, "keymap.unbind", json!({"shortcut": "ctrl+z"}));
    assert_eq!(call(&app, "keymap.resolve", json!({"shortcut": "ctrl+z"})), Value::Null);
}

#[test]
fn test_bind_reports_unsaved_changes() {
    let (app, storage) = setup();
    storage.set_fail_writes(true);

    let res = call(&app, "keymap.bind", json!({"shortcut": "ctrl+z", "action": "redo"}));
    assert_eq!(res["unsavedChanges"], true);
    assert!(handle_method(&app, "keymap.flush", &json!({})).is_err());

    storage.set_fail_writes(false);
    assert_eq!(call(&app, "keymap.flush", json!({})), json!({"ok": true}));
    assert_eq!(call(&app, "keymap.state", json!({}))["unsavedChanges"], false);
}

#[test]
fn test_bind_unknown_action() {
    let (app, _storage) = setup();
    let err = handle_method(&app, "keymap.bind", &json!({"shortcut": "ctrl+z", "action": "explode"}))
        .unwrap_err();
    assert_eq!(err, "Unknown action: explode");
}

#[test]
fn test_validate() {
    let (app, _storage) = setup();

    let res = call(&app, "keymap.validate", json!({"shortcut": "ctrl+z", "action": "redo"}));
    assert_eq!(
        res,
        json!({"conflict": {
            "shortcut": "ctrl+z",
            "existing": "undo",
            "proposed": "redo",
            "message": "'ctrl+z' is already bound to 'undo'",
        }})
    );

    let res = call(&app, "keymap.validate", json!({"shortcut": "ctrl+z", "action": "undo"}));
    assert_eq!(res, json!({"conflict": null}));
}

#[test]
fn test_keys_for_action() {
    let (app, _storage) = setup();
    let res = call(&app, "keymap.keys_for_action", json!({"action": "toggle-play"}));
    assert_eq!(res, json!(["k", "space"]));
}

#[test]
fn test_reset_then_export_matches_defaults() {
    let (app, _storage) = setup();
    call(&app, "keymap.bind", json!({"shortcut": "ctrl+z", "action": "redo"}));
    call(&app, "keymap.reset", json!({}));

    let res = call(&app, "keymap.export", json!({}));
    assert_eq!(res["version"], 1);
    assert_eq!(res["isCustomized"], false);
    assert_eq!(res["keybindings"], serde_json::to_value(default_bindings()).unwrap());
}

#[test]
fn test_import_string_and_object() {
    let (app, _storage) = setup();

    let res = call(
        &app,
        "keymap.import",
        json!({"document": r#"{"keybindings": {"space": "toggle-play"}}"#}),
    );
    assert_eq!(res, json!({"ok": true, "imported": 1}));

    let res = call(
        &app,
        "keymap.import",
        json!({"document": {"keybindings": {"ctrl+z": "undo", "ctrl+y": "redo"}}}),
    );
    assert_eq!(res["imported"], 2);
    assert_eq!(call(&app, "keymap.resolve", json!({"shortcut": "space"})), Value::Null);
}

#[test]
fn test_import_rejects_empty_key() {
    let (app, _storage) = setup();
    let before = call(&app, "keymap.export", json!({}));

    let res = handle_method(
        &app,
        "keymap.import",
        &json!({"document": {"keybindings": {"": "undo"}}}),
    );
    assert!(res.unwrap_err().starts_with("Invalid shortcuts file"));
    assert_eq!(call(&app, "keymap.export", json!({})), before);
}

#[test]
fn test_import_missing_document() {
    let (app, _storage) = setup();
    let err = handle_method(&app, "keymap.import", &json!({})).unwrap_err();
    assert_eq!(err, "missing document");
}

// ─── Flags ───

#[test]
fn test_enable_disable() {
    let (app, _storage) = setup();
    let event = json!({"event": {"key": "z", "code": "KeyZ", "ctrlKey": true}});

    assert_eq!(call(&app, "keymap.disable", json!({})), json!({"enabled": false}));
    assert_eq!(call(&app, "keymap.dispatch", event.clone())["handled"], false);

    assert_eq!(call(&app, "keymap.enable", json!({})), json!({"enabled": true}));
    assert_eq!(call(&app, "keymap.dispatch", event)["handled"], true);
}

#[test]
fn test_state_and_recording() {
    let (app, _storage) = setup();
    call(&app, "keymap.set_recording", json!({"recording": true}));

    let state = call(&app, "keymap.state", json!({}));
    assert_eq!(
        state,
        json!({
            "enabled": true,
            "isCustomized": false,
            "isRecording": true,
            "unsavedChanges": false,
            "platform": "other",
        })
    );

    let err = handle_method(&app, "keymap.set_recording", &json!({})).unwrap_err();
    assert_eq!(err, "missing recording");
}

// ─── Presentation ───

#[test]
fn test_format_uses_app_platform() {
    let (app, _storage) = setup();
    assert_eq!(call(&app, "keymap.format", json!({"shortcut": "ctrl+shift+z"})), "Ctrl+Shift+Z");

    let apple = Mutex::new(App::with_storage(config(Platform::Apple), Box::new(MemoryStorage::new())));
    assert_eq!(call(&apple, "keymap.format", json!({"shortcut": "ctrl+shift+z"})), "⌘⇧Z");
}

#[test]
fn test_help_and_registry() {
    let (app, _storage) = setup();

    let help = call(&app, "keymap.help", json!({}));
    let sections = help.as_array().unwrap();
    assert_eq!(sections.len(), 5);
    assert_eq!(sections[0]["title"], "Playback Controls");
    assert_eq!(sections[0]["category"], "playback");

    let registry = call(&app, "keymap.registry", json!({}));
    let first = &registry.as_array().unwrap()[0];
    assert_eq!(first["action"], "toggle-play");
    assert_eq!(first["defaultKey"], "space");
    assert_eq!(first["category"], "playback");
}

// ─── App wiring ───

#[test]
fn test_app_json_backend_persists_across_restart() {
    let tmp = TempDir::new().unwrap();
    let config = KeymapConfig {
        storage: StorageBackend::JsonFile,
        data_dir: Some(tmp.path().to_path_buf()),
        platform: Platform::Other,
    };

    {
        let app = Mutex::new(App::new(config.clone()).unwrap());
        call(&app, "keymap.bind", json!({"shortcut": "ctrl+z", "action": "redo"}));
        app.into_inner().unwrap().shutdown().unwrap();
    }

    assert!(tmp.path().join("keybindings.json").exists());
    let app = App::new(config).unwrap();
    assert!(app.keymap.is_customized());
    assert_eq!(app.keymap.keys_for_action(aura_keymap::types::action::Action::Redo).len(), 3);
}

#[test]
fn test_app_sqlite_backend() {
    let tmp = TempDir::new().unwrap();
    let config = KeymapConfig {
        storage: StorageBackend::Sqlite,
        data_dir: Some(tmp.path().to_path_buf()),
        platform: Platform::Other,
    };

    let mut app = App::new(config.clone()).unwrap();
    app.keymap.disable();
    app.keymap.unbind(&"space".parse().unwrap());
    app.shutdown().unwrap();
    drop(app);

    let app = App::new(config).unwrap();
    assert!(app.keymap.is_enabled(), "enable switch is not persisted");
    assert!(app.keymap.resolve(&"space".parse().unwrap()).is_none());
}
