//! RPC method handler for the keymap JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! keybinding manager, dispatcher and registry via the `App` struct.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::keybinding_manager::KeybindingManagerTrait;
use crate::services::action_registry::{help_sections, registry};
use crate::services::shortcut_formatter::{format_for_display, format_shortcut};
use crate::types::action::Action;
use crate::types::key_event::RawKeyEvent;
use crate::types::keymap::SCHEMA_VERSION;
use crate::types::shortcut::ShortcutKey;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn shortcut_param(params: &Value) -> Result<ShortcutKey, String> {
    ShortcutKey::parse(str_param(params, "shortcut")?).map_err(|e| e.to_string())
}

fn action_param(params: &Value) -> Result<Action, String> {
    str_param(params, "action")?
        .parse::<Action>()
        .map_err(|e| e.to_string())
}

fn event_param(params: &Value) -> Result<RawKeyEvent, String> {
    let raw = params.get("event").cloned().ok_or("missing event")?;
    serde_json::from_value(raw).map_err(|e| format!("invalid event: {}", e))
}

fn keys_json(keys: &[ShortcutKey]) -> Value {
    json!(keys.iter().map(|k| k.to_string()).collect::<Vec<_>>())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Dispatch ───
        "keymap.dispatch" => {
            let event = event_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let shortcut = a.dispatcher.normalizer().normalize(&event);
            let outcome = a.dispatcher.dispatch(&a.keymap, &event);
            Ok(json!({
                "handled": outcome.is_handled(),
                "action": outcome.action().map(|action| action.id()),
                "shortcut": shortcut.map(|s| s.to_string()),
            }))
        }
        "keymap.normalize" => {
            let event = event_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let shortcut = a.dispatcher.normalizer().normalize(&event);
            Ok(json!(shortcut.map(|s| s.to_string())))
        }
        "keymap.capture" => {
            let event = event_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            match a.dispatcher.normalizer().capture(&event) {
                Some(shortcut) => Ok(json!({
                    "shortcut": shortcut.to_string(),
                    "label": format_for_display(&shortcut, a.platform),
                })),
                None => Ok(Value::Null),
            }
        }
        "keymap.resolve" => {
            let shortcut = shortcut_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!(a.keymap.resolve(&shortcut).map(|action| action.id())))
        }

        // ─── Customization ───
        "keymap.bind" => {
            let shortcut = shortcut_param(params)?;
            let action = action_param(params)?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.keymap.bind(shortcut, action);
            Ok(json!({"ok": true, "unsavedChanges": a.keymap.has_unsaved_changes()}))
        }
        "keymap.unbind" => {
            let shortcut = shortcut_param(params)?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.keymap.unbind(&shortcut);
            Ok(json!({"ok": true, "unsavedChanges": a.keymap.has_unsaved_changes()}))
        }
        "keymap.validate" => {
            let shortcut = shortcut_param(params)?;
            let action = action_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            match a.keymap.validate(&shortcut, action) {
                Some(conflict) => Ok(json!({
                    "conflict": {
                        "shortcut": conflict.key.to_string(),
                        "existing": conflict.existing.id(),
                        "proposed": conflict.proposed.id(),
                        "message": conflict.to_string(),
                    }
                })),
                None => Ok(json!({"conflict": null})),
            }
        }
        "keymap.keys_for_action" => {
            let action = action_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(keys_json(&a.keymap.keys_for_action(action)))
        }
        "keymap.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.keymap.reset_to_defaults();
            Ok(json!({"ok": true}))
        }
        "keymap.export" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let bindings = serde_json::to_value(a.keymap.export_bindings())
                .map_err(|e| e.to_string())?;
            Ok(json!({
                "version": SCHEMA_VERSION,
                "keybindings": bindings,
                "isCustomized": a.keymap.is_customized(),
            }))
        }
        "keymap.import" => {
            let document = match params.get("document") {
                Some(Value::String(text)) => text.clone(),
                Some(doc @ Value::Object(_)) => doc.to_string(),
                _ => return Err("missing document".to_string()),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let count = a.keymap.import_document(&document).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "imported": count}))
        }
        "keymap.flush" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.keymap.flush().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Flags ───
        "keymap.enable" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.keymap.enable();
            Ok(json!({"enabled": true}))
        }
        "keymap.disable" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.keymap.disable();
            Ok(json!({"enabled": false}))
        }
        "keymap.set_recording" => {
            let recording = params
                .get("recording")
                .and_then(|v| v.as_bool())
                .ok_or("missing recording")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.keymap.set_recording(recording);
            Ok(json!({"recording": recording}))
        }
        "keymap.state" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "enabled": a.keymap.is_enabled(),
                "isCustomized": a.keymap.is_customized(),
                "isRecording": a.keymap.is_recording(),
                "unsavedChanges": a.keymap.has_unsaved_changes(),
                "platform": a.platform,
            }))
        }

        // ─── Presentation ───
        "keymap.format" => {
            let shortcut = str_param(params, "shortcut")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!(format_shortcut(shortcut, a.platform)))
        }
        "keymap.help" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let sections = help_sections(&a.keymap.export_bindings(), a.platform);
            serde_json::to_value(sections).map_err(|e| e.to_string())
        }
        "keymap.registry" => serde_json::to_value(registry()).map_err(|e| e.to_string()),

        _ => Err(format!("unknown method: {}", method)),
    }
}

