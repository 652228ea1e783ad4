//! Aura keymap: keyboard shortcut engine for the Aura Video Studio editor.
//!
//! Entry point: runs a console walkthrough of the keymap subsystem against
//! throwaway in-memory storage, standing in for the editor UI.

use aura_keymap::app::App;
use aura_keymap::managers::keybinding_manager::KeybindingManagerTrait;
use aura_keymap::platform::Platform;
use aura_keymap::services::action_registry::{category_display_name, help_sections, registry};
use aura_keymap::services::shortcut_formatter::format_for_display;
use aura_keymap::types::action::Action;
use aura_keymap::types::config::{KeymapConfig, StorageBackend};
use aura_keymap::types::key_event::{FocusedElement, RawKeyEvent};
use aura_keymap::types::shortcut::ShortcutKey;

type DemoResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> DemoResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = KeymapConfig {
        storage: StorageBackend::Memory,
        ..KeymapConfig::from_env()?
    };
    let mut app = App::new(config)?;

    println!();
    println!("Aura keymap v{} demo ({:?} keyboard)", env!("CARGO_PKG_VERSION"), app.platform);
    println!();

    demo_registry();
    demo_dispatch(&app);
    demo_customization(&mut app)?;
    demo_enable_switch(&mut app);
    demo_import_export(&mut app)?;
    demo_formatting()?;
    demo_help(&app);

    app.shutdown()?;
    println!("Done.");
    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_registry() {
    section("Action Registry");
    let actions = registry();
    println!("  {} bindable actions", actions.len());
    for info in actions.iter().take(5) {
        let default_key = info.default_key.as_ref().map(|k| k.to_string()).unwrap_or_default();
        println!(
            "  {:<22} {:<14} {:<20} {}",
            info.action.id(),
            default_key,
            category_display_name(info.category.id()),
            info.description
        );
    }
    println!("  ...");
    println!();
}

fn ctrl_z(platform: Platform) -> RawKeyEvent {
    let event = RawKeyEvent::new("z", "KeyZ");
    if platform.is_apple() {
        event.with_meta()
    } else {
        event.with_ctrl()
    }
}

fn demo_dispatch(app: &App) {
    section("Dispatch");

    let button = FocusedElement::new("BUTTON");
    let input = FocusedElement::new("INPUT");

    let cases = [
        ("Ctrl+Z on a button", ctrl_z(app.platform).focused_on(button.clone())),
        ("Space on a button", RawKeyEvent::new(" ", "Space").focused_on(button)),
        ("S in a text input", RawKeyEvent::new("s", "KeyS").focused_on(input.clone())),
        ("Shift+M in a text input", RawKeyEvent::new("M", "KeyM").with_shift().focused_on(input)),
        ("Shift alone", RawKeyEvent::new("Shift", "ShiftLeft").with_shift()),
    ];

    for (label, event) in cases {
        let outcome = app.handle_key_event(&event);
        match outcome.action() {
            Some(action) => println!("  {:<26} -> {}", label, action),
            None => println!("  {:<26} -> (unhandled)", label),
        }
    }
    println!();
}

fn demo_customization(app: &mut App) -> DemoResult {
    section("Customization");

    let key: ShortcutKey = "ctrl+z".parse()?;
    if let Some(conflict) = app.keymap.validate(&key, Action::Redo) {
        println!("  Conflict: {}", conflict);
    }
    app.keymap.bind(key.clone(), Action::Redo);
    println!("  ctrl+z now resolves to {:?}", app.keymap.resolve(&key).map(|a| a.id()));
    println!("  Customized: {}", app.keymap.is_customized());

    let redo_keys: Vec<String> = app
        .keymap
        .keys_for_action(Action::Redo)
        .iter()
        .map(|k| k.to_string())
        .collect();
    println!("  Keys for redo: {}", redo_keys.join(", "));

    let outcome = app.handle_key_event(&ctrl_z(app.platform));
    println!("  Pressing Ctrl+Z dispatches {:?}", outcome.action().map(|a| a.id()));

    app.keymap.reset_to_defaults();
    println!("  After reset: ctrl+z -> {:?}", app.keymap.resolve(&key).map(|a| a.id()));
    println!();
    Ok(())
}

fn demo_enable_switch(app: &mut App) {
    section("Enable Switch");

    let event = ctrl_z(app.platform);
    app.keymap.disable();
    println!("  Disabled: handled = {}", app.handle_key_event(&event).is_handled());
    app.keymap.enable();
    println!("  Enabled:  handled = {}", app.handle_key_event(&event).is_handled());
    println!();
}

fn demo_import_export(app: &mut App) -> DemoResult {
    section("Import / Export");

    let before = app.keymap.export_bindings();
    match app.keymap.import_document(r#"{"keybindings": {"": "undo"}}"#) {
        Ok(_) => println!("  Unexpectedly accepted a malformed file"),
        Err(e) => println!("  Rejected: {}", e),
    }
    println!("  Map unchanged: {}", before == app.keymap.export_bindings());

    let imported = app
        .keymap
        .import_document(r#"{"keybindings": {"space": "toggle-play", "ctrl+shift+s": "split-element"}}"#)?;
    println!("  Imported {} bindings", imported);

    let document = app.keymap.export_document()?;
    println!("  Exported document is {} bytes", document.len());

    app.keymap.reset_to_defaults();
    println!();
    Ok(())
}

fn demo_formatting() -> DemoResult {
    section("Display Formatting");

    for raw in ["ctrl+shift+z", "shift+left", "space", "ctrl+=", "f5"] {
        let key: ShortcutKey = raw.parse()?;
        println!(
            "  {:<14} apple: {:<8} other: {}",
            raw,
            format_for_display(&key, Platform::Apple),
            format_for_display(&key, Platform::Other)
        );
    }
    println!();
    Ok(())
}

fn demo_help(app: &App) {
    section("Shortcuts Help");

    for block in help_sections(&app.keymap.export_bindings(), app.platform) {
        let bound = block.entries.iter().filter(|e| !e.keys.is_empty()).count();
        println!("  {:<22} {} actions, {} bound", block.title, block.entries.len(), bound);
    }
    println!();
}
