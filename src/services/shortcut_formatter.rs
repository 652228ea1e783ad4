//! Human-readable shortcut labels.
//!
//! Apple platforms get glyphs with no separator (`⌘⇧Z`); everything else
//! gets words joined by `+` (`Ctrl+Shift+Z`).

use crate::platform::Platform;
use crate::types::shortcut::ShortcutKey;

fn modifier_label(token: &str, platform: Platform) -> String {
    let (glyph, word) = match token {
        "ctrl" => ("⌘", "Ctrl"),
        "alt" => ("⌥", "Alt"),
        "shift" => ("⇧", "Shift"),
        other => return title_case(other),
    };
    let label = if platform.is_apple() { glyph } else { word };
    label.to_string()
}

/// Named keys get a fixed label; letters, digits and function keys are upper-cased.
fn key_label(key: &str) -> String {
    let named = match key {
        "space" => Some("Space"),
        "backspace" => Some("⌫"),
        "delete" => Some("Del"),
        "escape" => Some("Esc"),
        "enter" => Some("Enter"),
        "tab" => Some("Tab"),
        "home" => Some("Home"),
        "end" => Some("End"),
        "pageup" => Some("PgUp"),
        "pagedown" => Some("PgDn"),
        "up" => Some("↑"),
        "down" => Some("↓"),
        "left" => Some("←"),
        "right" => Some("→"),
        _ => None,
    };
    named.map(str::to_string).unwrap_or_else(|| key.to_uppercase())
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats any `+`-joined shortcut string. Unknown modifier tokens are
/// title-cased rather than rejected, so hand-edited strings still render.
pub fn format_shortcut(shortcut: &str, platform: Platform) -> String {
    let mut tokens: Vec<&str> = shortcut.split('+').collect();
    let key = tokens.pop().unwrap_or_default();

    let mut parts: Vec<String> = tokens
        .iter()
        .map(|token| modifier_label(token, platform))
        .collect();
    parts.push(key_label(key));

    if platform.is_apple() {
        parts.concat()
    } else {
        parts.join("+")
    }
}

/// Formats a validated shortcut for display.
pub fn format_for_display(key: &ShortcutKey, platform: Platform) -> String {
    format_shortcut(&key.to_string(), platform)
}
