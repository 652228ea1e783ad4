//! Key-event normalization.
//!
//! Turns a [`RawKeyEvent`] into a canonical [`ShortcutKey`], or `None` when the
//! event must not be treated as a shortcut (modifier-only presses, keys with
//! no shortcut token, or plain typing inside a text field).

use crate::platform::Platform;
use crate::types::key_event::RawKeyEvent;
use crate::types::shortcut::{is_function_key, Modifiers, ShortcutKey};

/// Logical key names that map to a base key unchanged (after lowercasing).
const LITERAL_KEYS: &[&str] = &[
    "tab", "home", "end", "delete", "backspace", "escape", "pageup", "pagedown", "enter",
];

const ARROWS: &[&str] = &["up", "down", "left", "right"];

/// Resolves the base-key token for an event.
///
/// Letters and digits come from the physical `code` rather than the logical
/// `key`, so shortcuts stay put on non-QWERTY layouts and when shift changes
/// the produced character.
pub fn base_key(event: &RawKeyEvent) -> Option<String> {
    if event.key == " " || event.code == "Space" {
        return Some("space".to_string());
    }

    if let Some(direction) = event.key.strip_prefix("Arrow") {
        let direction = direction.to_lowercase();
        if ARROWS.contains(&direction.as_str()) {
            return Some(direction);
        }
    }

    let logical = event.key.to_lowercase();
    if LITERAL_KEYS.contains(&logical.as_str()) || is_function_key(&logical) {
        return Some(logical);
    }

    if let Some(letter) = single_char(event.code.strip_prefix("Key")) {
        if letter.is_ascii_alphabetic() {
            return Some(letter.to_ascii_lowercase().to_string());
        }
    }

    if let Some(digit) = single_char(event.code.strip_prefix("Digit")) {
        if digit.is_ascii_digit() {
            return Some(digit.to_string());
        }
    }

    match event.code.as_str() {
        "Equal" => Some("=".to_string()),
        "Minus" => Some("-".to_string()),
        _ => None,
    }
}

fn single_char(s: Option<&str>) -> Option<char> {
    let mut chars = s?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Active modifiers. The `ctrl` slot is Command on Apple, Control elsewhere.
pub fn active_modifiers(event: &RawKeyEvent, platform: Platform) -> Modifiers {
    Modifiers {
        ctrl: if platform.is_apple() { event.meta_key } else { event.ctrl_key },
        alt: event.alt_key,
        shift: event.shift_key,
    }
}

/// Normalizes an event, ignoring where focus is.
fn resolve(event: &RawKeyEvent, platform: Platform) -> Option<ShortcutKey> {
    let key = base_key(event)?;
    ShortcutKey::new(active_modifiers(event, platform), &key).ok()
}

/// Normalizes an event for dispatch.
///
/// While a typable element has focus, unmodified and shift-only presses are
/// left to the text field.
pub fn normalize_event(event: &RawKeyEvent, platform: Platform) -> Option<ShortcutKey> {
    let shortcut = resolve(event, platform)?;
    let modifiers = shortcut.modifiers();
    if event.is_typing() && (modifiers.is_empty() || modifiers.is_shift_only()) {
        return None;
    }
    Some(shortcut)
}

/// Platform-bound normalizer held by the dispatcher and the recording UI.
#[derive(Debug, Clone, Copy)]
pub struct KeyNormalizer {
    platform: Platform,
}

impl KeyNormalizer {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn normalize(&self, event: &RawKeyEvent) -> Option<ShortcutKey> {
        normalize_event(event, self.platform)
    }

    /// Normalizes a key press made while recording a new binding.
    ///
    /// The recorder is usually a focused input itself, so typable-focus
    /// suppression does not apply.
    pub fn capture(&self, event: &RawKeyEvent) -> Option<ShortcutKey> {
        resolve(event, self.platform)
    }
}
