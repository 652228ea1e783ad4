//! Canonical keyboard shortcut representation.
//!
//! A [`ShortcutKey`] is zero or more modifiers (`ctrl`, `alt`, `shift`, always
//! in that order) followed by exactly one base key, joined with `+`:
//! `"space"`, `"shift+left"`, `"ctrl+shift+z"`, `"ctrl+="`.
//!
//! Values only come into existence through [`ShortcutKey::new`], the
//! [`FromStr`] parser, or the key-event normalizer, so every instance upholds
//! the ordering invariant and two keys are equal iff their strings are equal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ShortcutError;

/// Named non-character keys accepted as a base key.
pub const NAMED_KEYS: &[&str] = &[
    "space", "tab", "home", "end", "delete", "backspace", "escape", "pageup", "pagedown",
    "enter", "up", "down", "left", "right",
];

/// Punctuation accepted as a base key. Only the keys the default map uses.
pub const SYMBOL_KEYS: &[char] = &['=', '-'];

const MODIFIER_ORDER: [&str; 3] = ["ctrl", "alt", "shift"];

/// Returns true for `f1` through `f12`.
pub fn is_function_key(token: &str) -> bool {
    match token.strip_prefix('f') {
        Some(n) if !n.is_empty() && !n.starts_with('0') => {
            n.parse::<u8>().map(|n| (1..=12).contains(&n)).unwrap_or(false)
        }
        _ => false,
    }
}

/// Returns true if `token` is a valid (lowercase) base-key token.
pub fn is_base_key(token: &str) -> bool {
    if NAMED_KEYS.contains(&token) || is_function_key(token) {
        return true;
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            c.is_ascii_lowercase() || c.is_ascii_digit() || SYMBOL_KEYS.contains(&c)
        }
        _ => false,
    }
}

/// Set of active modifiers. The platform-specific physical key behind
/// `ctrl` (Command on Apple, Control elsewhere) is resolved by the normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, alt: false, shift: false };
    pub const CTRL: Modifiers = Modifiers { ctrl: true, alt: false, shift: false };
    pub const SHIFT: Modifiers = Modifiers { ctrl: false, alt: false, shift: true };
    pub const CTRL_SHIFT: Modifiers = Modifiers { ctrl: true, alt: false, shift: true };

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }

    /// Shift held without ctrl or alt.
    pub fn is_shift_only(&self) -> bool {
        self.shift && !self.ctrl && !self.alt
    }

    /// Active modifier tokens in canonical order.
    pub fn tokens(&self) -> Vec<&'static str> {
        let flags = [self.ctrl, self.alt, self.shift];
        MODIFIER_ORDER
            .iter()
            .zip(flags)
            .filter(|(_, on)| *on)
            .map(|(token, _)| *token)
            .collect()
    }
}

/// A validated, canonical keyboard shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortcutKey {
    modifiers: Modifiers,
    key: String,
}

impl ShortcutKey {
    /// Builds a shortcut from modifiers and a base key token.
    pub fn new(modifiers: Modifiers, key: &str) -> Result<Self, ShortcutError> {
        let key = key.to_lowercase();
        if !is_base_key(&key) {
            return Err(ShortcutError::InvalidKey(key));
        }
        Ok(Self { modifiers, key })
    }

    /// Parses a shortcut string such as `"ctrl+shift+z"`.
    ///
    /// Tokens are lowercased first. Modifiers must be unique and in
    /// `ctrl`, `alt`, `shift` order.
    pub fn parse(input: &str) -> Result<Self, ShortcutError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ShortcutError::Empty);
        }
        let lowered = trimmed.to_lowercase();

        let (prefix, key) = match lowered.rsplit_once('+') {
            Some((prefix, key)) => (Some(prefix), key),
            None => (None, lowered.as_str()),
        };

        let mut modifiers = Modifiers::NONE;
        if let Some(prefix) = prefix {
            let mut last_rank: Option<usize> = None;
            for token in prefix.split('+') {
                let rank = MODIFIER_ORDER
                    .iter()
                    .position(|m| *m == token)
                    .ok_or_else(|| ShortcutError::InvalidModifier(token.to_string()))?;
                if last_rank.map_or(false, |last| rank <= last) {
                    return Err(ShortcutError::ModifierOrder(trimmed.to_string()));
                }
                last_rank = Some(rank);
                match rank {
                    0 => modifiers.ctrl = true,
                    1 => modifiers.alt = true,
                    _ => modifiers.shift = true,
                }
            }
        }

        Self::new(modifiers, key)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The base key token, e.g. `"z"`, `"left"`, `"f5"`.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ShortcutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.modifiers.tokens() {
            write!(f, "{}+", token)?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for ShortcutKey {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShortcutKey {
    type Error = ShortcutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShortcutKey> for String {
    fn from(key: ShortcutKey) -> Self {
        key.to_string()
    }
}
