// Aura keymap services
// Stateless pieces around the keybinding store.

pub mod action_registry;
pub mod dispatcher;
pub mod key_normalizer;
pub mod keymap_storage;
pub mod shortcut_formatter;
