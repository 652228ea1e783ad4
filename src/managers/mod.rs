// Aura keymap state managers
// Managers own mutable state; the keybinding manager is the only one.

pub mod keybinding_manager;
