// Aura keymap shared type definitions
// Each submodule defines types used across the keymap subsystem.

pub mod action;
pub mod config;
pub mod errors;
pub mod key_event;
pub mod keymap;
pub mod shortcut;
