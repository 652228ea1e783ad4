//! Aura keymap: keyboard shortcut binding, persistence and dispatch for the
//! Aura Video Studio timeline editor.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
