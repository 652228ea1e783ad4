//! Keymap database layer.
//!
//! Provides SQLite connection management and schema migrations for the
//! SQLite keymap storage backend.
//!
//! # Usage
//!
//! ```no_run
//! use aura_keymap::database::Database;
//!
//! let db = Database::open("aura-keymap.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
