// Aura keymap paths for macOS
// Config: ~/Library/Preferences/AuraVideoStudio
// Data:   ~/Library/Application Support/AuraVideoStudio

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Preferences/AuraVideoStudio`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Preferences")
        .join("AuraVideoStudio")
}

/// `~/Library/Application Support/AuraVideoStudio`
pub fn get_data_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("AuraVideoStudio")
}
