// Aura keymap platform abstraction
// Classifies the keyboard platform (Apple vs. everything else) and provides
// per-OS config/data paths for the persisted keymap.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// path implementation at compile time.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Keyboard platform. On Apple platforms the `ctrl` shortcut slot is the
/// Command key and shortcuts are displayed with glyphs.
///
/// Resolved once at startup and passed to the normalizer and formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Apple,
    Other,
}

impl Platform {
    /// Classifies a `navigator.platform` / user-agent style string.
    pub fn from_user_agent(agent: &str) -> Self {
        let lowered = agent.to_lowercase();
        if ["mac", "iphone", "ipad"].iter().any(|needle| lowered.contains(needle)) {
            Platform::Apple
        } else {
            Platform::Other
        }
    }

    /// Apple if either the platform string or the user agent looks Apple.
    pub fn detect(platform: &str, user_agent: &str) -> Self {
        match (Self::from_user_agent(platform), Self::from_user_agent(user_agent)) {
            (Platform::Other, Platform::Other) => Platform::Other,
            _ => Platform::Apple,
        }
    }

    /// Platform of the compile target.
    pub fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::Apple
        } else {
            Platform::Other
        }
    }

    pub fn is_apple(&self) -> bool {
        matches!(self, Platform::Apple)
    }
}

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/aura-video-studio` (or `$XDG_CONFIG_HOME/aura-video-studio`)
/// - **macOS**: `~/Library/Preferences/AuraVideoStudio`
/// - **Windows**: `%APPDATA%/AuraVideoStudio`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(".").join("aura-video-studio")
    }
}

/// Returns the platform-specific data directory.
///
/// - **Linux**: `~/.local/share/aura-video-studio` (or `$XDG_DATA_HOME/aura-video-studio`)
/// - **macOS**: `~/Library/Application Support/AuraVideoStudio`
/// - **Windows**: `%LOCALAPPDATA%/AuraVideoStudio`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(".").join("aura-video-studio-data")
    }
}
