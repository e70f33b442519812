use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::channel::Channel;

/// User preferences persisted next to the cache. Every field is optional on
/// disk; a missing or unreadable file means defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Prompt for the update channel on every start.
    pub ask_mode: bool,
    /// Channel used when `ask_mode` is off.
    pub bootstrap_channel: Option<Channel>,
    pub disable_hardware_acceleration: bool,
    /// Launch in this process instead of spawning a new runtime.
    pub no_jvm: bool,
    /// Explicit runtime binary, skipping discovery.
    pub runtime_path: Option<PathBuf>,
    pub entry_point: Option<String>,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            ask_mode: true,
            bootstrap_channel: None,
            disable_hardware_acceleration: false,
            no_jvm: false,
            runtime_path: None,
            entry_point: None,
        }
    }
}

impl LauncherSettings {
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Ignoring unreadable settings file {:?}: {}", path, err);
                Self::default()
            }
        }
    }
}
