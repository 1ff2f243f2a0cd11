//! Studio configuration, read from `studio.ron` next to the binary.

use std::fs;
use std::path::Path;

use forge_logging::forge_warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base address of the rendering backend.
    pub backend_url: String,
    /// Time between job-status polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Voice used for every faceless production.
    pub voice_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            poll_interval_ms: 2_000,
            voice_id: forge_engine::DEFAULT_VOICE_ID.to_string(),
        }
    }
}

/// Loads the config file, falling back to defaults when it is missing or
/// unreadable. A malformed file is reported but never fatal.
pub fn load_or_default(path: &Path) -> AppConfig {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return AppConfig::default(),
    };
    match ron::from_str(&text) {
        Ok(config) => config,
        Err(err) => {
            forge_warn!("ignoring malformed config at {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
