use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Dock size and launch tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Number of slot positions (`0..slots`).
    pub slots: u32,
    /// Override for the persisted state file. Empty means the default path.
    pub state_path: String,
    /// How long a launching icon waits for its application before giving up.
    pub launch_timeout_ms: u64,
}

impl DockConfig {
    pub fn launch_timeout(&self) -> Duration {
        Duration::from_millis(self.launch_timeout_ms)
    }
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            slots: 16,
            state_path: String::new(),
            launch_timeout_ms: 20_000,
        }
    }
}
