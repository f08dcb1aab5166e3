use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Attention-seeking icon animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    /// Period of the repeating bounce while an application stays urgent.
    pub interval_ms: u64,
    /// Master switch; when false every bounce request is suppressed.
    pub animations: bool,
}

impl BounceConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            animations: true,
        }
    }
}
