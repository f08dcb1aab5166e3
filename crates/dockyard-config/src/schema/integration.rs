use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shell integration switch and gateway tuning.
///
/// With `enabled = false` the window manager runs standalone: no Dock
/// model, no shell queue, no cross-process notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    pub enabled: bool,
    /// Upper bound for a synchronous gateway call.
    pub call_timeout_ms: u64,
    /// Dock name of the shell itself. Activating its icon brings the
    /// shell forward instead of launching anything.
    pub shell_name: String,
}

impl IntegrationConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            call_timeout_ms: 2000,
            shell_name: "Workspace".into(),
        }
    }
}
