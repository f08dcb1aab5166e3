//! Configuration schema types for Dockyard.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bounce;
mod dock;
mod integration;
mod system;

pub use bounce::*;
pub use dock::*;
pub use integration::*;
pub use system::*;

use std::path::PathBuf;

use dockyard_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::toml_loader::default_dock_state_path;

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for the dockyard daemon.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DockyardConfig {
    pub integration: IntegrationConfig,
    pub dock: DockConfig,
    pub bounce: BounceConfig,
    pub screen: ScreenConfig,
    pub logging: LoggingConfig,
}

impl DockyardConfig {
    /// Path of the persisted dock state, honoring `dock.state_path` when set.
    pub fn dock_state_path(&self) -> Result<PathBuf, ConfigError> {
        if self.dock.state_path.trim().is_empty() {
            default_dock_state_path()
        } else {
            Ok(PathBuf::from(self.dock.state_path.trim()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: DockyardConfig = toml::from_str("").unwrap();
        assert!(config.integration.enabled);
        assert_eq!(config.integration.call_timeout_ms, 2000);
        assert_eq!(config.integration.shell_name, "Workspace");
        assert_eq!(config.dock.slots, 16);
        assert_eq!(config.dock.launch_timeout_ms, 20_000);
        assert_eq!(config.bounce.interval_ms, 3000);
        assert!(config.bounce.animations);
        assert_eq!(config.screen.icon_size, 64);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: DockyardConfig = toml::from_str(
            r#"
[dock]
slots = 8

[integration]
enabled = false
"#,
        )
        .unwrap();
        assert_eq!(config.dock.slots, 8);
        assert_eq!(config.dock.launch_timeout_ms, 20_000);
        assert!(!config.integration.enabled);
        assert_eq!(config.integration.call_timeout_ms, 2000);
    }

    #[test]
    fn explicit_state_path_wins() {
        let mut config = DockyardConfig::default();
        config.dock.state_path = "/tmp/custom-dock.toml".into();
        assert_eq!(
            config.dock_state_path().unwrap(),
            PathBuf::from("/tmp/custom-dock.toml")
        );
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = DockyardConfig::default();
        config.bounce.interval_ms = 1500;
        config.screen.width = 2560;
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: DockyardConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.bounce.interval_ms, 1500);
        assert_eq!(parsed.screen.width, 2560);
    }
}
