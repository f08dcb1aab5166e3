//! Dockyard configuration and persisted dock state.
//!
//! Two files live in the platform config directory:
//!
//! - `dockyard.toml`: daemon settings ([`DockyardConfig`]). Every section
//!   uses serde defaults so partial files work.
//! - `dock.toml`: the persisted Dock ([`PersistedDockState`]), rewritten
//!   atomically on every committed dock mutation.
//!
//! ```rust,no_run
//! use dockyard_config::{load_config, DockStateStore};
//!
//! let config = load_config().expect("failed to load config");
//! let store = DockStateStore::new(config.dock_state_path().expect("no config dir"));
//! let state = store.load();
//! println!("{} docked apps", state.assigned().count());
//! ```

pub mod dock_state;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use dock_state::{DockSlotRecord, DockStateStore, PersistedDockState, DOCK_STATE_VERSION};
pub use schema::{DockyardConfig, LogLevel};

use dockyard_common::ConfigError;

/// Load config from the platform default path, creating it if missing,
/// and validate the result.
pub fn load_config() -> Result<DockyardConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &DockyardConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
