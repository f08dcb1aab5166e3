//! Read and atomically write the dock state file.

use std::io::Write;
use std::path::{Path, PathBuf};

use dockyard_common::ConfigError;
use tracing::{debug, info, warn};

use super::types::{DockSlotRecord, PersistedDockState, StateFile, DOCK_STATE_VERSION};

/// Handle to the persisted dock state file.
#[derive(Debug, Clone)]
pub struct DockStateStore {
    path: PathBuf,
}

impl DockStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    /// Read the persisted state. Never fails: anything unreadable becomes
    /// unassigned slots and is reported through `tracing`.
    pub fn load(&self) -> PersistedDockState {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no dock state yet, starting empty");
                return PersistedDockState::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), "failed to read dock state: {e}");
                return PersistedDockState::default();
            }
        };

        let state = parse_state(&content);
        info!(
            path = %self.path.display(),
            assigned = state.assigned().count(),
            "loaded dock state"
        );
        state
    }

    // =========================================================================
    // SAVE
    // =========================================================================

    /// Replace the persisted state.
    ///
    /// Writes to `<file>.tmp` in the same directory, flushes it, then renames
    /// over the target. If any step fails the temp file is removed and the
    /// previous file is left as it was.
    pub fn save(&self, state: &PersistedDockState) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(&StateFile::from(state)).map_err(|e| {
            ConfigError::WriteError(format!("failed to serialize dock state: {e}"))
        })?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::WriteError(format!(
                    "failed to create dock state directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let tmp_path = self.path.with_extension("toml.tmp");
        if let Err(e) = write_synced(&tmp_path, toml_str.as_bytes()) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(ConfigError::WriteError(format!(
                "failed to write dock state to {}: {e}",
                tmp_path.display()
            )));
        }

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(ConfigError::WriteError(format!(
                "failed to replace {}: {e}",
                self.path.display()
            )));
        }

        debug!(path = %self.path.display(), "dock state saved");
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Parse dock state text, defaulting whatever is malformed.
pub(super) fn parse_state(content: &str) -> PersistedDockState {
    let mut state = PersistedDockState::default();

    let table: toml::Table = match toml::from_str(content) {
        Ok(table) => table,
        Err(e) => {
            warn!("dock state is not valid TOML, treating every slot as unassigned: {e}");
            return state;
        }
    };

    if let Some(version) = table.get("version").and_then(toml::Value::as_integer) {
        if version != i64::from(DOCK_STATE_VERSION) {
            warn!(version, "dock state written by a different version, reading what matches");
        }
    }

    state.collapsed = table
        .get("collapsed")
        .and_then(toml::Value::as_bool)
        .unwrap_or(false);

    let Some(slots) = table.get("slots") else {
        return state;
    };
    let Some(slots) = slots.as_table() else {
        warn!("dock state `slots` is not a table, ignoring it");
        return state;
    };

    for (key, value) in slots {
        let Ok(position) = key.trim().parse::<usize>() else {
            warn!(key = %key, "dock slot key is not a position, skipping");
            continue;
        };
        match value.clone().try_into::<DockSlotRecord>() {
            Ok(record) if record.is_assigned() => {
                state.slots.insert(position, record);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(position, "malformed dock slot, leaving it unassigned: {e}");
            }
        }
    }

    state
}
