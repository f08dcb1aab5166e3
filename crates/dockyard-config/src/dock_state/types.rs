//! Persisted dock records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Version written into every dock state file.
pub const DOCK_STATE_VERSION: u32 = 1;

/// Attributes of one docked slot as stored on disk.
///
/// Every field defaults, so an entry missing a key (say `autolaunch`) loads
/// with that attribute unset rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DockSlotRecord {
    pub name: String,
    pub command: String,
    pub paste_command: String,
    pub dnd_command: String,
    pub autolaunch: bool,
    pub locked: bool,
    pub image_path: String,
}

impl DockSlotRecord {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// A slot is assigned iff it has a launch command.
    pub fn is_assigned(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

/// The whole persisted Dock. Positions absent from `slots` are unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedDockState {
    pub version: u32,
    pub collapsed: bool,
    pub slots: BTreeMap<usize, DockSlotRecord>,
}

impl Default for PersistedDockState {
    fn default() -> Self {
        Self {
            version: DOCK_STATE_VERSION,
            collapsed: false,
            slots: BTreeMap::new(),
        }
    }
}

impl PersistedDockState {
    pub fn slot(&self, position: usize) -> Option<&DockSlotRecord> {
        self.slots.get(&position).filter(|s| s.is_assigned())
    }

    /// Assigned slots in ascending position order.
    pub fn assigned(&self) -> impl Iterator<Item = (usize, &DockSlotRecord)> {
        self.slots
            .iter()
            .filter(|(_, s)| s.is_assigned())
            .map(|(p, s)| (*p, s))
    }

    /// Positions flagged for launch at shell start-up, ascending.
    pub fn autolaunch_positions(&self) -> Vec<usize> {
        self.assigned()
            .filter(|(_, s)| s.autolaunch)
            .map(|(p, _)| p)
            .collect()
    }
}

/// On-disk shape: TOML tables need string keys.
#[derive(Serialize)]
pub(super) struct StateFile<'a> {
    pub(super) version: u32,
    pub(super) collapsed: bool,
    pub(super) slots: BTreeMap<String, &'a DockSlotRecord>,
}

impl<'a> From<&'a PersistedDockState> for StateFile<'a> {
    fn from(state: &'a PersistedDockState) -> Self {
        Self {
            version: DOCK_STATE_VERSION,
            collapsed: state.collapsed,
            slots: state
                .assigned()
                .map(|(p, s)| (p.to_string(), s))
                .collect(),
        }
    }
}
